//! Error types for the Strata library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Strata operations.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Error reading or writing a file in a local store.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested object does not exist in the bucket.
    #[error("Object '{key}' not found in bucket '{bucket}'")]
    NotFound { bucket: String, key: String },

    /// The bucket itself does not exist.
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// A column required by a pipeline stage is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column that must be numeric holds a non-numeric value.
    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Empty input or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StrataError {
    /// Whether this error reports an absent input artifact.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StrataError::NotFound { .. } | StrataError::BucketNotFound(_)
        )
    }
}

/// Result type alias for Strata operations.
pub type Result<T> = std::result::Result<T, StrataError>;
