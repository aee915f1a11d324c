//! Object storage for the raw, staging, and curated tiers.
//!
//! Every tier is a bucket holding opaque blobs addressed by key. Pipeline
//! stages only talk to an [`ObjectStore`]; [`TableStore`] layers the CSV codec
//! and JSON metadata documents on top of it.

mod local;
mod memory;
mod tables;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use tables::TableStore;

/// Summary of one stored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key inside its bucket.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// Last write time.
    pub last_modified: DateTime<Utc>,
}

/// Object count and total size of a bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub object_count: usize,
    pub size: u64,
}

impl BucketStats {
    /// Tally a bucket listing.
    pub fn from_objects(objects: &[ObjectInfo]) -> Self {
        Self {
            object_count: objects.len(),
            size: objects.iter().map(|o| o.size).sum(),
        }
    }
}

/// A key-value blob store organised in buckets.
///
/// Writes overwrite unconditionally. Reading an absent key fails with
/// [`StrataError::NotFound`](crate::StrataError::NotFound); reading from an
/// absent bucket fails with
/// [`StrataError::BucketNotFound`](crate::StrataError::BucketNotFound).
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Store an object, creating the bucket if needed.
    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()>;

    /// List every object in a bucket, sorted by key.
    fn list(&self, bucket: &str) -> Result<Vec<ObjectInfo>>;

    /// Whether the bucket exists.
    fn bucket_exists(&self, bucket: &str) -> bool;
}

/// Reject keys that could escape their bucket.
fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(crate::error::StrataError::Config(format!(
            "Invalid object key: '{}'",
            key
        )));
    }
    Ok(())
}
