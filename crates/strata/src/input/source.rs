//! In-memory table representation and source metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};

/// Cell tokens read as missing, compared case-insensitively after trimming.
const MISSING_TOKENS: &[&str] = &["na", "n/a", "nan", "-nan", "null", "none", "#n/a", "<na>"];

/// Metadata about a table loaded from a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Bucket the table was read from.
    pub bucket: String,
    /// Object key inside the bucket.
    pub key: String,
    /// SHA-256 hash of the raw object bytes.
    pub hash: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the table was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a table that has just been decoded.
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        hash: String,
        size_bytes: u64,
        table: &DataTable,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            hash,
            size_bytes,
            row_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }
}

/// Represents parsed tabular data.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    ///
    /// Rows are padded with empty cells or truncated to the header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column by name, or a `MissingColumn` error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| StrataError::MissingColumn(name.to_string()))
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Overwrite a cell. Positions outside the header width or past the last row are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: String) {
        if col >= self.headers.len() {
            return;
        }
        if let Some(r) = self.rows.get_mut(row) {
            if r.len() <= col {
                r.resize(col + 1, String::new());
            }
            r[col] = value;
        }
    }

    /// Append a column, or overwrite it in place when the name already exists.
    ///
    /// `values` must hold one entry per row.
    pub fn put_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.row_count());
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Remove a column by name. Returns whether it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.headers.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
        true
    }

    /// Build a new table from the given row positions, in the given order.
    pub fn select_rows(&self, positions: &[usize]) -> DataTable {
        let rows = positions
            .iter()
            .filter_map(|&p| self.rows.get(p).cloned())
            .collect();
        DataTable::new(self.headers.clone(), rows)
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) {
        self.rows.retain(|row| keep(row));
    }

    /// Whether every cell of a column is missing (true for a table with no rows).
    pub fn is_column_empty(&self, index: usize) -> bool {
        self.column_values(index).all(Self::is_null_value)
    }

    /// Read a column as optional floats, `None` for missing cells.
    ///
    /// Fails with `NonNumeric` on the first non-missing cell that does not parse.
    pub fn numeric_column(&self, index: usize) -> Result<Vec<Option<f64>>> {
        self.column_values(index)
            .enumerate()
            .map(|(row, value)| {
                parse_numeric(value).map_err(|_| StrataError::NonNumeric {
                    column: self.headers[index].clone(),
                    row,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    /// Whether every non-missing cell of a column parses as a number.
    pub fn is_numeric_column(&self, index: usize) -> bool {
        self.column_values(index).all(|v| parse_numeric(v).is_ok())
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || MISSING_TOKENS
                .iter()
                .any(|token| trimmed.eq_ignore_ascii_case(token))
    }
}

/// Parse a cell: `Ok(None)` when missing, `Err(())` when present but not a number.
fn parse_numeric(value: &str) -> std::result::Result<Option<f64>, ()> {
    if DataTable::is_null_value(value) {
        return Ok(None);
    }
    value.trim().parse::<f64>().map(Some).map_err(|_| ())
}

/// Render a float for output, empty for missing.
///
/// Very large and very small magnitudes use exponent notation (`1e-300`),
/// which `f64::from_str` reads back exactly.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => String::new(),
        Some(v) if v != 0.0 && !(1e-5..1e16).contains(&v.abs()) => format!("{:e}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
