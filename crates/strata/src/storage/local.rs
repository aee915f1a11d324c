//! Filesystem-backed object store: one directory per bucket under a root.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Result, StrataError};

use super::{validate_key, ObjectInfo, ObjectStore};

/// Object store rooted at a local directory.
///
/// ```text
/// data/
/// ├── raw/dataset.csv
/// ├── staging/train.csv
/// └── curated/curated.csv
/// ```
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`. The directory is not created until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a bucket directory if it does not exist yet.
    pub fn create_bucket(&self, bucket: &str) -> Result<()> {
        let dir = self.bucket_dir(bucket)?;
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf> {
        if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
            return Err(StrataError::Config(format!(
                "Invalid bucket name: '{}'",
                bucket
            )));
        }
        Ok(self.root.join(bucket))
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.bucket_dir(bucket)?.join(key))
    }
}

impl ObjectStore for LocalStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        if !self.bucket_exists(bucket) {
            return Err(StrataError::BucketNotFound(bucket.to_string()));
        }
        if !path.is_file() {
            return Err(StrataError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        debug!(path = %path.display(), "Reading object");
        fs::read(&path).map_err(|e| io_error(&path, e))
    }

    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        debug!(path = %path.display(), bytes = body.len(), "Writing object");
        fs::write(&path, body).map_err(|e| io_error(&path, e))
    }

    fn list(&self, bucket: &str) -> Result<Vec<ObjectInfo>> {
        let dir = self.bucket_dir(bucket)?;
        if !dir.is_dir() {
            return Err(StrataError::BucketNotFound(bucket.to_string()));
        }
        let mut objects = Vec::new();
        walk(&dir, "", &mut objects)?;
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }

    fn bucket_exists(&self, bucket: &str) -> bool {
        self.bucket_dir(bucket).map(|d| d.is_dir()).unwrap_or(false)
    }
}

/// Collect files below `dir`, keyed by their `/`-joined relative path.
fn walk(dir: &Path, prefix: &str, out: &mut Vec<ObjectInfo>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let key = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        let metadata = entry.metadata().map_err(|e| io_error(&path, e))?;
        if metadata.is_dir() {
            walk(&path, &key, out)?;
        } else {
            let last_modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            out.push(ObjectInfo {
                key,
                size: metadata.len(),
                last_modified,
            });
        }
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> StrataError {
    StrataError::Io {
        path: path.to_path_buf(),
        source,
    }
}
