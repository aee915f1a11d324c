//! In-memory object store for tests and dry runs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::{Result, StrataError};

use super::{validate_key, ObjectInfo, ObjectStore};

#[derive(Debug, Default)]
struct Inner {
    buckets: BTreeSet<String>,
    objects: BTreeMap<(String, String), (Vec<u8>, DateTime<Utc>)>,
}

/// Object store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given empty buckets.
    pub fn with_buckets(buckets: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            inner.buckets.extend(buckets.iter().map(|b| b.to_string()));
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let inner = self.lock();
        if !inner.buckets.contains(bucket) {
            return Err(StrataError::BucketNotFound(bucket.to_string()));
        }
        inner
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(body, _)| body.clone())
            .ok_or_else(|| StrataError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()> {
        validate_key(key)?;
        let mut inner = self.lock();
        inner.buckets.insert(bucket.to_string());
        inner
            .objects
            .insert((bucket.to_string(), key.to_string()), (body.to_vec(), Utc::now()));
        Ok(())
    }

    fn list(&self, bucket: &str) -> Result<Vec<ObjectInfo>> {
        let inner = self.lock();
        if !inner.buckets.contains(bucket) {
            return Err(StrataError::BucketNotFound(bucket.to_string()));
        }
        Ok(inner
            .objects
            .iter()
            .filter(|((b, _), _)| b == bucket)
            .map(|((_, key), (body, modified))| ObjectInfo {
                key: key.clone(),
                size: body.len() as u64,
                last_modified: *modified,
            })
            .collect())
    }

    fn bucket_exists(&self, bucket: &str) -> bool {
        self.lock().buckets.contains(bucket)
    }
}
