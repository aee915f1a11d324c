//! Table and metadata documents on top of an [`ObjectStore`].

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::Result;
use crate::input::{DataTable, SourceMetadata, TableCodec};

use super::ObjectStore;

/// Reads and writes CSV tables and JSON metadata through an object store.
pub struct TableStore<'a> {
    store: &'a dyn ObjectStore,
    codec: TableCodec,
}

impl<'a> TableStore<'a> {
    /// Wrap a store with the default codec.
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self::with_codec(store, TableCodec::new())
    }

    /// Wrap a store with a custom codec.
    pub fn with_codec(store: &'a dyn ObjectStore, codec: TableCodec) -> Self {
        Self { store, codec }
    }

    /// The underlying object store.
    pub fn store(&self) -> &'a dyn ObjectStore {
        self.store
    }

    /// Read and decode a table.
    pub fn read_table(&self, bucket: &str, key: &str) -> Result<(DataTable, SourceMetadata)> {
        let bytes = self.store.get(bucket, key)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.codec.decode(&bytes)?;
        let metadata = SourceMetadata::new(bucket, key, hash, bytes.len() as u64, &table);
        info!(
            bucket,
            key,
            rows = metadata.row_count,
            columns = metadata.column_count,
            "Loaded table"
        );
        Ok((table, metadata))
    }

    /// Encode and write a table, overwriting any existing object.
    pub fn write_table(&self, bucket: &str, key: &str, table: &DataTable) -> Result<()> {
        let bytes = self.codec.encode(table)?;
        self.store.put(bucket, key, &bytes)?;
        info!(bucket, key, rows = table.row_count(), "Wrote table");
        Ok(())
    }

    /// Write a flat key → value metadata document as JSON.
    pub fn write_metadata<M: Serialize + ?Sized>(
        &self,
        bucket: &str,
        key: &str,
        metadata: &M,
    ) -> Result<()> {
        let bytes = serde_json::to_vec(metadata)?;
        self.store.put(bucket, key, &bytes)?;
        info!(bucket, key, "Wrote metadata");
        Ok(())
    }
}
