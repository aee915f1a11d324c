//! Main Strata struct and public API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::curate::{CurationConfig, CurationReport, Curator};
use crate::error::Result;
use crate::input::{CodecConfig, TableCodec};
use crate::split::{DatasetPreparer, SplitConfig, SplitReport};
use crate::storage::{ObjectStore, TableStore};

/// Names of the three storage tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buckets {
    pub raw: String,
    pub staging: String,
    pub curated: String,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            raw: "raw".to_string(),
            staging: "staging".to_string(),
            curated: "curated".to_string(),
        }
    }
}

impl Buckets {
    /// Tier names paired with bucket names, in pipeline order.
    pub fn tiers(&self) -> [(&'static str, &str); 3] {
        [
            ("raw", self.raw.as_str()),
            ("staging", self.staging.as_str()),
            ("curated", self.curated.as_str()),
        ]
    }
}

/// Configuration for both pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct StrataConfig {
    /// Table decoding configuration.
    pub codec: CodecConfig,
    /// Raw → staging configuration.
    pub split: SplitConfig,
    /// Staging → curated configuration.
    pub curation: CurationConfig,
}

/// Result of running both stages back to back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub split: SplitReport,
    pub curation: CurationReport,
}

/// Runs the pipeline stages against an object store.
pub struct Strata {
    config: StrataConfig,
    store: Arc<dyn ObjectStore>,
}

impl Strata {
    /// Create a pipeline over a store with default configuration.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_config(store, StrataConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(store: Arc<dyn ObjectStore>, config: StrataConfig) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    fn tables(&self) -> TableStore<'_> {
        TableStore::with_codec(
            self.store.as_ref(),
            TableCodec::with_config(self.config.codec.clone()),
        )
    }

    /// Split a raw table into train/dev/test plus metadata in staging.
    pub fn split(
        &self,
        bucket_raw: &str,
        input_file: &str,
        bucket_staging: &str,
        output_prefix: &str,
    ) -> Result<SplitReport> {
        let _span = info_span!("split", bucket_raw, input_file, bucket_staging).entered();
        DatasetPreparer::with_config(self.config.split.clone()).run(
            &self.tables(),
            bucket_raw,
            input_file,
            bucket_staging,
            output_prefix,
        )
    }

    /// Curate a staging table into the curated bucket.
    pub fn curate(
        &self,
        bucket_staging: &str,
        bucket_curated: &str,
        input_file: &str,
        output_file: &str,
    ) -> Result<CurationReport> {
        let _span = info_span!("curate", bucket_staging, input_file, bucket_curated).entered();
        Curator::with_config(self.config.curation.clone()).run(
            &self.tables(),
            bucket_staging,
            bucket_curated,
            input_file,
            output_file,
        )
    }

    /// Split `input_file` from the raw tier, then curate the train split.
    pub fn run_pipeline(
        &self,
        buckets: &Buckets,
        input_file: &str,
        output_file: &str,
    ) -> Result<PipelineReport> {
        let split = self.split(&buckets.raw, input_file, &buckets.staging, "")?;
        let curation = self.curate(
            &buckets.staging,
            &buckets.curated,
            &self.config.split.train_key,
            output_file,
        )?;
        Ok(PipelineReport { split, curation })
    }
}
