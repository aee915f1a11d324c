//! Raw → staging job: filter, encode labels, split, and persist.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::input::{DataTable, SourceMetadata};
use crate::storage::TableStore;

use super::encoder::LabelMapping;
use super::stratified::{ClassCode, Partition, SplitIndices, StratifiedSplitter, DEFAULT_SEED};
use super::weights::ClassWeights;

/// Configuration for dataset preparation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Categorical column holding the class label.
    pub label_column: String,
    /// Numeric column that must be present for a record to be kept.
    pub target_column: String,
    /// Column appended to every record with its class code.
    pub encoded_column: String,
    /// Shuffle seed for classes with more than three records.
    pub seed: u64,
    /// Output key for the train split.
    pub train_key: String,
    /// Output key for the dev split.
    pub dev_key: String,
    /// Output key for the test split.
    pub test_key: String,
    /// Output key for the label mapping document.
    pub label_mapping_key: String,
    /// Output key for the class weights document.
    pub class_weights_key: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            label_column: "cod_hex".to_string(),
            target_column: "cout_tot".to_string(),
            encoded_column: "class_encoded".to_string(),
            seed: DEFAULT_SEED,
            train_key: "train.csv".to_string(),
            dev_key: "dev.csv".to_string(),
            test_key: "test.csv".to_string(),
            label_mapping_key: "label_mapping.txt".to_string(),
            class_weights_key: "class_weights.txt".to_string(),
        }
    }
}

impl SplitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the label column.
    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = column.into();
        self
    }

    /// Set the required target column.
    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = column.into();
        self
    }

    /// Output key for a partition.
    pub fn key_for(&self, partition: Partition) -> &str {
        match partition {
            Partition::Train => &self.train_key,
            Partition::Dev => &self.dev_key,
            Partition::Test => &self.test_key,
        }
    }
}

/// In-memory result of preparing a dataset.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub train: DataTable,
    pub dev: DataTable,
    pub test: DataTable,
    /// Positions into the filtered table.
    pub indices: SplitIndices,
    pub label_mapping: LabelMapping,
    /// `None` when the train split is empty.
    pub class_weights: Option<ClassWeights>,
    /// Records removed for a missing target value.
    pub rows_dropped: usize,
}

impl PreparedDataset {
    /// The table for a partition.
    pub fn table(&self, partition: Partition) -> &DataTable {
        match partition {
            Partition::Train => &self.train,
            Partition::Dev => &self.dev,
            Partition::Test => &self.test,
        }
    }
}

/// Summary of a completed split job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    pub source: SourceMetadata,
    pub rows_dropped: usize,
    pub class_count: usize,
    pub train_rows: usize,
    pub dev_rows: usize,
    pub test_rows: usize,
    pub class_weights_written: bool,
    /// Keys written to the staging bucket, in write order.
    pub outputs: Vec<String>,
}

/// Orchestrates encode → split → persist for a labeled table.
pub struct DatasetPreparer {
    config: SplitConfig,
    splitter: StratifiedSplitter,
}

impl DatasetPreparer {
    /// Create a preparer with default configuration.
    pub fn new() -> Self {
        Self::with_config(SplitConfig::default())
    }

    /// Create a preparer with custom configuration.
    pub fn with_config(config: SplitConfig) -> Self {
        let splitter = StratifiedSplitter::with_seed(config.seed);
        Self { config, splitter }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Filter, encode, and split a table without touching storage.
    pub fn prepare(&self, mut table: DataTable) -> Result<PreparedDataset> {
        let label_idx = table.require_column(&self.config.label_column)?;
        let target_idx = table.require_column(&self.config.target_column)?;

        let before = table.row_count();
        table.retain_rows(|row| {
            !DataTable::is_null_value(row.get(target_idx).map(String::as_str).unwrap_or(""))
        });
        let rows_dropped = before - table.row_count();
        info!(
            rows_dropped,
            rows = table.row_count(),
            column = %self.config.target_column,
            "Dropped records with missing target"
        );

        let (label_mapping, codes) =
            LabelMapping::fit_transform(table.column_values(label_idx));
        debug!(classes = label_mapping.len(), "Encoded labels");
        table.put_column(
            &self.config.encoded_column,
            codes.iter().map(|c| c.to_string()).collect(),
        );

        let indices = self.splitter.split(&codes);
        info!(
            train = indices.train.len(),
            dev = indices.dev.len(),
            test = indices.test.len(),
            seed = self.splitter.seed(),
            "Split records"
        );

        let train_codes: Vec<ClassCode> = indices.train.iter().map(|&i| codes[i]).collect();
        let class_weights = ClassWeights::from_train_codes(&train_codes);
        if class_weights.is_none() {
            warn!("No training data available, skipping class weights");
        }

        Ok(PreparedDataset {
            train: table.select_rows(&indices.train),
            dev: table.select_rows(&indices.dev),
            test: table.select_rows(&indices.test),
            indices,
            label_mapping,
            class_weights,
            rows_dropped,
        })
    }

    /// Read a raw table, prepare it, and write splits and metadata to staging.
    ///
    /// Outputs are written one at a time; a failed write aborts the job and
    /// leaves earlier outputs in place.
    pub fn run(
        &self,
        tables: &TableStore<'_>,
        bucket_raw: &str,
        input_file: &str,
        bucket_staging: &str,
        output_prefix: &str,
    ) -> Result<SplitReport> {
        debug!(output_prefix, "Output prefix is not applied to staging keys");
        let (table, source) = tables.read_table(bucket_raw, input_file)?;
        let prepared = self.prepare(table)?;

        let mut outputs = Vec::new();
        tables.write_metadata(
            bucket_staging,
            &self.config.label_mapping_key,
            &prepared.label_mapping,
        )?;
        outputs.push(self.config.label_mapping_key.clone());

        for partition in Partition::ALL {
            let key = self.config.key_for(partition);
            tables.write_table(bucket_staging, key, prepared.table(partition))?;
            outputs.push(key.to_string());
        }

        if let Some(ref weights) = prepared.class_weights {
            tables.write_metadata(bucket_staging, &self.config.class_weights_key, weights)?;
            outputs.push(self.config.class_weights_key.clone());
        }

        Ok(SplitReport {
            source,
            rows_dropped: prepared.rows_dropped,
            class_count: prepared.label_mapping.len(),
            train_rows: prepared.train.row_count(),
            dev_rows: prepared.dev.row_count(),
            test_rows: prepared.test.row_count(),
            class_weights_written: prepared.class_weights.is_some(),
            outputs,
        })
    }
}

impl Default for DatasetPreparer {
    fn default() -> Self {
        Self::new()
    }
}
