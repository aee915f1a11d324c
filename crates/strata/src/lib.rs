//! Strata: moves a tabular dataset through raw, staging, and curated tiers.
//!
//! Two independent batch stages communicate only through storage keys:
//!
//! - **Split** (raw → staging): drops records without a cost value, encodes the
//!   label column, and partitions records into train/dev/test with a
//!   deterministic, class-aware strategy. Writes a label mapping and
//!   inverse-frequency class weights alongside the splits.
//! - **Curate** (staging → curated): imputes missing numerics, derives a cost
//!   ratio, standardizes key columns, and adds a composite risk score.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strata::{LocalStore, Strata};
//!
//! let strata = Strata::new(Arc::new(LocalStore::new("data")));
//! let split = strata.split("raw", "dataset.csv", "staging", "").unwrap();
//! println!("train rows: {}", split.train_rows);
//!
//! let report = strata.curate("staging", "curated", "train.csv", "curated.csv").unwrap();
//! println!("imputed: {}", report.values_imputed);
//! ```

pub mod curate;
pub mod error;
pub mod input;
pub mod split;
pub mod storage;

mod strata;

pub use crate::strata::{Buckets, PipelineReport, Strata, StrataConfig};
pub use curate::{CurationConfig, CurationReport, Curator};
pub use error::{Result, StrataError};
pub use input::{DataTable, SourceMetadata, TableCodec};
pub use split::{DatasetPreparer, SplitConfig, SplitIndices, SplitReport, StratifiedSplitter};
pub use storage::{BucketStats, LocalStore, MemoryStore, ObjectInfo, ObjectStore, TableStore};
