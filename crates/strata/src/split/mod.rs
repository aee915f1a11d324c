//! Raw → staging: label encoding and deterministic stratified splitting.
//!
//! # Overview
//!
//! ```text
//! raw/dataset.csv ──► drop missing target ──► encode labels ──► split
//!                                                                 │
//!   staging/{train,dev,test}.csv ◄────────────────────────────────┤
//!   staging/label_mapping.txt, staging/class_weights.txt ◄────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use strata::split::StratifiedSplitter;
//!
//! let split = StratifiedSplitter::new().split(&[0, 0, 0, 0, 1, 1, 2]);
//! assert_eq!(split.len(), 7);
//! assert_eq!(split.train.len(), 3);
//! ```

mod encoder;
mod prepare;
mod stratified;
mod weights;

pub use encoder::LabelMapping;
pub use prepare::{DatasetPreparer, PreparedDataset, SplitConfig, SplitReport};
pub use stratified::{
    ClassCode, ClassSize, Partition, SplitIndices, StratifiedSplitter, DEFAULT_SEED,
};
pub use weights::ClassWeights;
