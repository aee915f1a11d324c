//! Staging → curated: feature engineering over a numeric-heavy table.
//!
//! Stages run in a fixed order, each reading the previous stage's output:
//!
//! 1. median imputation of numeric columns
//! 2. removal of an entirely empty `Tarification` column
//! 3. `cost_ratio = cout_tot / prime` (0 where `prime == 0`)
//! 4. standardization of the key numeric columns
//! 5. `risk_score`, a weighted mean of normalized columns
//!
//! # Usage
//!
//! ```
//! use strata::curate::Curator;
//! use strata::DataTable;
//!
//! let table = DataTable::new(
//!     vec!["cout_tot".into(), "prime".into()],
//!     vec![vec!["50".into(), "0".into()], vec!["50".into(), "100".into()]],
//! );
//! let curated = Curator::new().curate(table).unwrap();
//! assert!(curated.table.has_column("risk_score"));
//! ```

mod operations;
mod pipeline;
mod stats;

pub use operations::{CurationReport, CurationStep};
pub use pipeline::{CuratedTable, CurationConfig, Curator, RiskComponent};
pub use stats::{distinct_count, median, RunningStats};
