//! Run command - split then curate the train split.

use std::sync::Arc;

use colored::Colorize;
use strata::{Buckets, ObjectStore, SplitConfig, Strata, StrataConfig};

use super::{curate, split};

pub fn run(
    store: Arc<dyn ObjectStore>,
    buckets: Buckets,
    input_file: &str,
    output_file: &str,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StrataConfig {
        split: SplitConfig::new().with_seed(seed),
        ..Default::default()
    };
    let strata = Strata::with_config(store, config);

    let report = strata.run_pipeline(&buckets, input_file, output_file)?;

    split::print_report(&report.split, &buckets.staging);
    println!();
    curate::print_report(&report.curation, &buckets.curated, output_file);
    println!();
    println!("{}", "Pipeline complete".green().bold());
    Ok(())
}
