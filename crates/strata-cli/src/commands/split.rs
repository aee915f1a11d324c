//! Split command - raw → staging.

use std::sync::Arc;

use colored::Colorize;
use strata::{ObjectStore, SplitConfig, SplitReport, Strata, StrataConfig};

pub fn run(
    store: Arc<dyn ObjectStore>,
    bucket_raw: &str,
    input_file: &str,
    bucket_staging: &str,
    output_prefix: &str,
    seed: u64,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StrataConfig {
        split: SplitConfig::new().with_seed(seed),
        ..Default::default()
    };
    let strata = Strata::with_config(store, config);

    let report = strata.split(bucket_raw, input_file, bucket_staging, output_prefix)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, bucket_staging);
    }
    Ok(())
}

/// Human-readable split summary.
pub fn print_report(report: &SplitReport, bucket_staging: &str) {
    println!(
        "{} {}/{}",
        "Split".cyan().bold(),
        report.source.bucket.white(),
        report.source.key.white().bold()
    );
    println!(
        "  Source:   {} rows, {} columns ({})",
        report.source.row_count,
        report.source.column_count,
        report.source.hash.dimmed()
    );
    if report.rows_dropped > 0 {
        println!(
            "  Dropped:  {} rows without a cost value",
            report.rows_dropped.to_string().yellow()
        );
    }
    println!("  Classes:  {}", report.class_count.to_string().white().bold());
    println!();

    println!("{}", "Partitions:".yellow().bold());
    println!("  Train: {}", report.train_rows.to_string().green());
    println!("  Dev:   {}", report.dev_rows.to_string().blue());
    println!("  Test:  {}", report.test_rows.to_string().magenta());
    println!();

    println!("{} {}", "Written to".yellow().bold(), bucket_staging.white());
    for key in &report.outputs {
        println!("  {} {}", "✓".green(), key);
    }
    if !report.class_weights_written {
        println!(
            "  {} class weights skipped (empty train split)",
            "!".yellow()
        );
    }
}
