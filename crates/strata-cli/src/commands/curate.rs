//! Curate command - staging → curated.

use std::sync::Arc;

use colored::Colorize;
use strata::curate::CurationStep;
use strata::{CurationReport, ObjectStore, Strata};

pub fn run(
    store: Arc<dyn ObjectStore>,
    bucket_staging: &str,
    bucket_curated: &str,
    input_file: &str,
    output_file: &str,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let strata = Strata::new(store);
    let report = strata.curate(bucket_staging, bucket_curated, input_file, output_file)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, bucket_curated, output_file);
    }
    Ok(())
}

/// Human-readable curation summary.
pub fn print_report(report: &CurationReport, bucket_curated: &str, output_file: &str) {
    println!(
        "{} {} rows → {}/{}",
        "Curated".cyan().bold(),
        report.rows.to_string().white().bold(),
        bucket_curated.white(),
        output_file.white().bold()
    );
    println!();

    println!("{}", "Steps:".yellow().bold());
    for step in &report.steps {
        let marker = match step {
            CurationStep::Impute { .. } => "~".blue(),
            CurationStep::DropColumn { .. } => "-".red(),
            CurationStep::DeriveRatio { .. } | CurationStep::Composite { .. } => "+".green(),
            CurationStep::Standardize { .. } | CurationStep::Zero { .. } => "=".cyan(),
        };
        println!("  {} {}", marker, step.description());
    }
    println!();

    println!("  Values imputed:  {}", report.values_imputed);
    if !report.columns_added.is_empty() {
        println!("  Columns added:   {}", report.columns_added.join(", ").green());
    }
    if !report.columns_removed.is_empty() {
        println!("  Columns removed: {}", report.columns_removed.join(", ").red());
    }
}
