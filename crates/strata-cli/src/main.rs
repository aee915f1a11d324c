//! Strata CLI - raw/staging/curated dataset pipeline.

mod cli;
mod commands;
mod logging;
mod server;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{init_logging, LogConfig};
use strata::LocalStore;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let store = Arc::new(LocalStore::new(&cli.store_root));

    let result = match cli.command {
        Commands::Split {
            bucket_raw,
            input_file,
            bucket_staging,
            output_prefix,
            seed,
            json,
        } => commands::split::run(
            store,
            &bucket_raw,
            &input_file,
            &bucket_staging,
            &output_prefix,
            seed,
            json,
        ),

        Commands::Curate {
            bucket_staging,
            bucket_curated,
            input_file,
            output_file,
            json,
        } => commands::curate::run(
            store,
            &bucket_staging,
            &bucket_curated,
            &input_file,
            &output_file,
            json,
        ),

        Commands::Run {
            input_file,
            output_file,
            buckets,
            seed,
        } => commands::run::run(store, buckets.into(), &input_file, &output_file, seed),

        Commands::Serve { port, buckets } => commands::serve::run(store, buckets.into(), port),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
