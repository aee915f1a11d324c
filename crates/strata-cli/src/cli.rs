//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Strata: raw → staging → curated dataset pipeline
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding one subdirectory per bucket
    #[arg(long, global = true, env = "STRATA_STORE_ROOT", default_value = "data")]
    pub store_root: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a raw dataset into train/dev/test in the staging bucket
    Split {
        /// Raw bucket name
        #[arg(long)]
        bucket_raw: String,

        /// Input CSV key in the raw bucket
        #[arg(long)]
        input_file: String,

        /// Staging bucket name
        #[arg(long)]
        bucket_staging: String,

        /// Output prefix (accepted but not applied to staging keys)
        #[arg(long)]
        output_prefix: String,

        /// Shuffle seed for classes with more than three records
        #[arg(long, default_value_t = strata::split::DEFAULT_SEED)]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Curate a staging split into the curated bucket
    Curate {
        /// Staging bucket name
        #[arg(long)]
        bucket_staging: String,

        /// Curated bucket name
        #[arg(long)]
        bucket_curated: String,

        /// Input CSV key in the staging bucket
        #[arg(long)]
        input_file: String,

        /// Output CSV key in the curated bucket
        #[arg(long)]
        output_file: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a raw dataset, then curate its train split
    Run {
        /// Input CSV key in the raw bucket
        #[arg(long)]
        input_file: String,

        /// Output CSV key in the curated bucket
        #[arg(long, default_value = "curated_train.csv")]
        output_file: String,

        #[command(flatten)]
        buckets: BucketArgs,

        /// Shuffle seed for classes with more than three records
        #[arg(long, default_value_t = strata::split::DEFAULT_SEED)]
        seed: u64,
    },

    /// Serve bucket listings, health, and stats over HTTP
    Serve {
        /// Port for the web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        #[command(flatten)]
        buckets: BucketArgs,
    },
}

/// Tier bucket names.
#[derive(Args, Clone, Debug)]
pub struct BucketArgs {
    /// Raw bucket name
    #[arg(long, default_value = "raw")]
    pub raw_bucket: String,

    /// Staging bucket name
    #[arg(long, default_value = "staging")]
    pub staging_bucket: String,

    /// Curated bucket name
    #[arg(long, default_value = "curated")]
    pub curated_bucket: String,
}

impl From<BucketArgs> for strata::Buckets {
    fn from(args: BucketArgs) -> Self {
        strata::Buckets {
            raw: args.raw_bucket,
            staging: args.staging_bucket,
            curated: args.curated_bucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split() {
        let cli = Cli::try_parse_from([
            "strata",
            "split",
            "--bucket-raw",
            "raw",
            "--input-file",
            "dataset.csv",
            "--bucket-staging",
            "staging",
            "--output-prefix",
            "v1",
        ])
        .unwrap();

        match cli.command {
            Commands::Split {
                input_file, seed, ..
            } => {
                assert_eq!(input_file, "dataset.csv");
                assert_eq!(seed, 42);
            }
            _ => panic!("expected split"),
        }
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_curate_requires_all_keys() {
        let result = Cli::try_parse_from([
            "strata",
            "curate",
            "--bucket-staging",
            "staging",
            "--bucket-curated",
            "curated",
            "--input-file",
            "train.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "strata",
            "serve",
            "-vv",
            "--log-format",
            "json",
            "--store-root",
            "/tmp/buckets",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.store_root, PathBuf::from("/tmp/buckets"));
        match cli.command {
            Commands::Serve { port, buckets } => {
                assert_eq!(port, 8000);
                assert_eq!(buckets.curated_bucket, "curated");
            }
            _ => panic!("expected serve"),
        }
    }
}
