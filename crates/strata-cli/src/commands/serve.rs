//! Serve command - HTTP status API over the buckets.

use std::sync::Arc;

use colored::Colorize;
use strata::{Buckets, ObjectStore};

use crate::server::{app, state::AppState};

pub fn run(
    store: Arc<dyn ObjectStore>,
    buckets: Buckets,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting status server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    for (tier, bucket) in buckets.tiers() {
        println!("  {:<8} {}", format!("{}:", tier), bucket);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let state = AppState::new(store, buckets);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run_server(state, port))
}
