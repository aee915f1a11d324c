//! Application state for the web server.

use std::sync::Arc;

use strata::{Buckets, ObjectStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Store backing all three tiers.
    pub store: Arc<dyn ObjectStore>,
    /// Bucket name of each tier.
    pub buckets: Arc<Buckets>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn ObjectStore>, buckets: Buckets) -> Self {
        Self {
            store,
            buckets: Arc::new(buckets),
        }
    }
}
