//! Bucket listing handlers.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the root endpoint.
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Greet API clients.
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Strata data API".to_string(),
    })
}

/// Keys of one tier, under `<tier>_data`.
pub type ListingResponse = BTreeMap<String, Vec<String>>;

/// List keys in a tier's bucket; an empty bucket is a 404.
///
/// Store calls block on filesystem I/O, so they run on the blocking pool.
async fn list_tier(
    state: AppState,
    tier: &'static str,
    bucket: String,
) -> Result<Json<ListingResponse>, ApiError> {
    let keys = tokio::task::spawn_blocking(move || state.store.list(&bucket)).await??;

    if keys.is_empty() {
        return Err(ApiError::NotFound(format!("No {} data found.", tier)));
    }

    let mut body = ListingResponse::new();
    body.insert(
        format!("{}_data", tier),
        keys.into_iter().map(|o| o.key).collect(),
    );
    Ok(Json(body))
}

/// List the raw bucket.
pub async fn list_raw(State(state): State<AppState>) -> Result<Json<ListingResponse>, ApiError> {
    let bucket = state.buckets.raw.clone();
    list_tier(state, "raw", bucket).await
}

/// List the staging bucket.
pub async fn list_staging(
    State(state): State<AppState>,
) -> Result<Json<ListingResponse>, ApiError> {
    let bucket = state.buckets.staging.clone();
    list_tier(state, "staging", bucket).await
}

/// List the curated bucket.
pub async fn list_curated(
    State(state): State<AppState>,
) -> Result<Json<ListingResponse>, ApiError> {
    let bucket = state.buckets.curated.clone();
    list_tier(state, "curated", bucket).await
}
