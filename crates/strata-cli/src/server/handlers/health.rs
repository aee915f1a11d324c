//! Health and stats handlers.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use strata::BucketStats;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Reachability of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketStatus {
    Up,
    Down,
}

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Response for the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Status per tier name.
    pub buckets: BTreeMap<String, BucketStatus>,
}

/// Report `healthy` when every tier's bucket exists.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let buckets = tokio::task::spawn_blocking(move || bucket_statuses(&state)).await?;

    let status = if buckets.values().all(|s| *s == BucketStatus::Up) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Ok(Json(HealthResponse { status, buckets }))
}

fn bucket_statuses(state: &AppState) -> BTreeMap<String, BucketStatus> {
    state
        .buckets
        .tiers()
        .into_iter()
        .map(|(tier, bucket)| {
            let status = if state.store.bucket_exists(bucket) {
                BucketStatus::Up
            } else {
                BucketStatus::Down
            };
            (tier.to_string(), status)
        })
        .collect()
}

/// Object count and total size per tier, under `<tier>_bucket`.
pub type StatsResponse = BTreeMap<String, BucketStats>;

/// Tally every tier's bucket. Any listing failure fails the request.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let body = tokio::task::spawn_blocking(move || collect_stats(&state)).await??;
    Ok(Json(body))
}

fn collect_stats(state: &AppState) -> strata::Result<StatsResponse> {
    let mut body = StatsResponse::new();
    for (tier, bucket) in state.buckets.tiers() {
        let objects = state.store.list(bucket)?;
        body.insert(format!("{}_bucket", tier), BucketStats::from_objects(&objects));
    }
    Ok(body)
}
