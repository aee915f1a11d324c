//! HTTP status API over the pipeline buckets.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
