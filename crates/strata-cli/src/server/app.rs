//! Axum application setup.

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/raw", get(handlers::list_raw))
        .route("/staging", get(handlers::list_staging))
        .route("/curated", get(handlers::list_curated))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use strata::{Buckets, LocalStore, MemoryStore, ObjectInfo, ObjectStore};
    use tower::ServiceExt;

    use super::*;

    fn seeded_store() -> Arc<MemoryStore> {
        let store = MemoryStore::with_buckets(&["raw", "staging", "curated"]);
        store.put("raw", "dataset.csv", b"cod_hex,cout_tot\nA,1\n").unwrap();
        store.put("staging", "train.csv", b"a\n1\n").unwrap();
        store.put("staging", "dev.csv", b"a\n").unwrap();
        Arc::new(store)
    }

    /// Store that panics on every call, standing in for a wedged backend.
    struct PanickingStore;

    impl ObjectStore for PanickingStore {
        fn get(&self, _bucket: &str, _key: &str) -> strata::Result<Vec<u8>> {
            panic!("store unavailable")
        }

        fn put(&self, _bucket: &str, _key: &str, _body: &[u8]) -> strata::Result<()> {
            panic!("store unavailable")
        }

        fn list(&self, _bucket: &str) -> strata::Result<Vec<ObjectInfo>> {
            panic!("store unavailable")
        }

        fn bucket_exists(&self, _bucket: &str) -> bool {
            panic!("store unavailable")
        }
    }

    async fn get_json(store: Arc<dyn ObjectStore>, uri: &str) -> (StatusCode, Value) {
        let app = create_router(AppState::new(store, Buckets::default()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_welcome() {
        let (status, body) = get_json(seeded_store(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().starts_with("Welcome"));
    }

    #[tokio::test]
    async fn test_list_staging_keys() {
        let (status, body) = get_json(seeded_store(), "/staging").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"staging_data": ["dev.csv", "train.csv"]}));
    }

    #[tokio::test]
    async fn test_empty_bucket_is_not_found() {
        let (status, body) = get_json(seeded_store(), "/curated").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No curated data found.");
    }

    #[tokio::test]
    async fn test_missing_bucket_is_server_error() {
        let store = Arc::new(MemoryStore::with_buckets(&["staging"]));
        let (status, body) = get_json(store, "/raw").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "storage_error");
    }

    #[tokio::test]
    async fn test_health_reports_each_bucket() {
        let (_, body) = get_json(seeded_store(), "/health").await;
        assert_eq!(
            body,
            json!({
                "status": "healthy",
                "buckets": {"raw": "up", "staging": "up", "curated": "up"}
            })
        );

        let dir = tempfile::TempDir::new().unwrap();
        let local = LocalStore::new(dir.path());
        local.create_bucket("raw").unwrap();
        let (status, body) = get_json(Arc::new(local), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["buckets"]["raw"], "up");
        assert_eq!(body["buckets"]["curated"], "down");
    }

    #[tokio::test]
    async fn test_stats() {
        let (status, body) = get_json(seeded_store(), "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["raw_bucket"], json!({"object_count": 1, "size": 21}));
        assert_eq!(body["staging_bucket"], json!({"object_count": 2, "size": 6}));
        assert_eq!(body["curated_bucket"], json!({"object_count": 0, "size": 0}));
    }

    #[tokio::test]
    async fn test_store_calls_run_off_the_runtime() {
        // The panic is confined to the blocking task and surfaces as a 500.
        for uri in ["/raw", "/health", "/stats"] {
            let (status, body) = get_json(Arc::new(PanickingStore), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert_eq!(body["error"], "internal_error");
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_listing_on_single_threaded_runtime() {
        let dir = tempfile::TempDir::new().unwrap();
        let local = LocalStore::new(dir.path());
        local.put("raw", "dataset.csv", b"a\n").unwrap();
        let (status, body) = get_json(Arc::new(local), "/raw").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"raw_data": ["dataset.csv"]}));
    }
}
