//! Shared harness for API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`)
//! over an in-memory generation store and a stub payment processor
//! served from an in-process axum server.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use veogen_api::config::{ServerConfig, StoreBackend};
use veogen_api::router::build_app_router;
use veogen_api::state::AppState;
use veogen_core::checkout::PaymentMode;
use veogen_payments::PaymentsClient;
use veogen_store::{GenerationStore, MemoryGenerationStore, StatusCache};

/// A test application plus handles to its shared state, so tests can
/// seed records and inspect the cache directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryGenerationStore>,
    pub cache: Arc<StatusCache>,
}

/// Build a test `ServerConfig` with safe defaults, pointing the
/// payments client at the given stub processor.
pub fn test_config(payments_api_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        generations_dir: "unused".to_string(),
        payment_mode: PaymentMode::Test,
        payments_api_base: payments_api_base.to_string(),
        payments_secret_key: "sk_test_local".to_string(),
    }
}

/// Spawn a stub payment processor and return its base URL.
///
/// `POST /v1/checkout/sessions` succeeds with a fixed session unless
/// the form mentions `price_test_veo3_trio`, which is rejected with
/// the processor-style error envelope (used to exercise the upstream
/// failure path with a locally whitelisted price).
pub async fn spawn_stub_processor() -> String {
    let app = Router::new().route(
        "/v1/checkout/sessions",
        post(|body: String| async move {
            if body.contains("price_test_veo3_trio") {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": {
                            "message": "No such price: price_test_veo3_trio",
                            "type": "invalid_request_error"
                        }
                    })),
                )
            } else {
                (
                    StatusCode::OK,
                    Json(json!({
                        "id": "cs_test_stub_1",
                        "url": "https://pay.example.test/cs_test_stub_1"
                    })),
                )
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Build the full application with the production middleware stack.
pub async fn build_test_app() -> TestApp {
    let payments_base = spawn_stub_processor().await;
    let config = test_config(&payments_base);

    let store = Arc::new(MemoryGenerationStore::new());
    let cache = Arc::new(StatusCache::new());

    let state = AppState {
        config: Arc::new(config.clone()),
        generations: Arc::clone(&store) as Arc<dyn GenerationStore>,
        status_cache: Arc::clone(&cache),
        payments: Arc::new(PaymentsClient::new(
            config.payments_api_base.clone(),
            config.payments_secret_key.clone(),
        )),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        cache,
    }
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
