//! Integration tests for checkout session creation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

fn checkout_body() -> serde_json::Value {
    json!({
        "price_id": "price_test_veo3_duo",
        "prompt": "a cat on a skateboard",
        "video_count": 2,
        "success_url": "https://example.com/success",
        "cancel_url": "https://example.com/cancel"
    })
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn checkout_returns_session_and_generation_ids() {
    let app = common::build_test_app().await;
    let response = post_json(app.router.clone(), "/api/v1/checkout", checkout_body()).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["session_id"], "cs_test_stub_1");
    assert_eq!(data["url"], "https://pay.example.test/cs_test_stub_1");

    let generation_id = data["generation_id"].as_str().unwrap();
    assert!(
        generation_id.starts_with("veo3_"),
        "generation_id should be veo3_-prefixed, got {generation_id}"
    );
}

#[tokio::test]
async fn checkout_seeds_a_pending_record_readable_by_generation_id() {
    let app = common::build_test_app().await;
    let response = post_json(app.router.clone(), "/api/v1/checkout", checkout_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let generation_id = body_json(response).await["data"]["generation_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(app.router.clone(), &format!("/api/v1/status/{generation_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "pending");
    assert_eq!(data["progress"], 0);
    assert_eq!(data["source"], "record");

    let videos = data["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    for video in videos {
        assert_eq!(video["status"], "pending");
    }
}

#[tokio::test]
async fn checkout_record_is_reachable_by_session_id() {
    let app = common::build_test_app().await;
    let response = post_json(app.router.clone(), "/api/v1/checkout", checkout_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // No webhook has fired; resolution must fall back to the record.
    let response = get(app.router.clone(), "/api/v1/status/cs_test_stub_1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["source"], "record");
    assert_eq!(json["data"]["status"], "pending");
    assert!(json["data"]["generation_id"].as_str().unwrap().starts_with("veo3_"));
}

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn checkout_rejects_unknown_price() {
    let app = common::build_test_app().await;
    let mut body = checkout_body();
    body["price_id"] = json!("price_test_not_in_whitelist");

    let response = post_json(app.router, "/api/v1/checkout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn checkout_rejects_empty_prompt() {
    let app = common::build_test_app().await;
    let mut body = checkout_body();
    body["prompt"] = json!("   ");

    let response = post_json(app.router, "/api/v1/checkout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_rejects_out_of_range_video_count() {
    let app = common::build_test_app().await;

    for count in [0, 4] {
        let mut body = checkout_body();
        body["video_count"] = json!(count);

        let response = post_json(app.router.clone(), "/api/v1/checkout", body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "video_count {count} should be rejected"
        );
    }
}

#[tokio::test]
async fn rejected_checkout_seeds_no_record() {
    let app = common::build_test_app().await;
    let mut body = checkout_body();
    body["video_count"] = json!(0);

    let response = post_json(app.router, "/api/v1/checkout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    use veogen_store::GenerationStore;
    assert!(app
        .store
        .find_by_session("cs_test_stub_1")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Upstream processor failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn processor_rejection_surfaces_as_upstream_error() {
    let app = common::build_test_app().await;
    let mut body = checkout_body();
    // Whitelisted locally, rejected by the stub processor.
    body["price_id"] = json!("price_test_veo3_trio");
    body["video_count"] = json!(3);

    let response = post_json(app.router, "/api/v1/checkout", body).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "No such price: price_test_veo3_trio");
}
