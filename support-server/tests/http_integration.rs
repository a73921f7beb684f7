//! End-to-end HTTP tests for the support API.
//!
//! Requests are dispatched through the full Axum router with `oneshot` against a
//! real SQLite file in a temporary directory.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use support_core::config::DatabaseConfig;
use support_core::{ConversationStore, SupportConfig, Topic};
use support_server::http::{build_router, HttpState};
use tower::ServiceExt;

async fn make_http_state() -> (tempfile::TempDir, Arc<HttpState>) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SupportConfig::default();
    config.database = DatabaseConfig {
        path: dir.path().join("support.db").to_string_lossy().into_owned(),
        ..DatabaseConfig::default()
    };
    let store = ConversationStore::connect(&config.database).await.unwrap();
    store.initialize().await.unwrap();
    (dir, Arc::new(HttpState { store, config }))
}

async fn send(state: &Arc<HttpState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = build_router(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn post_chat(payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ===========================================================================
// GET / and GET /health
// ===========================================================================
#[tokio::test]
async fn test_root_and_health() {
    let (_dir, state) = make_http_state().await;

    let (status, body) = send(&state, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());

    let (status, body) = send(&state, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "AI Support Agent API");
}

// ===========================================================================
// POST /chat then GET /conversations/:user_id
// ===========================================================================
#[tokio::test]
async fn test_chat_then_history_round_trip() {
    let (_dir, state) = make_http_state().await;

    let (status, body) = send(
        &state,
        post_chat(json!({"message": "I have payment issue", "user_id": "t1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], Topic::Billing.response());
    assert!(body["timestamp"].is_string());

    let (status, body) = send(&state, get("/conversations/t1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let newest = &body["conversations"][0];
    assert_eq!(newest["user_message"], "I have payment issue");
    assert_eq!(newest["ai_response"], Topic::Billing.response());
    assert!(newest["timestamp"].is_string());
}

#[tokio::test]
async fn test_chat_defaults_user_id() {
    let (_dir, state) = make_http_state().await;

    let (status, _) = send(&state, post_chat(json!({"message": "Can't login"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, get("/conversations/user_001")).await;
    assert_eq!(body["conversations"][0]["ai_response"], Topic::Login.response());
}

#[tokio::test]
async fn test_history_defaults_to_ten_newest_first() {
    let (_dir, state) = make_http_state().await;
    for i in 0..12 {
        let (status, _) = send(
            &state,
            post_chat(json!({"message": format!("question {}", i), "user_id": "many"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&state, get("/conversations/many")).await;
    let rows = body["conversations"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["user_message"], "question 11");
    assert_eq!(rows[9]["user_message"], "question 2");

    let (_, body) = send(&state, get("/conversations/many?limit=2")).await;
    assert_eq!(body["conversations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_history_unknown_user_is_empty() {
    let (_dir, state) = make_http_state().await;
    let (status, body) = send(&state, get("/conversations/unknown_user")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversations"], json!([]));
}

// ===========================================================================
// Validation and persistence failures
// ===========================================================================
#[tokio::test]
async fn test_chat_missing_message_is_rejected() {
    let (_dir, state) = make_http_state().await;

    let (status, body) = send(&state, post_chat(json!({"user_id": "t2"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (_, body) = send(&state, get("/conversations/t2")).await;
    assert_eq!(body["conversations"], json!([]));
}

#[tokio::test]
async fn test_chat_malformed_body_is_rejected_before_core() {
    let (_dir, state) = make_http_state().await;

    let (status, _) = send(&state, post_chat(json!({"message": 42, "user_id": "t3"}))).await;
    assert!(status.is_client_error(), "got {}", status);

    let (_, body) = send(&state, get("/conversations/t3")).await;
    assert_eq!(body["conversations"], json!([]));
}

#[tokio::test]
async fn test_persistence_failure_is_500() {
    let (_dir, state) = make_http_state().await;
    state.store.close().await;

    let (status, body) = send(
        &state,
        post_chat(json!({"message": "reset my password", "user_id": "t4"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "persistence");
    assert!(body["error"].is_string());

    let (status, body) = send(&state, get("/conversations/t4")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "persistence");
}
