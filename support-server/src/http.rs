//! Support desk HTTP API
//!
//! Axum-based HTTP server exposing chat and conversation history. Each endpoint
//! has a thin axum handler that delegates to an inner function returning
//! `(StatusCode, json_body)`; the inner functions are tested directly.
//!
//! Endpoints:
//! - GET  /                         : service banner
//! - GET  /health                   : liveness probe
//! - POST /chat                     : classify a message and record the exchange
//! - GET  /conversations/:user_id   : recent exchanges for one user

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use support_core::{ConversationStore, SupportConfig, SupportError};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::router;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub store: ConversationStore,
    pub config: SupportConfig,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/conversations/:user_id", get(conversations_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    store: ConversationStore,
    config: SupportConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState { store, config });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Support API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request DTOs
// ============================================================================

fn default_user_id() -> String {
    router::DEFAULT_USER_ID.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

// ============================================================================
// Inner (directly testable) functions
// ============================================================================

/// Map a core error onto an HTTP status and error body.
pub fn error_response(err: &SupportError) -> (StatusCode, serde_json::Value) {
    let status = match err {
        SupportError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "kind": err.kind(),
        }),
    )
}

pub fn root_inner(config: &SupportConfig) -> (StatusCode, serde_json::Value) {
    (StatusCode::OK, router::status(config))
}

pub fn health_inner(config: &SupportConfig) -> (StatusCode, serde_json::Value) {
    (StatusCode::OK, router::health(config))
}

pub async fn chat_inner(
    store: &ConversationStore,
    req: ChatRequest,
) -> (StatusCode, serde_json::Value) {
    let message = req.message.unwrap_or_default();
    match router::chat(store, &req.user_id, &message).await {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => error_response(&e),
    }
}

pub async fn conversations_inner(
    store: &ConversationStore,
    config: &SupportConfig,
    user_id: &str,
    query: HistoryQuery,
) -> (StatusCode, serde_json::Value) {
    let limit = config.history.effective_limit(query.limit);
    match router::conversations(store, user_id, limit).await {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => error_response(&e),
    }
}

// ============================================================================
// Axum handler wrappers
// ============================================================================

pub async fn root_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = root_inner(&state.config);
    (status, Json(body))
}

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(&state.config);
    (status, Json(body))
}

pub async fn chat_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let (status, body) = chat_inner(&state.store, req).await;
    (status, Json(body))
}

pub async fn conversations_handler(
    State(state): State<Arc<HttpState>>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let (status, body) = conversations_inner(&state.store, &state.config, &user_id, query).await;
    (status, Json(body))
}
