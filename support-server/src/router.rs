//! Call interface between the HTTP layer and the core.
//!
//! Each operation returns the JSON body for a successful call or a typed
//! `SupportError`; mapping errors onto status codes is left to the transport.

use chrono::Utc;
use serde_json::json;
use support_core::{classifier, ConversationStore, SupportConfig, SupportError};

pub const DEFAULT_USER_ID: &str = "user_001";

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Classify `message`, persist the exchange, and return the reply body.
pub async fn chat(
    store: &ConversationStore,
    user_id: &str,
    message: &str,
) -> Result<serde_json::Value, SupportError> {
    if message.is_empty() {
        return Err(SupportError::Validation("message field is required".to_string()));
    }

    let topic = classifier::classify_topic(message);
    let response = topic.response();
    tracing::debug!(user_id, ?topic, "Classified chat message");

    if let Err(e) = store.append(user_id, message, response).await {
        tracing::error!(user_id, "Failed to persist conversation: {}", e);
        return Err(e);
    }

    Ok(json!({
        "success": true,
        "response": response,
        "timestamp": now(),
    }))
}

/// Most recent exchanges for `user_id`, newest first.
pub async fn conversations(
    store: &ConversationStore,
    user_id: &str,
    limit: u32,
) -> Result<serde_json::Value, SupportError> {
    let rows = match store.recent(user_id, limit).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(user_id, "Failed to load conversations: {}", e);
            return Err(e);
        }
    };

    Ok(json!({
        "success": true,
        "conversations": rows,
    }))
}

/// Banner returned from `/`. No IO.
pub fn status(config: &SupportConfig) -> serde_json::Value {
    json!({
        "message": format!("🤖 {} is running!", config.service.name),
        "status": "active",
        "timestamp": now(),
    })
}

/// Liveness probe. Does not touch the store.
pub fn health(config: &SupportConfig) -> serde_json::Value {
    json!({
        "status": "healthy",
        "service": config.service.name,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": now(),
    })
}
