use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted chat exchange. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationRecord {
    pub id: i64,
    pub user_id: String,
    pub user_message: String,
    pub ai_response: String,
    pub created_at: DateTime<Utc>,
}

/// Projection returned by history queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationSummary {
    pub user_message: String,
    pub ai_response: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<ConversationRecord> for ConversationSummary {
    fn from(r: ConversationRecord) -> Self {
        Self {
            user_message: r.user_message,
            ai_response: r.ai_response,
            created_at: r.created_at,
        }
    }
}
