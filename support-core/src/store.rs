//! Conversation store.
//!
//! Append-only log of chat exchanges plus the seeded knowledge-base table, both
//! in one SQLite file. The store owns its connection pool; every operation
//! borrows a connection for its own duration only.

use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::db;
use crate::error::SupportError;
use crate::models::{ConversationRecord, ConversationSummary, KnowledgeEntry, SEED_ENTRIES};

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS conversations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        user_message TEXT NOT NULL,
        ai_response TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS knowledge_base (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question TEXT NOT NULL UNIQUE,
        answer TEXT NOT NULL,
        category TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_conversations_user_recent
        ON conversations (user_id, created_at DESC, id DESC)
    "#,
];

#[derive(Debug, Clone)]
pub struct ConversationStore {
    pool: SqlitePool,
}

impl ConversationStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, SupportError> {
        let pool = db::create_pool(config).await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create both tables and seed the knowledge base. Idempotent; never drops
    /// or rewrites existing rows. Runs in a single transaction so a failure
    /// leaves the file as it was.
    pub async fn initialize(&self) -> Result<(), SupportError> {
        self.initialize_inner()
            .await
            .map_err(|e| SupportError::Initialization(e.to_string()))?;
        tracing::info!("Conversation store initialized");
        Ok(())
    }

    async fn initialize_inner(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        // Insert-if-absent by question. Written without relying on the UNIQUE
        // constraint so files created by older schemas seed correctly too.
        for (question, answer, category) in SEED_ENTRIES {
            sqlx::query(
                r#"
                INSERT INTO knowledge_base (question, answer, category)
                SELECT ?, ?, ?
                WHERE NOT EXISTS (SELECT 1 FROM knowledge_base WHERE question = ?)
                "#,
            )
            .bind(question)
            .bind(answer)
            .bind(category)
            .bind(question)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Persist one exchange and return the stored row with its assigned id and
    /// timestamp.
    ///
    /// The timestamp is taken by SQLite inside the INSERT while it holds the
    /// write lock, so `created_at` never decreases in id order. The format is
    /// fixed-width UTC text, making lexical order chronological.
    pub async fn append(
        &self,
        user_id: &str,
        user_message: &str,
        ai_response: &str,
    ) -> Result<ConversationRecord, SupportError> {
        if user_message.is_empty() {
            return Err(SupportError::Validation("user_message must not be empty".into()));
        }
        if ai_response.is_empty() {
            return Err(SupportError::Validation("ai_response must not be empty".into()));
        }

        let record = sqlx::query_as::<_, ConversationRecord>(
            r#"
            INSERT INTO conversations (user_id, user_message, ai_response, created_at)
            VALUES (?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            RETURNING id, user_id, user_message, ai_response, created_at
            "#,
        )
        .bind(user_id)
        .bind(user_message)
        .bind(ai_response)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = record.id, user_id, "Conversation appended");
        Ok(record)
    }

    /// Up to `limit` exchanges for `user_id`, newest first. Timestamp ties are
    /// broken by descending id. Unknown users yield an empty list.
    pub async fn recent(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ConversationSummary>, SupportError> {
        let rows = sqlx::query_as::<_, ConversationSummary>(
            r#"
            SELECT user_message, ai_response, created_at
            FROM conversations
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn knowledge_entries(&self) -> Result<Vec<KnowledgeEntry>, SupportError> {
        let rows = sqlx::query_as::<_, KnowledgeEntry>(
            "SELECT id, question, answer, category FROM knowledge_base ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn health_check(&self) -> Result<String, SupportError> {
        Ok(db::health_check(&self.pool).await?)
    }

    /// Close the pool. Later operations fail with a persistence error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
