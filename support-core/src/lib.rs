pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use classifier::{classify, classify_topic, Topic};
pub use config::SupportConfig;
pub use error::SupportError;
pub use models::{ConversationRecord, ConversationSummary, KnowledgeEntry};
pub use store::{ConversationStore, DEFAULT_HISTORY_LIMIT};
