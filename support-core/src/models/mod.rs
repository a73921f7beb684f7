pub mod conversation;
pub mod knowledge;

pub use conversation::{ConversationRecord, ConversationSummary};
pub use knowledge::{KnowledgeEntry, SEED_ENTRIES};
