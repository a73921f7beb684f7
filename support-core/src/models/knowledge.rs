use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// Canonical (question, answer, category) rows seeded on every start.
/// Not consulted by the classifier.
pub const SEED_ENTRIES: [(&str, &str, &str); 4] = [
    (
        "password reset",
        "You can reset your password by clicking 'Forgot Password' on login page.",
        "account",
    ),
    (
        "payment issue",
        "For payment issues, please check your payment method or contact billing support.",
        "billing",
    ),
    (
        "login problem",
        "Try clearing your browser cache and cookies or use incognito mode.",
        "technical",
    ),
    (
        "order tracking",
        "You can track your order using tracking number from your email.",
        "orders",
    ),
];
