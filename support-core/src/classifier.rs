//! Rule-based message classifier.
//!
//! Rules are evaluated in order against a lowercase copy of the message and the
//! first rule with a matching keyword wins. Matching is plain substring
//! containment, so "outlogin" still hits the login rule.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    PasswordReset,
    Billing,
    Login,
    OrderTracking,
    Fallback,
}

impl Topic {
    /// Canned reply sent back for this topic.
    pub fn response(self) -> &'static str {
        match self {
            Topic::PasswordReset => {
                "I can help with password reset. Click 'Forgot Password' on login page or contact support."
            }
            Topic::Billing => {
                "For billing issues, please check payment method or contact: billing@company.com"
            }
            Topic::Login => {
                "Try clearing browser cache, using incognito mode, or resetting password."
            }
            Topic::OrderTracking => {
                "You can track your order in 'Order History' section with your tracking number."
            }
            Topic::Fallback => {
                "Thank you for your message. How can I assist you today? Please provide more details."
            }
        }
    }
}

/// Ordered rule table. Order matters: "password and order issue" must resolve to
/// the password rule.
const RULES: &[(&[&str], Topic)] = &[
    (&["password"], Topic::PasswordReset),
    (&["payment", "billing"], Topic::Billing),
    (&["login"], Topic::Login),
    (&["order", "tracking"], Topic::OrderTracking),
];

pub fn classify_topic(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, topic)| *topic)
        .unwrap_or(Topic::Fallback)
}

/// Map any message, including the empty string, to a canned response.
pub fn classify(message: &str) -> &'static str {
    classify_topic(message).response()
}
