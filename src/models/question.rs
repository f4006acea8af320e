use serde::{Deserialize, Serialize};

/// Acknowledgement stored as the answer of every newly asked question.
pub const PENDING_ANSWER: &str =
    "Thank you for your question. A healthcare professional will respond within 24 hours.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: String,
}
