//! AI chat relay.
//!
//! Bridges a user's free-text health question to an OpenAI-compatible
//! chat-completion provider. Each request is independent:
//! validate → credential check → canned answer (mock mode) or upstream call.
//!
//! Sub-modules:
//! - `canned`: ordered keyword table and fixed answers for mock mode
//! - `openai`: upstream HTTP client and wire types
//! - `relay`: request orchestration

pub mod canned;
pub mod openai;
pub mod relay;

pub use canned::{canned_answer, select_topic, CannedTopic};
pub use openai::OpenAiClient;
pub use relay::{AnswerSource, ChatAnswer, ChatRelay};

/// Errors from the chat relay. Each maps onto one HTTP failure class.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("question (non-empty string) is required")]
    InvalidQuestion,

    #[error("Server misconfiguration: OPENAI_API_KEY missing")]
    MissingCredential,

    /// The provider answered with a non-success status.
    #[error("OpenAI API error: {message}")]
    Upstream { status: u16, message: String },

    #[error("No answer returned from AI")]
    NoAnswer,

    /// The request never produced a provider response (connect, timeout, TLS).
    #[error("Server error making AI request: {0}")]
    Transport(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
