//! API error types with structured JSON responses.
//!
//! Every failure leaves the server as `{ "error": "<message>" }` with a
//! matching status code.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::chat::ChatError;
use crate::core_state::CoreError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: u64 },
    #[error("Server misconfiguration: {0}")]
    Misconfigured(String),
    /// Upstream provider failure, relayed with the provider's status.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
    #[error("No answer returned from AI")]
    NoAnswer,
    /// The upstream request failed before a response arrived.
    /// `detail` is `None` when details must not reach the client.
    #[error("Server error making AI request")]
    Transport { detail: Option<String> },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Translate a relay failure. `production` hides transport details.
    pub fn from_chat(err: ChatError, production: bool) -> Self {
        match err {
            ChatError::InvalidQuestion => {
                ApiError::BadRequest(ChatError::InvalidQuestion.to_string())
            }
            ChatError::MissingCredential => {
                ApiError::Misconfigured("OPENAI_API_KEY missing".into())
            }
            ChatError::Upstream { status, message } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            },
            ChatError::NoAnswer => ApiError::NoAnswer,
            ChatError::Transport(detail) => {
                tracing::error!(error = %detail, "AI fetch failed");
                ApiError::Transport {
                    detail: (!production).then_some(detail),
                }
            }
            ChatError::HttpClient(detail) => ApiError::Internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::MethodNotAllowed(detail) => {
                (StatusCode::METHOD_NOT_ALLOWED, detail.clone())
            }
            ApiError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later.".to_string(),
            ),
            ApiError::Misconfigured(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server misconfiguration: {detail}"),
            ),
            ApiError::Upstream { status, message } => {
                // Only error statuses are relayed; anything else becomes a gateway error.
                let status = if status.is_client_error() || status.is_server_error() {
                    *status
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, format!("OpenAI API error: {message}"))
            }
            ApiError::NoAnswer => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No answer returned from AI".to_string(),
            ),
            ApiError::Transport { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                match detail {
                    Some(detail) => format!("Server error making AI request: {detail}"),
                    None => "Server error making AI request".to_string(),
                },
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let mut response = (status, Json(ErrorBody { error: message })).into_response();
        // Add retry-after header for rate limited responses
        if let ApiError::RateLimited { retry_after } = &self {
            if let Ok(val) = axum::http::HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert("Retry-After", val);
            }
        }
        response
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LockPoisoned => ApiError::Internal("state lock poisoned".into()),
        }
    }
}

/// Unreadable or mistyped request bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
