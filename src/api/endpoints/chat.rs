//! Chat relay endpoint.
//!
//! `POST /api/AIChat`: body `{ "question": string }`, answers
//! `{ "answer": string }` or `{ "error": string }`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// `POST /api/AIChat`: ask the health assistant a question.
///
/// A missing or malformed body, or a non-string `question`, is treated
/// like an empty question.
pub async fn ask(
    State(ctx): State<ApiContext>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let question = match body {
        Ok(Json(req)) => req.question,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable chat request body");
            None
        }
    };

    let answer = ctx
        .relay
        .ask(question.as_deref())
        .await
        .map_err(|e| ApiError::from_chat(e, ctx.config().production))?;

    Ok(Json(ChatResponse {
        answer: answer.answer,
    }))
}
