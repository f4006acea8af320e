//! Question endpoints.
//!
//! Questions submitted here are stored for a professional to answer
//! later; live AI answers go through `POST /api/AIChat` instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::found;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{NewQuestion, Question};

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

/// `GET /api/questions`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<QuestionsResponse>, ApiError> {
    Ok(Json(QuestionsResponse {
        questions: ctx.core.list_questions()?,
    }))
}

/// `POST /api/questions`
pub async fn add(
    State(ctx): State<ApiContext>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let Json(new) = body?;
    if new.question.trim().is_empty() {
        return Err(ApiError::BadRequest("Please enter your question".into()));
    }
    let question = ctx.core.add_question(new)?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// `GET /api/questions/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Question>, ApiError> {
    let question = found(ctx.core.get_question(&id)?, "Question", &id)?;
    Ok(Json(question))
}
