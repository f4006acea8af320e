//! Medication reminder endpoints.
//!
//! - `GET /api/reminders`: active reminders, newest first
//! - `POST /api/reminders`: set a reminder
//! - `GET /api/reminders/:id`: one reminder
//! - `DELETE /api/reminders/:id`: cancel a reminder

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::{found, MISSING_FIELDS};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{NewReminder, Reminder};

#[derive(Serialize)]
pub struct RemindersResponse {
    pub reminders: Vec<Reminder>,
}

/// `GET /api/reminders`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<RemindersResponse>, ApiError> {
    Ok(Json(RemindersResponse {
        reminders: ctx.core.list_reminders()?,
    }))
}

/// `POST /api/reminders`: `medication` and `time` are required.
pub async fn add(
    State(ctx): State<ApiContext>,
    body: Result<Json<NewReminder>, JsonRejection>,
) -> Result<(StatusCode, Json<Reminder>), ApiError> {
    let Json(new) = body?;
    if new.medication.is_empty() || new.time.is_empty() {
        return Err(ApiError::BadRequest(MISSING_FIELDS.into()));
    }
    let reminder = ctx.core.add_reminder(new)?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// `GET /api/reminders/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>, ApiError> {
    let reminder = found(ctx.core.get_reminder(&id)?, "Reminder", &id)?;
    Ok(Json(reminder))
}

/// `DELETE /api/reminders/:id`: 204 on success, 404 for unknown ids.
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !ctx.core.remove_reminder(&id)? {
        return Err(ApiError::NotFound(format!("Reminder {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
