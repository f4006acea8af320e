//! Emergency request endpoints.
//!
//! Requests are recorded as `pending`. Nothing resolves them.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::found;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Emergency, NewEmergency};

#[derive(Serialize)]
pub struct EmergenciesResponse {
    pub emergencies: Vec<Emergency>,
}

/// `GET /api/emergencies`
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<EmergenciesResponse>, ApiError> {
    Ok(Json(EmergenciesResponse {
        emergencies: ctx.core.list_emergencies()?,
    }))
}

/// `POST /api/emergencies`: file an emergency request.
pub async fn request(
    State(ctx): State<ApiContext>,
    body: Result<Json<NewEmergency>, JsonRejection>,
) -> Result<(StatusCode, Json<Emergency>), ApiError> {
    let Json(new) = body?;
    if new.description.trim().is_empty() {
        return Err(ApiError::BadRequest("Please describe your emergency".into()));
    }
    let emergency = ctx.core.add_emergency(new)?;
    Ok((StatusCode::CREATED, Json(emergency)))
}

/// `GET /api/emergencies/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Emergency>, ApiError> {
    let emergency = found(ctx.core.get_emergency(&id)?, "Emergency", &id)?;
    Ok(Json(emergency))
}
