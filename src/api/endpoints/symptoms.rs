//! Symptom endpoints.
//!
//! - `GET /api/symptoms`: all reported symptoms, newest first
//! - `POST /api/symptoms`: report a symptom
//! - `GET /api/symptoms/:id`: one symptom

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::{found, MISSING_FIELDS};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{NewSymptom, Symptom};

#[derive(Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<Symptom>,
}

/// `GET /api/symptoms`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<SymptomsResponse>, ApiError> {
    Ok(Json(SymptomsResponse {
        symptoms: ctx.core.list_symptoms()?,
    }))
}

/// `POST /api/symptoms`: both `symptom` and `duration` are required.
pub async fn add(
    State(ctx): State<ApiContext>,
    body: Result<Json<NewSymptom>, JsonRejection>,
) -> Result<(StatusCode, Json<Symptom>), ApiError> {
    let Json(new) = body?;
    if new.symptom.is_empty() || new.duration.is_empty() {
        return Err(ApiError::BadRequest(MISSING_FIELDS.into()));
    }
    let symptom = ctx.core.add_symptom(new)?;
    Ok((StatusCode::CREATED, Json(symptom)))
}

/// `GET /api/symptoms/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Symptom>, ApiError> {
    let symptom = found(ctx.core.get_symptom(&id)?, "Symptom", &id)?;
    Ok(Json(symptom))
}
