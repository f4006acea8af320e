//! Medication intake log endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::found;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{MedicationLog, NewMedicationLog};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationLogsResponse {
    pub medication_logs: Vec<MedicationLog>,
}

/// `GET /api/medications`
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<MedicationLogsResponse>, ApiError> {
    Ok(Json(MedicationLogsResponse {
        medication_logs: ctx.core.list_medication_logs()?,
    }))
}

/// `POST /api/medications`: confirm a medication was taken.
pub async fn confirm(
    State(ctx): State<ApiContext>,
    body: Result<Json<NewMedicationLog>, JsonRejection>,
) -> Result<(StatusCode, Json<MedicationLog>), ApiError> {
    let Json(new) = body?;
    if new.medication.trim().is_empty() {
        return Err(ApiError::BadRequest("Please enter medication name".into()));
    }
    let log = ctx.core.add_medication_log(new)?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// `GET /api/medications/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<MedicationLog>, ApiError> {
    let log = found(ctx.core.get_medication_log(&id)?, "Medication log", &id)?;
    Ok(Json(log))
}
