//! Appointment endpoints.
//!
//! - `GET /api/appointments`: booked appointments, newest first
//! - `POST /api/appointments`: book an appointment
//! - `GET /api/appointments/:id`: one appointment

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{found, MISSING_FIELDS};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Appointment, AppointmentType, NewAppointment};

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

#[derive(Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, rename = "type")]
    pub appointment_type: String,
}

impl BookAppointmentRequest {
    fn validate(self) -> Result<NewAppointment, ApiError> {
        if self.date.is_empty() || self.time.is_empty() || self.appointment_type.is_empty() {
            return Err(ApiError::BadRequest(MISSING_FIELDS.into()));
        }
        let appointment_type = AppointmentType::from_str(&self.appointment_type).map_err(|_| {
            let allowed: Vec<&str> = AppointmentType::ALL.iter().map(|t| t.as_str()).collect();
            ApiError::BadRequest(format!(
                "Unknown appointment type {:?} (expected one of: {})",
                self.appointment_type,
                allowed.join(", ")
            ))
        })?;
        Ok(NewAppointment {
            date: self.date,
            time: self.time,
            appointment_type,
        })
    }
}

/// `GET /api/appointments`
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    Ok(Json(AppointmentsResponse {
        appointments: ctx.core.list_appointments()?,
    }))
}

/// `POST /api/appointments`: `date`, `time` and `type` are required.
pub async fn add(
    State(ctx): State<ApiContext>,
    body: Result<Json<BookAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let Json(req) = body?;
    let new = req.validate()?;
    let appointment = ctx.core.add_appointment(new)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /api/appointments/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = found(ctx.core.get_appointment(&id)?, "Appointment", &id)?;
    Ok(Json(appointment))
}
