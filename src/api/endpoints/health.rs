//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::CollectionCounts;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub mock_responses: bool,
    pub ai_configured: bool,
    pub records: CollectionCounts,
}

/// `GET /api/health`: liveness plus a summary of the in-memory state.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let config = ctx.config();
    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        mock_responses: config.mock_responses,
        ai_configured: config.has_api_key(),
        records: ctx.core.counts()?,
    }))
}
