//! API endpoint handlers.
//!
//! One module per record collection plus the chat relay. Handlers do
//! the same field checks as the entry forms, then call `CoreState`.

pub mod appointments;
pub mod chat;
pub mod emergencies;
pub mod health;
pub mod medications;
pub mod questions;
pub mod reminders;
pub mod symptoms;

use axum::extract::OriginalUri;
use axum::http::{Method, Uri};

use crate::api::error::ApiError;

/// Message used when a form-style submission is missing fields.
pub(crate) const MISSING_FIELDS: &str = "Please fill in all fields";

/// Fallback for unknown routes so clients always get JSON.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method {method} not allowed on {}", uri.path()))
}

/// Look up a record by id or fail with 404.
pub(crate) fn found<T>(record: Option<T>, what: &str, id: &str) -> Result<T, ApiError> {
    record.ok_or_else(|| ApiError::NotFound(format!("{what} {id} not found")))
}
