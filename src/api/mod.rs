//! HealthBot HTTP API.
//!
//! Exposes the in-memory record collections and the AI chat relay as
//! JSON endpoints. Routes are nested under `/api/` behind a layer stack:
//! Catch-panic → CORS → Access log → Rate limit → Handler.
//!
//! The router is composable: `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, start_api_server_on, ApiServer, ApiSession, ServerError};
pub use types::{ApiContext, RateLimiter};
