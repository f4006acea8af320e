//! HealthBot API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layer stack (outermost → innermost):
//! 1. Catch-panic → 2. CORS → 3. Extension(ApiContext) → 4. Access log → 5. Rate limiter

use std::any::Any;

use axum::http::{header, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected outside the
/// middleware it serves). Endpoint handlers use `State<ApiContext>`.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/AIChat", post(endpoints::chat::ask))
        .route(
            "/symptoms",
            get(endpoints::symptoms::list).post(endpoints::symptoms::add),
        )
        .route("/symptoms/:id", get(endpoints::symptoms::detail))
        .route(
            "/reminders",
            get(endpoints::reminders::list).post(endpoints::reminders::add),
        )
        .route(
            "/reminders/:id",
            get(endpoints::reminders::detail).delete(endpoints::reminders::cancel),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::add),
        )
        .route("/appointments/:id", get(endpoints::appointments::detail))
        .route(
            "/questions",
            get(endpoints::questions::list).post(endpoints::questions::add),
        )
        .route("/questions/:id", get(endpoints::questions::detail))
        .route(
            "/medications",
            get(endpoints::medications::list).post(endpoints::medications::confirm),
        )
        .route("/medications/:id", get(endpoints::medications::detail))
        .route(
            "/emergencies",
            get(endpoints::emergencies::list).post(endpoints::emergencies::request),
        )
        .route("/emergencies/:id", get(endpoints::emergencies::detail))
        .method_not_allowed_fallback(endpoints::method_not_allowed)
        .with_state(ctx.clone());

    let app = Router::new()
        .nest("/api", routes)
        .fallback(endpoints::not_found);

    with_layers(app, ctx)
}

/// Wrap `router` in the full layer stack.
///
/// Layers are applied from innermost to outermost. Extension must sit
/// outside the middleware so they can extract `ApiContext`.
pub(crate) fn with_layers(router: Router, ctx: ApiContext) -> Router {
    let cors = cors_layer(&ctx.config().allowed_origin);
    router
        .layer(axum::middleware::from_fn(middleware::rate::limit))
        .layer(axum::middleware::from_fn(middleware::access_log::log_access))
        .layer(axum::Extension(ctx))
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
}

/// Browser access is limited to the single configured origin. Other
/// origins get no `access-control-allow-origin` header at all.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(AllowOrigin::list([origin])),
        Err(_) => {
            tracing::warn!(origin, "ALLOWED_ORIGIN is not a valid header value; cross-origin requests disabled");
            layer
        }
    }
}

/// A panicking handler still answers with the JSON error envelope.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
