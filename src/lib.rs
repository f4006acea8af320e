pub mod api; // HTTP surface: records + AI chat relay
pub mod chat; // Question relay, canned answers, upstream client
pub mod config;
pub mod core_state; // In-memory record collections
pub mod models;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use api::{ApiContext, ServerError};
use config::RelayConfig;
use core_state::CoreState;

/// Run the HealthBot server until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = Arc::new(RelayConfig::from_env()?);
    tracing::debug!(?config, "Configuration loaded");
    if !config.has_api_key() {
        tracing::warn!("OPENAI_API_KEY is not set; chat requests will fail with a misconfiguration error");
    }

    let ctx = ApiContext::new(Arc::new(CoreState::new()), config)?;
    let mut server = api::start_api_server(ctx).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        addr = %server.session.server_addr,
        "{} listening",
        config::APP_NAME
    );

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Ctrl-C received, shutting down"),
        Err(e) => tracing::error!("Failed to listen for Ctrl-C: {e}"),
    }

    server.shutdown();
    server.stopped().await;
    Ok(())
}
