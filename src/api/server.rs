//! API server lifecycle: starts and stops the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.
//! The server records peer addresses so the rate limiter can key on them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::api::types::ApiContext;
use crate::chat::ChatError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to build chat relay: {0}")]
    Relay(#[from] ChatError),
    #[error("Failed to bind API server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(std::io::Error),
}

/// Session metadata for a running API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub session: ApiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!(session_id = %self.session.session_id, "API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish, after `shutdown` or on its own.
    pub async fn stopped(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("API server task failed: {e}");
            }
        }
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start the API server on all interfaces at the configured port.
pub async fn start_api_server(ctx: ApiContext) -> Result<ApiServer, ServerError> {
    let port = ctx.config().port;
    start_api_server_on(ctx, IpAddr::V4(Ipv4Addr::UNSPECIFIED), port).await
}

/// Start the API server on a specific address. Port `0` picks an
/// ephemeral port (tests).
pub async fn start_api_server_on(
    ctx: ApiContext,
    ip: IpAddr,
    port: u16,
) -> Result<ApiServer, ServerError> {
    let requested = SocketAddr::new(ip, port);
    let listener = tokio::net::TcpListener::bind(requested)
        .await
        .map_err(|source| ServerError::Bind {
            addr: requested,
            source,
        })?;

    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let config = ctx.config();
    tracing::info!(
        %addr,
        mock_responses = config.mock_responses,
        ai_configured = config.has_api_key(),
        allowed_origin = %config.allowed_origin,
        "API server binding"
    );

    let app = api_router(ctx);

    let session = ApiSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use zeroize::Zeroizing;

    use crate::config::RelayConfig;
    use crate::core_state::CoreState;

    fn test_ctx(config: RelayConfig) -> ApiContext {
        ApiContext::new(Arc::new(CoreState::new()), Arc::new(config)).unwrap()
    }

    async fn start_local(config: RelayConfig) -> ApiServer {
        start_api_server_on(test_ctx(config), IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
            .await
            .expect("server should start")
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_local(RelayConfig::default()).await;

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);
        assert!(server.session.server_addr.contains(':'));
        assert!(!server.session.started_at.is_empty());

        let url = format!("http://127.0.0.1:{}/api/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        tokio::time::timeout(Duration::from_secs(5), server.stopped())
            .await
            .expect("server should stop after shutdown");
    }

    #[tokio::test]
    async fn server_serves_chat_over_http() {
        let mut server = start_local(RelayConfig {
            api_key: Some(Zeroizing::new("sk-test".to_string())),
            mock_responses: true,
            ..RelayConfig::default()
        })
        .await;
        let port = server.session.port;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/AIChat"))
            .json(&serde_json::json!({"question": "I keep getting headaches"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["answer"], crate::chat::CannedTopic::Headache.template());

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn rate_limit_keys_on_peer_address() {
        let mut server = start_local(RelayConfig {
            rate_max_requests: 1,
            ..RelayConfig::default()
        })
        .await;
        let url = format!("http://127.0.0.1:{}/api/health", server.session.port);

        assert_eq!(reqwest::get(&url).await.unwrap().status(), reqwest::StatusCode::OK);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("retry-after"));

        server.shutdown();
    }

    #[tokio::test]
    async fn port_in_use_is_bind_error() {
        let mut first = start_local(RelayConfig::default()).await;
        let err = start_api_server_on(
            test_ctx(RelayConfig::default()),
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            first.session.port,
        )
        .await
        .err()
        .expect("second bind should fail");
        assert!(matches!(err, ServerError::Bind { .. }));

        first.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_local(RelayConfig::default()).await;
        server.shutdown();
        server.shutdown();
    }
}
