use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

/// Application-level constants
pub const APP_NAME: &str = "HealthBot";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listening port. Kept off 8080, where the web client dev server runs.
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Fixed-window rate limit: 30 requests per client address per minute.
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;
pub const DEFAULT_RATE_MAX_REQUESTS: u32 = 30;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,healthbot=debug"
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Runtime configuration for the relay server.
///
/// Built once at startup from environment variables and shared read-only
/// with every request handler.
#[derive(Clone)]
pub struct RelayConfig {
    /// Upstream provider credential. `None` makes every chat request fail
    /// with a misconfiguration error.
    pub api_key: Option<Zeroizing<String>>,
    pub port: u16,
    pub allowed_origin: String,
    /// Answer chat questions from the canned table instead of the provider.
    pub mock_responses: bool,
    pub rate_window: Duration,
    pub rate_max_requests: u32,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    /// Production deployments hide transport error details from clients.
    pub production: bool,
}

impl RelayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => parse_number::<u16>("PORT", &v)?,
            None => DEFAULT_PORT,
        };
        let rate_window_secs = match get("RATE_LIMIT_WINDOW_SECS") {
            Some(v) => non_zero("RATE_LIMIT_WINDOW_SECS", parse_number::<u64>("RATE_LIMIT_WINDOW_SECS", &v)?)?,
            None => DEFAULT_RATE_WINDOW_SECS,
        };
        let rate_max_requests = match get("RATE_LIMIT_MAX_REQUESTS") {
            Some(v) => non_zero("RATE_LIMIT_MAX_REQUESTS", parse_number::<u32>("RATE_LIMIT_MAX_REQUESTS", &v)?)?,
            None => DEFAULT_RATE_MAX_REQUESTS,
        };
        let upstream_timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => non_zero("UPSTREAM_TIMEOUT_SECS", parse_number::<u64>("UPSTREAM_TIMEOUT_SECS", &v)?)?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: get("OPENAI_API_KEY").map(Zeroizing::new),
            port,
            allowed_origin: get("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            // Only the exact string "true" enables mock mode.
            mock_responses: lookup("USE_MOCK_RESPONSE").as_deref() == Some("true"),
            rate_window: Duration::from_secs(rate_window_secs),
            rate_max_requests,
            upstream_url: get("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            production: lookup("HEALTHBOT_ENV").as_deref() == Some("production"),
        })
    }

    /// Whether an upstream credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            port: DEFAULT_PORT,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            mock_responses: false,
            rate_window: Duration::from_secs(DEFAULT_RATE_WINDOW_SECS),
            rate_max_requests: DEFAULT_RATE_MAX_REQUESTS,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            production: false,
        }
    }
}

// The credential never appears in logs.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .field("allowed_origin", &self.allowed_origin)
            .field("mock_responses", &self.mock_responses)
            .field("rate_window", &self.rate_window)
            .field("rate_max_requests", &self.rate_max_requests)
            .field("upstream_url", &self.upstream_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("production", &self.production)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn non_zero<T: PartialEq + Default>(var: &'static str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Zero { var });
    }
    Ok(value)
}
