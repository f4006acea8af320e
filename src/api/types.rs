//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::chat::{ChatError, ChatRelay};
use crate::config::RelayConfig;
use crate::core_state::CoreState;

/// Rate-limit windows tracked before stale entries are swept.
const RATE_SWEEP_THRESHOLD: usize = 1000;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
/// Wraps `CoreState` plus the chat relay and the rate limiter.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub relay: Arc<ChatRelay>,
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>, config: Arc<RelayConfig>) -> Result<Self, ChatError> {
        let rate_limiter = RateLimiter::new(config.rate_window, config.rate_max_requests);
        let relay = ChatRelay::new(config)?;
        Ok(Self {
            core,
            relay: Arc::new(relay),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }

    pub fn config(&self) -> &RelayConfig {
        self.relay.config()
    }
}

// ═══════════════════════════════════════════════════════════
// Rate limiter: per-client fixed window
// ═══════════════════════════════════════════════════════════

struct Window {
    started: Instant,
    count: u32,
}

/// Per-client fixed-window request counter.
///
/// Each client gets `max_requests` per `window`, counted from its first
/// request in the window. The counter resets once the window elapses.
pub struct RateLimiter {
    windows: HashMap<String, Window>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: HashMap::new(),
            window,
            max_requests,
        }
    }

    /// Count a request for `client`. Returns `Err(retry_after_secs)` if
    /// the client has used its quota for the current window.
    pub fn check(&mut self, client: &str) -> Result<(), u64> {
        self.check_at(client, Instant::now())
    }

    pub fn check_at(&mut self, client: &str, now: Instant) -> Result<(), u64> {
        // Periodic cleanup when many clients are tracked
        if self.windows.len() > RATE_SWEEP_THRESHOLD {
            self.sweep(now);
        }

        let window = self.window;
        let entry = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let remaining = window.saturating_sub(now.duration_since(entry.started));
            // Round up so clients never retry before the reset.
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return Err(secs.max(1));
        }

        entry.count += 1;
        Ok(())
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    fn sweep(&mut self, now: Instant) {
        let window = self.window;
        self.windows
            .retain(|_, w| now.duration_since(w.started) < window);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(crate::config::DEFAULT_RATE_WINDOW_SECS),
            crate::config::DEFAULT_RATE_MAX_REQUESTS,
        )
    }
}
