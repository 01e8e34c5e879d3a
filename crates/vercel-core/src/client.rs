//! HTTP client settings.
//!
//! Configures the `reqwest` client that sits underneath the authenticating
//! transport. Requests are never retried.

use std::time::Duration;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,

    /// User agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
            user_agent: concat!("vercel-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
