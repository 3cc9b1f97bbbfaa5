//! Tiingo adapter configuration.

use std::time::Duration;

use super::error::TiingoError;

/// Default Tiingo API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.tiingo.com";

/// Configuration for the Tiingo quote adapter.
#[derive(Debug, Clone)]
pub struct TiingoConfig {
    /// API base URL.
    pub base_url: String,
    /// API token.
    pub token: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl TiingoConfig {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads `TIINGO_TOKEN` (required) and `TIINGO_BASE_URL` (optional).
    ///
    /// # Errors
    ///
    /// Returns [`TiingoError::MissingToken`] if `TIINGO_TOKEN` is unset
    /// or empty.
    pub fn from_env() -> Result<Self, TiingoError> {
        let token = std::env::var("TIINGO_TOKEN").unwrap_or_default();
        if token.is_empty() {
            return Err(TiingoError::MissingToken);
        }

        let mut config = Self::new(token);
        if let Ok(base_url) = std::env::var("TIINGO_BASE_URL")
            && !base_url.is_empty()
        {
            config.base_url = base_url;
        }

        Ok(config)
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}
