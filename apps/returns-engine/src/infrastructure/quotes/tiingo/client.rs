//! HTTP client for the Tiingo daily-prices API, with retry logic.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, StatusCode};

use super::api_types::TiingoBar;
use super::config::{RetryConfig, TiingoConfig};
use super::error::TiingoError;

/// HTTP client for Tiingo with retry logic.
#[derive(Debug, Clone)]
pub struct TiingoClient {
    client: Client,
    base_url: String,
    token: String,
    retry_config: RetryConfig,
}

impl TiingoClient {
    /// Create a new HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns error if the token is empty or the HTTP client cannot be
    /// built.
    pub fn new(config: &TiingoConfig) -> Result<Self, TiingoError> {
        if config.token.is_empty() {
            return Err(TiingoError::MissingToken);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TiingoError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            retry_config: config.retry.clone(),
        })
    }

    /// Fetch daily bars for a symbol over an inclusive date range.
    ///
    /// Retries rate-limit and server errors with exponential backoff;
    /// decode failures and other client errors are returned immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TiingoError`] on transport failure, non-success status,
    /// retry exhaustion, or an undecodable response body.
    pub async fn daily_prices(
        &self,
        symbol: &str,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<TiingoBar>, TiingoError> {
        let url = format!(
            "{}/tiingo/daily/{}/prices?startDate={}&endDate={}&token={}",
            self.base_url, symbol, from, to, self.token
        );
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            tracing::debug!(symbol, %from, %to, "Requesting daily prices");

            let response = match self.client.get(&url).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            symbol,
                            error = %e,
                            delay_ms = delay.as_millis() as u64,
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(TiingoError::MaxRetriesExceeded {
                        attempts: backoff.attempt,
                    });
                }
            };

            let status = response.status();

            if status.is_success() {
                let text = response
                    .text()
                    .await
                    .map_err(|e| TiingoError::Http(e.to_string()))?;
                // Tiingo answers unknown symbols with 200 + an error
                // object, which fails this decode.
                return serde_json::from_str(&text).map_err(|e| TiingoError::Decode {
                    symbol: symbol.to_string(),
                    message: e.to_string(),
                });
            }

            let message = response.text().await.unwrap_or_default();

            match categorize_status(status) {
                ErrorCategory::RateLimited | ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            symbol,
                            status = status.as_u16(),
                            delay_ms = delay.as_millis() as u64,
                            attempt = backoff.attempt,
                            "Retryable status, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(TiingoError::MaxRetriesExceeded {
                        attempts: backoff.attempt,
                    });
                }
                ErrorCategory::NonRetryable => {
                    return Err(TiingoError::Status {
                        status: status.as_u16(),
                        message,
                    });
                }
            }
        }
    }
}

/// Error category for determining retry behavior.
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Exponential backoff calculator with jitter.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

/// Jitter applied around each backoff: ±25%.
const JITTER_FACTOR: f64 = 0.25;

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let backoff = apply_jitter(self.current_backoff);
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(backoff)
    }
}

/// Randomize a backoff within [backoff * (1 - jitter), backoff * (1 + jitter)].
fn apply_jitter(backoff: Duration) -> Duration {
    let mut rng = rand::rng();
    let base = backoff.as_secs_f64();
    let range = base * JITTER_FACTOR;
    let jittered = rng.random_range((base - range).max(0.0)..=(base + range));
    Duration::from_secs_f64(jittered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_rate_limited() {
        assert!(matches!(
            categorize_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorCategory::RateLimited
        ));
    }

    #[test]
    fn categorize_retryable() {
        assert!(matches!(
            categorize_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorCategory::Retryable
        ));
        assert!(matches!(
            categorize_status(StatusCode::BAD_GATEWAY),
            ErrorCategory::Retryable
        ));
        assert!(matches!(
            categorize_status(StatusCode::SERVICE_UNAVAILABLE),
            ErrorCategory::Retryable
        ));
    }

    #[test]
    fn categorize_non_retryable() {
        assert!(matches!(
            categorize_status(StatusCode::BAD_REQUEST),
            ErrorCategory::NonRetryable
        ));
        assert!(matches!(
            categorize_status(StatusCode::NOT_FOUND),
            ErrorCategory::NonRetryable
        ));
        assert!(matches!(
            categorize_status(StatusCode::UNAUTHORIZED),
            ErrorCategory::NonRetryable
        ));
    }

    #[test]
    fn exponential_backoff_grows_and_stops() {
        let config = RetryConfig {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        };

        let mut backoff = ExponentialBackoff::new(&config);

        // First: ~100ms, second: ~200ms, third: ~400ms, all within jitter.
        for expected_ms in [100.0, 200.0, 400.0] {
            let delay = backoff.next_backoff().unwrap().as_secs_f64() * 1000.0;
            assert!(delay >= expected_ms * (1.0 - JITTER_FACTOR));
            assert!(delay <= expected_ms * (1.0 + JITTER_FACTOR));
        }

        // Fourth attempt exhausts the budget.
        assert!(backoff.next_backoff().is_none());
    }

    #[test]
    fn exponential_backoff_respects_max() {
        let config = RetryConfig {
            max_attempts: 10,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(5),
            multiplier: 10.0,
        };

        let mut backoff = ExponentialBackoff::new(&config);
        backoff.next_backoff();

        // Second backoff is capped at 5s (not 10s), modulo jitter.
        let second = backoff.next_backoff().unwrap();
        assert!(second.as_secs_f64() <= 5.0 * (1.0 + JITTER_FACTOR));
    }

    #[test]
    fn client_requires_token() {
        let config = TiingoConfig::new(String::new());
        assert!(matches!(
            TiingoClient::new(&config),
            Err(TiingoError::MissingToken)
        ));
    }
}
