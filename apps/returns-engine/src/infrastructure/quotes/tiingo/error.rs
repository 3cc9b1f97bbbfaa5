//! Tiingo-specific error types.

use thiserror::Error;

use crate::application::ports::QuoteSourceError;

/// Errors from the Tiingo adapter.
#[derive(Debug, Error, Clone)]
pub enum TiingoError {
    /// TIINGO_TOKEN was not configured.
    #[error("TIINGO_TOKEN environment variable is required")]
    MissingToken,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned a non-success status.
    #[error("API returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// Response body could not be decoded as daily bars.
    ///
    /// Tiingo answers unknown symbols with 200 and an error object, so
    /// this maps to a per-symbol soft failure downstream.
    #[error("Could not decode daily prices for {symbol}: {message}")]
    Decode {
        /// Symbol the request was for.
        symbol: String,
        /// Error details.
        message: String,
    },
}

impl From<TiingoError> for QuoteSourceError {
    fn from(err: TiingoError) -> Self {
        match err {
            TiingoError::Decode { symbol, message } => Self::Decode { symbol, message },
            other => Self::Service {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_maps_to_decode() {
        let err = TiingoError::Decode {
            symbol: "AAPL".to_string(),
            message: "unexpected token".to_string(),
        };
        let port_err: QuoteSourceError = err.into();
        assert!(matches!(port_err, QuoteSourceError::Decode { .. }));
    }

    #[test]
    fn status_error_maps_to_service() {
        let err = TiingoError::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        let port_err: QuoteSourceError = err.into();
        assert!(matches!(port_err, QuoteSourceError::Service { .. }));
    }

    #[test]
    fn retries_exceeded_maps_to_service() {
        let err = TiingoError::MaxRetriesExceeded { attempts: 3 };
        let port_err: QuoteSourceError = err.into();
        match port_err {
            QuoteSourceError::Service { message } => assert!(message.contains("3 attempts")),
            QuoteSourceError::Decode { .. } => panic!("expected Service"),
        }
    }
}
