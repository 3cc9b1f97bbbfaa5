//! Quote Source Port (Driven Port)
//!
//! Interface for retrieving historical daily price bars.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{PriceBar, Symbol};

/// Quote source error.
///
/// The two kinds carry different recovery policies: `Service` may mean
/// systemic unavailability and aborts a batch, while `Decode` is a
/// per-symbol anomaly that degrades that trade to a NaN result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteSourceError {
    /// Transport or service failure.
    #[error("Quote service error: {message}")]
    Service {
        /// Error details.
        message: String,
    },

    /// The response arrived but its payload could not be decoded.
    #[error("Could not decode quote payload for {symbol}: {message}")]
    Decode {
        /// Symbol the request was for.
        symbol: String,
        /// Error details.
        message: String,
    },
}

/// Port for retrieving historical price bars.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch daily bars for a symbol over an inclusive date range.
    ///
    /// Returned bars are ordered chronologically ascending. An empty list
    /// is a valid success (no data for the range).
    async fn fetch(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>, QuoteSourceError>;
}
