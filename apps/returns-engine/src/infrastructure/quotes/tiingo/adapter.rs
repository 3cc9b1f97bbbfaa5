//! `QuoteSource` port implementation backed by the Tiingo client.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::{QuoteSource, QuoteSourceError};
use crate::domain::{PriceBar, Symbol};

use super::client::TiingoClient;
use super::config::TiingoConfig;
use super::error::TiingoError;

/// Tiingo-backed quote source.
pub struct TiingoQuoteSource {
    client: TiingoClient,
}

impl TiingoQuoteSource {
    /// Create a quote source from config.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is incomplete or the HTTP
    /// client cannot be built.
    pub fn new(config: &TiingoConfig) -> Result<Self, TiingoError> {
        Ok(Self {
            client: TiingoClient::new(config)?,
        })
    }
}

#[async_trait]
impl QuoteSource for TiingoQuoteSource {
    async fn fetch(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>, QuoteSourceError> {
        let raw = self.client.daily_prices(symbol.as_str(), from, to).await?;

        let mut bars: Vec<PriceBar> = raw.into_iter().map(PriceBar::from).collect();
        // The port contract promises ascending order; don't trust the wire.
        bars.sort_by_key(|bar| bar.date);

        Ok(bars)
    }
}
