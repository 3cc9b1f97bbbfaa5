//! Mock quote source for testing and offline runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::{QuoteSource, QuoteSourceError};
use crate::domain::{PriceBar, Symbol};

/// Programmable in-memory quote source.
///
/// Tests program per-symbol bars, failures, and artificial latency. The
/// latency knob lets parallel tests scramble completion order without
/// changing results. Unprogrammed symbols return an empty bar list.
#[derive(Debug, Default)]
pub struct MockQuoteSource {
    bars: RwLock<HashMap<String, Vec<PriceBar>>>,
    failures: RwLock<HashMap<String, QuoteSourceError>>,
    delays: RwLock<HashMap<String, Duration>>,
}

impl MockQuoteSource {
    /// Create a new mock quote source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bars returned for a symbol.
    pub fn set_bars(&self, symbol: &str, bars: Vec<PriceBar>) {
        let mut map = self.bars.write().unwrap();
        map.insert(symbol.to_uppercase(), bars);
    }

    /// Make fetches for a symbol fail with the given error.
    pub fn set_failure(&self, symbol: &str, error: QuoteSourceError) {
        let mut map = self.failures.write().unwrap();
        map.insert(symbol.to_uppercase(), error);
    }

    /// Delay fetches for a symbol by the given duration.
    pub fn set_delay(&self, symbol: &str, delay: Duration) {
        let mut map = self.delays.write().unwrap();
        map.insert(symbol.to_uppercase(), delay);
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn fetch(
        &self,
        symbol: &Symbol,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PriceBar>, QuoteSourceError> {
        let delay = {
            let delays = self.delays.read().unwrap();
            delays.get(symbol.as_str()).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        {
            let failures = self.failures.read().unwrap();
            if let Some(error) = failures.get(symbol.as_str()) {
                return Err(error.clone());
            }
        }

        let bars = self.bars.read().unwrap();
        Ok(bars.get(symbol.as_str()).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[tokio::test]
    async fn fetch_programmed_bars() {
        let mock = MockQuoteSource::new();
        mock.set_bars("AAPL", vec![PriceBar::new(date(1), Some(100.0), Some(101.0))]);

        let bars = mock
            .fetch(&Symbol::new("AAPL"), date(1), date(2))
            .await
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, Some(100.0));
    }

    #[tokio::test]
    async fn fetch_unprogrammed_symbol_is_empty() {
        let mock = MockQuoteSource::new();

        let bars = mock
            .fetch(&Symbol::new("UNKNOWN"), date(1), date(2))
            .await
            .unwrap();

        assert!(bars.is_empty());
    }

    #[tokio::test]
    async fn fetch_programmed_failure() {
        let mock = MockQuoteSource::new();
        mock.set_failure(
            "AAPL",
            QuoteSourceError::Service {
                message: "down".to_string(),
            },
        );

        let result = mock.fetch(&Symbol::new("AAPL"), date(1), date(2)).await;

        assert!(matches!(result, Err(QuoteSourceError::Service { .. })));
    }

    #[tokio::test]
    async fn fetch_applies_delay() {
        let mock = MockQuoteSource::new();
        mock.set_bars("AAPL", vec![]);
        mock.set_delay("AAPL", Duration::from_millis(20));

        let start = std::time::Instant::now();
        mock.fetch(&Symbol::new("AAPL"), date(1), date(2))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn symbol_lookup_is_case_normalized() {
        let mock = MockQuoteSource::new();
        mock.set_bars("aapl", vec![PriceBar::new(date(1), Some(100.0), Some(101.0))]);

        let bars = mock
            .fetch(&Symbol::new("AAPL"), date(1), date(2))
            .await
            .unwrap();

        assert_eq!(bars.len(), 1);
    }
}
