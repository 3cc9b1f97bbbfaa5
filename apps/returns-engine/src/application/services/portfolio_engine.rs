//! Batch return calculation over a list of trades.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use futures::StreamExt;
use futures::stream;
use tracing::{debug, info, warn};

use crate::application::ports::QuoteSource;
use crate::application::services::trade_evaluator::{EngineError, TradeEvaluator};
use crate::domain::{AnnualizedReturn, Trade, descending_by_annualized};

/// Orchestrates return calculation for a full trade list.
///
/// Both modes share one output contract: a list the same length as the
/// input, sorted descending by annualized return with a stable tie-break
/// on input order and NaN results at the bottom. Concurrency changes only
/// wall-clock cost, never the observable result.
pub struct PortfolioEngine {
    evaluator: TradeEvaluator,
}

impl PortfolioEngine {
    /// Create an engine over a quote source.
    #[must_use]
    pub fn new(quote_source: Arc<dyn QuoteSource>) -> Self {
        Self {
            evaluator: TradeEvaluator::new(quote_source),
        }
    }

    /// Calculate annualized returns sequentially, in input order.
    ///
    /// # Errors
    ///
    /// Fails fast on the first [`EngineError`]: a quote-service failure or
    /// an invalid date range aborts the whole batch.
    pub async fn calculate_annualized_return(
        &self,
        trades: &[Trade],
        end_date: NaiveDate,
    ) -> Result<Vec<AnnualizedReturn>, EngineError> {
        let start_time = Instant::now();
        info!(trades = trades.len(), %end_date, "Starting sequential return calculation");

        let mut results = Vec::with_capacity(trades.len());
        for trade in trades {
            results.push(self.evaluator.evaluate(trade, end_date).await?);
        }

        results.sort_by(descending_by_annualized);

        info!(
            trades = trades.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Sequential return calculation complete"
        );

        Ok(results)
    }

    /// Calculate annualized returns with up to `concurrency` evaluations
    /// in flight at once.
    ///
    /// `concurrency` is clamped to at least 1; a width larger than the
    /// trade count is harmless. Every evaluation is driven to a terminal
    /// state before this returns, success or failure.
    ///
    /// # Errors
    ///
    /// If any evaluation fails, the failure with the lowest input index is
    /// reported once for the whole batch after all evaluations settle. No
    /// partial result list is ever returned.
    pub async fn calculate_annualized_return_parallel(
        &self,
        trades: &[Trade],
        end_date: NaiveDate,
        concurrency: usize,
    ) -> Result<Vec<AnnualizedReturn>, EngineError> {
        let width = concurrency.max(1);
        let start_time = Instant::now();
        info!(
            trades = trades.len(),
            %end_date,
            concurrency = width,
            "Starting parallel return calculation"
        );

        let evaluator = &self.evaluator;

        // Each evaluation carries its input index from submission, so the
        // result list can be rebuilt in input order regardless of which
        // evaluation settles first. `collect` drains the whole stream:
        // in-flight siblings always settle before a failure is reported.
        let settled: Vec<(usize, Result<AnnualizedReturn, EngineError>)> =
            stream::iter(trades.iter().enumerate())
                .map(|(index, trade)| async move {
                    debug!(index, symbol = %trade.symbol, "Evaluating trade");
                    (index, evaluator.evaluate(trade, end_date).await)
                })
                .buffer_unordered(width)
                .collect()
                .await;

        let mut slots: Vec<Option<AnnualizedReturn>> = vec![None; trades.len()];
        let mut first_failure: Option<(usize, EngineError)> = None;

        for (index, outcome) in settled {
            match outcome {
                Ok(result) => slots[index] = Some(result),
                Err(err) => {
                    if first_failure.as_ref().is_none_or(|(i, _)| index < *i) {
                        first_failure = Some((index, err));
                    }
                }
            }
        }

        if let Some((index, err)) = first_failure {
            warn!(index, error = %err, "Parallel return calculation failed");
            return Err(err);
        }

        let mut results: Vec<AnnualizedReturn> = slots.into_iter().flatten().collect();
        results.sort_by(descending_by_annualized);

        info!(
            trades = trades.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Parallel return calculation complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::ports::QuoteSourceError;
    use crate::domain::{PriceBar, Symbol};
    use crate::infrastructure::quotes::MockQuoteSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_year_bars(open: f64, close: f64) -> Vec<PriceBar> {
        vec![
            PriceBar::new(date(2020, 1, 1), Some(open), Some(open)),
            PriceBar::new(date(2021, 1, 1), Some(close), Some(close)),
        ]
    }

    #[tokio::test]
    async fn sequential_sorts_descending() {
        let mock = MockQuoteSource::new();
        mock.set_bars("AAPL", one_year_bars(100.0, 150.0));
        mock.set_bars("MSFT", one_year_bars(100.0, 120.0));

        let engine = PortfolioEngine::new(Arc::new(mock));
        let trades = vec![
            Trade::new(Symbol::new("MSFT"), date(2020, 1, 1), 10),
            Trade::new(Symbol::new("AAPL"), date(2020, 1, 1), 10),
        ];

        let results = engine
            .calculate_annualized_return(&trades, date(2021, 1, 1))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symbol.as_str(), "AAPL");
        assert_eq!(results[1].symbol.as_str(), "MSFT");
    }

    #[tokio::test]
    async fn sequential_aborts_on_service_failure() {
        let mock = MockQuoteSource::new();
        mock.set_bars("AAPL", one_year_bars(100.0, 150.0));
        mock.set_failure(
            "MSFT",
            QuoteSourceError::Service {
                message: "down".to_string(),
            },
        );

        let engine = PortfolioEngine::new(Arc::new(mock));
        let trades = vec![
            Trade::new(Symbol::new("AAPL"), date(2020, 1, 1), 10),
            Trade::new(Symbol::new("MSFT"), date(2020, 1, 1), 10),
        ];

        let result = engine
            .calculate_annualized_return(&trades, date(2021, 1, 1))
            .await;

        assert!(matches!(result, Err(EngineError::QuoteService { .. })));
    }

    #[tokio::test]
    async fn parallel_reports_lowest_index_failure() {
        let mock = MockQuoteSource::new();
        mock.set_failure(
            "AAPL",
            QuoteSourceError::Service {
                message: "aapl down".to_string(),
            },
        );
        mock.set_failure(
            "MSFT",
            QuoteSourceError::Service {
                message: "msft down".to_string(),
            },
        );
        // MSFT settles first; AAPL's failure must still win.
        mock.set_delay("AAPL", std::time::Duration::from_millis(30));

        let engine = PortfolioEngine::new(Arc::new(mock));
        let trades = vec![
            Trade::new(Symbol::new("AAPL"), date(2020, 1, 1), 10),
            Trade::new(Symbol::new("MSFT"), date(2020, 1, 1), 10),
        ];

        let result = engine
            .calculate_annualized_return_parallel(&trades, date(2021, 1, 1), 2)
            .await;

        match result {
            Err(EngineError::QuoteService { message }) => assert_eq!(message, "aapl down"),
            other => panic!("expected QuoteService error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn parallel_zero_concurrency_is_clamped() {
        let mock = MockQuoteSource::new();
        mock.set_bars("AAPL", one_year_bars(100.0, 150.0));

        let engine = PortfolioEngine::new(Arc::new(mock));
        let trades = vec![Trade::new(Symbol::new("AAPL"), date(2020, 1, 1), 10)];

        let results = engine
            .calculate_annualized_return_parallel(&trades, date(2021, 1, 1), 0)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn empty_trade_list_yields_empty_results() {
        let mock = MockQuoteSource::new();
        let engine = PortfolioEngine::new(Arc::new(mock));

        let sequential = engine
            .calculate_annualized_return(&[], date(2021, 1, 1))
            .await
            .unwrap();
        assert!(sequential.is_empty());
    }
}
