//! Per-trade return evaluation.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::ports::{QuoteSource, QuoteSourceError};
use crate::domain::{AnnualizedReturn, Trade, compute_return, first_open, last_close};

/// Errors that abort a return calculation.
///
/// Soft per-trade data anomalies are not represented here: they degrade
/// to a NaN-valued [`AnnualizedReturn`] and the batch continues.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Caller misuse: the trade was purchased on or after the evaluation
    /// end date. Never produced by data issues.
    #[error(
        "Invalid date range for {symbol}: purchase date {purchase_date} is not before end date {end_date}"
    )]
    InvalidDateRange {
        /// Symbol of the offending trade.
        symbol: String,
        /// The trade's purchase date.
        purchase_date: NaiveDate,
        /// The requested evaluation end date.
        end_date: NaiveDate,
    },

    /// The quote service failed; the whole batch aborts.
    #[error("Quote service failure: {message}")]
    QuoteService {
        /// Error details.
        message: String,
    },
}

/// Evaluates a single trade against a quote source.
///
/// Ordinary data failures never abort: a batch of N trades always yields
/// N results, with unusable trades marked NaN.
pub struct TradeEvaluator {
    quote_source: Arc<dyn QuoteSource>,
}

impl TradeEvaluator {
    /// Create an evaluator over a quote source.
    #[must_use]
    pub fn new(quote_source: Arc<dyn QuoteSource>) -> Self {
        Self { quote_source }
    }

    /// Compute the annualized return for one trade as of `end_date`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidDateRange`] if the trade's purchase date is
    ///   not strictly before `end_date`.
    /// - [`EngineError::QuoteService`] if the quote source reports a
    ///   transport or service failure.
    ///
    /// A decodable-but-unusable response (empty bars, all prices null, or
    /// a per-symbol decode anomaly) returns a NaN sentinel result instead
    /// of an error.
    pub async fn evaluate(
        &self,
        trade: &Trade,
        end_date: NaiveDate,
    ) -> Result<AnnualizedReturn, EngineError> {
        if trade.purchase_date >= end_date {
            return Err(EngineError::InvalidDateRange {
                symbol: trade.symbol.as_str().to_string(),
                purchase_date: trade.purchase_date,
                end_date,
            });
        }

        let bars = match self
            .quote_source
            .fetch(&trade.symbol, trade.purchase_date, end_date)
            .await
        {
            Ok(bars) => bars,
            Err(QuoteSourceError::Service { message }) => {
                return Err(EngineError::QuoteService { message });
            }
            Err(err @ QuoteSourceError::Decode { .. }) => {
                tracing::warn!(
                    symbol = %trade.symbol,
                    error = %err,
                    "Quote payload unusable, marking trade not available"
                );
                return Ok(AnnualizedReturn::not_available(trade.symbol.clone()));
            }
        };

        let (Some(buy_price), Some(sell_price)) = (first_open(&bars), last_close(&bars)) else {
            tracing::debug!(
                symbol = %trade.symbol,
                bars = bars.len(),
                "No usable open/close prices, marking trade not available"
            );
            return Ok(AnnualizedReturn::not_available(trade.symbol.clone()));
        };

        let metrics = compute_return(trade.purchase_date, end_date, buy_price, sell_price);

        Ok(AnnualizedReturn::new(trade.symbol.clone(), metrics))
    }
}
