//! Annualized return math and result ordering.
//!
//! Pure functions: deterministic for identical inputs, no side effects.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::symbol::Symbol;

/// Days in a year for annualization.
///
/// A simple day-count, deliberately not leap-year-aware: downstream
/// expected values depend on this approximation.
const DAYS_PER_YEAR: f64 = 365.0;

/// Total and annualized return for a single trade.
///
/// Either field may be NaN: a zero buy price, or a loss so deep that
/// `1 + total_return` goes negative under a fractional exponent, has no
/// real-valued annualized return. NaN is carried, not rejected, so a
/// batch can keep going.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnMetrics {
    /// Raw return over the holding period: `(sell - buy) / buy`.
    pub total_return: f64,
    /// Return compounded to a one-year period.
    pub annualized_return: f64,
}

impl ReturnMetrics {
    /// Metrics for a trade whose prices could not be determined.
    #[must_use]
    pub const fn not_available() -> Self {
        Self {
            total_return: f64::NAN,
            annualized_return: f64::NAN,
        }
    }
}

/// Compute total and annualized return for one holding period.
///
/// `end_date` must be strictly after `purchase_date`; the caller enforces
/// that before invoking this function. A zero buy price yields NaN metrics
/// rather than an error, consistent with the soft-failure convention.
#[must_use]
pub fn compute_return(
    purchase_date: NaiveDate,
    end_date: NaiveDate,
    buy_price: f64,
    sell_price: f64,
) -> ReturnMetrics {
    if buy_price == 0.0 {
        return ReturnMetrics::not_available();
    }

    let total_return = (sell_price - buy_price) / buy_price;

    let days = (end_date - purchase_date).num_days();
    #[allow(clippy::cast_precision_loss)]
    let years_elapsed = days as f64 / DAYS_PER_YEAR;

    // Real exponentiation: a negative base with a fractional exponent is NaN.
    let annualized_return = (1.0 + total_return).powf(1.0 / years_elapsed) - 1.0;

    ReturnMetrics {
        total_return,
        annualized_return,
    }
}

/// The per-trade result of a return calculation.
///
/// Output-only: serialized to the result stream, never parsed back.
/// NaN values mark a per-trade soft failure (missing or unusable price
/// data) that did not abort the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualizedReturn {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Return compounded to a one-year period (NaN on soft failure).
    pub annualized_return: f64,
    /// Raw return over the holding period (NaN on soft failure).
    pub total_return: f64,
}

impl AnnualizedReturn {
    /// Create a result from computed metrics.
    #[must_use]
    pub const fn new(symbol: Symbol, metrics: ReturnMetrics) -> Self {
        Self {
            symbol,
            annualized_return: metrics.annualized_return,
            total_return: metrics.total_return,
        }
    }

    /// Sentinel result for a trade whose prices were unavailable.
    #[must_use]
    pub const fn not_available(symbol: Symbol) -> Self {
        Self::new(symbol, ReturnMetrics::not_available())
    }

    /// Whether this result marks a soft failure.
    #[must_use]
    pub fn is_not_available(&self) -> bool {
        self.annualized_return.is_nan()
    }
}

/// Ordering for result lists: descending by annualized return, NaN last.
///
/// NaN compares below every real return so sentinel results sink to the
/// end of a descending-sorted list. Equal keys (and NaN against NaN)
/// compare `Equal`, so a stable sort preserves input order among them.
#[must_use]
pub fn descending_by_annualized(a: &AnnualizedReturn, b: &AnnualizedReturn) -> Ordering {
    cmp_nan_smallest(b.annualized_return, a.annualized_return)
}

/// Total order over f64 keys with NaN below every real value.
fn cmp_nan_smallest(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}
