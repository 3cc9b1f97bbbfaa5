//! Price bar value object and price extraction helpers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day's recorded prices for a symbol.
///
/// Quote providers occasionally report bars with missing fields, so every
/// price is optional. Sequences produced by a quote source are ordered
/// chronologically ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Option<f64>,
    /// Daily high.
    pub high: Option<f64>,
    /// Daily low.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
}

impl PriceBar {
    /// Create a bar with open and close prices only.
    #[must_use]
    pub const fn new(date: NaiveDate, open: Option<f64>, close: Option<f64>) -> Self {
        Self {
            date,
            open,
            high: None,
            low: None,
            close,
        }
    }
}

/// First non-null opening price in an ascending bar sequence.
///
/// This is the buy price of a trade whose purchase date starts the range.
/// Returns `None` when the sequence is empty or every open is missing.
#[must_use]
pub fn first_open(bars: &[PriceBar]) -> Option<f64> {
    bars.iter().find_map(|bar| bar.open)
}

/// Last non-null closing price in an ascending bar sequence.
///
/// This is the sell price of a trade evaluated at the range's end date.
/// Returns `None` when the sequence is empty or every close is missing.
#[must_use]
pub fn last_close(bars: &[PriceBar]) -> Option<f64> {
    bars.iter().rev().find_map(|bar| bar.close)
}
