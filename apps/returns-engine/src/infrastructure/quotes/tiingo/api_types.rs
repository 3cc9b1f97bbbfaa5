//! Tiingo API response types.
//!
//! These types map directly to Tiingo's daily-prices REST format.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::PriceBar;

/// One daily bar from `/tiingo/daily/{symbol}/prices`.
///
/// Tiingo timestamps bars at midnight UTC. Unknown fields (volume,
/// adjusted prices, splits) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiingoBar {
    /// Bar timestamp.
    pub date: DateTime<Utc>,
    /// Opening price.
    pub open: Option<f64>,
    /// Daily high.
    pub high: Option<f64>,
    /// Daily low.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
}

impl From<TiingoBar> for PriceBar {
    fn from(bar: TiingoBar) -> Self {
        Self {
            date: bar.date.date_naive(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiingo_bar_deserializes() {
        let json = r#"{
            "date": "2020-01-02T00:00:00.000Z",
            "open": 296.24,
            "high": 300.6,
            "low": 295.19,
            "close": 300.35,
            "volume": 33911864,
            "adjClose": 297.83
        }"#;
        let bar: TiingoBar = serde_json::from_str(json).unwrap();

        assert_eq!(bar.open, Some(296.24));
        assert_eq!(bar.close, Some(300.35));
    }

    #[test]
    fn tiingo_bar_tolerates_null_prices() {
        let json = r#"{"date": "2020-01-02T00:00:00.000Z", "open": null, "close": null}"#;
        let bar: TiingoBar = serde_json::from_str(json).unwrap();

        assert_eq!(bar.open, None);
        assert_eq!(bar.close, None);
    }

    #[test]
    fn tiingo_bar_converts_to_price_bar() {
        let json = r#"{"date": "2020-01-02T00:00:00.000Z", "open": 100.0, "close": 101.0}"#;
        let bar: TiingoBar = serde_json::from_str(json).unwrap();
        let price_bar: PriceBar = bar.into();

        assert_eq!(
            price_bar.date,
            chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
        );
        assert_eq!(price_bar.open, Some(100.0));
        assert_eq!(price_bar.close, Some(101.0));
    }
}
