//! Trade value object - a single stock purchase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::symbol::Symbol;

/// A single purchase event whose return is measured against a later
/// evaluation date.
///
/// Deserializes from the camelCase trades-file format:
///
/// ```json
/// {"symbol": "AAPL", "quantity": 50, "purchaseDate": "2020-01-01"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Date the shares were purchased.
    pub purchase_date: NaiveDate,
    /// Number of shares purchased.
    pub quantity: u32,
}

impl Trade {
    /// Create a new trade.
    #[must_use]
    pub const fn new(symbol: Symbol, purchase_date: NaiveDate, quantity: u32) -> Self {
        Self {
            symbol,
            purchase_date,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trade_new() {
        let trade = Trade::new(Symbol::new("AAPL"), date(2020, 1, 1), 50);
        assert_eq!(trade.symbol.as_str(), "AAPL");
        assert_eq!(trade.quantity, 50);
    }

    #[test]
    fn trade_deserializes_camel_case() {
        let json = r#"{"symbol": "aapl", "quantity": 50, "purchaseDate": "2020-01-01"}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();

        assert_eq!(trade.symbol.as_str(), "AAPL");
        assert_eq!(trade.purchase_date, date(2020, 1, 1));
        assert_eq!(trade.quantity, 50);
    }

    #[test]
    fn trade_serializes_camel_case() {
        let trade = Trade::new(Symbol::new("MSFT"), date(2019, 6, 15), 10);
        let json = serde_json::to_string(&trade).unwrap();

        assert!(json.contains("\"purchaseDate\":\"2019-06-15\""));
        assert!(json.contains("\"symbol\":\"MSFT\""));
    }
}
