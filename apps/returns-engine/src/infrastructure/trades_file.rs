//! Trades file reader.
//!
//! Loads an ordered trade list from a JSON array in the camelCase format:
//!
//! ```json
//! [{"symbol": "AAPL", "quantity": 50, "purchaseDate": "2020-01-01"}]
//! ```

use std::path::Path;

use thiserror::Error;

use crate::domain::{DomainError, Trade};

/// Errors from reading a trades file.
#[derive(Debug, Error)]
pub enum TradesFileError {
    /// The file could not be read.
    #[error("Could not read trades file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file contents were not a valid trade list.
    #[error("Could not parse trades file {path}: {source}")]
    Parse {
        /// Path that was read.
        path: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// A trade in the file failed domain validation.
    #[error("Invalid trade in {path}: {source}")]
    Invalid {
        /// Path that was read.
        path: String,
        /// Underlying domain error.
        source: DomainError,
    },
}

/// Read an ordered trade list from a JSON file.
///
/// Input order is preserved: it is the tie-break key for result sorting
/// downstream.
///
/// # Errors
///
/// Returns [`TradesFileError`] if the file cannot be read or parsed, or
/// if any trade carries an invalid symbol.
pub fn read_trades(path: &Path) -> Result<Vec<Trade>, TradesFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TradesFileError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let trades: Vec<Trade> =
        serde_json::from_str(&contents).map_err(|source| TradesFileError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    for trade in &trades {
        trade
            .symbol
            .validate()
            .map_err(|source| TradesFileError::Invalid {
                path: path.display().to_string(),
                source,
            })?;
    }

    Ok(trades)
}
