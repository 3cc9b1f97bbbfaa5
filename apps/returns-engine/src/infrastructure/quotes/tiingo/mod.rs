//! Tiingo daily-prices adapter for the `QuoteSource` port.

pub mod adapter;
pub mod api_types;
pub mod client;
pub mod config;
pub mod error;

pub use adapter::TiingoQuoteSource;
pub use client::TiingoClient;
pub use config::{RetryConfig, TiingoConfig};
pub use error::TiingoError;
