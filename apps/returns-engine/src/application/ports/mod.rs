//! Ports - interfaces the application layer consumes.

pub mod quote_source;

pub use quote_source::{QuoteSource, QuoteSourceError};
