// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Returns Engine - Rust Core Library
//!
//! Concurrent annualized-return engine for stock portfolios.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure value objects and return math
//!   - `symbol`, `trade`, `price_bar`: value objects
//!   - `returns`: total/annualized return formulas and result ordering
//!
//! - **Application**: Services and orchestration
//!   - `ports`: `QuoteSource` - the seam to historical price data
//!   - `services`: `TradeEvaluator` (one trade), `PortfolioEngine`
//!     (batch, sequential or bounded-parallel)
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `quotes::tiingo`: Tiingo daily-prices REST adapter
//!   - `quotes::mock`: programmable in-memory quote source
//!   - `trades_file`: JSON trades-file reader

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::{
    AnnualizedReturn, DomainError, PriceBar, ReturnMetrics, Symbol, Trade, compute_return,
};

// Application re-exports
pub use application::ports::{QuoteSource, QuoteSourceError};
pub use application::services::{EngineError, PortfolioEngine, TradeEvaluator};

// Infrastructure re-exports
pub use infrastructure::quotes::{
    MockQuoteSource, RetryConfig, TiingoConfig, TiingoError, TiingoQuoteSource,
};
pub use infrastructure::trades_file::{TradesFileError, read_trades};
