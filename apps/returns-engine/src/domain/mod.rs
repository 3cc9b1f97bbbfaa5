//! Domain layer - Core business logic with no infrastructure dependencies.

pub mod errors;
pub mod price_bar;
pub mod returns;
pub mod symbol;
pub mod trade;

pub use errors::DomainError;
pub use price_bar::{PriceBar, first_open, last_close};
pub use returns::{AnnualizedReturn, ReturnMetrics, compute_return, descending_by_annualized};
pub use symbol::Symbol;
pub use trade::Trade;
