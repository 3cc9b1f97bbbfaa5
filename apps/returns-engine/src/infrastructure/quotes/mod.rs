//! Quote source adapters.

pub mod mock;
pub mod tiingo;

pub use mock::MockQuoteSource;
pub use tiingo::{RetryConfig, TiingoConfig, TiingoError, TiingoQuoteSource};
