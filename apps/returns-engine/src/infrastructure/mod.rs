//! Infrastructure layer - Adapters and external integrations.

pub mod quotes;
pub mod trades_file;
