//! Application layer - Services and port definitions.

pub mod ports;
pub mod services;
