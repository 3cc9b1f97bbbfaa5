//! Application services - per-trade evaluation and batch orchestration.

pub mod portfolio_engine;
pub mod trade_evaluator;

pub use portfolio_engine::PortfolioEngine;
pub use trade_evaluator::{EngineError, TradeEvaluator};
