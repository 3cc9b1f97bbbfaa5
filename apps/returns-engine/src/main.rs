//! Returns Engine Binary
//!
//! Computes annualized returns for a portfolio of trades.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin returns-engine -- --trades trades.json --end-date 2021-01-01 --workers 4
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `TIINGO_TOKEN`: Tiingo API token
//!
//! ## Optional
//! - `TIINGO_BASE_URL`: Override the Tiingo API base URL
//! - `RUST_LOG`: Log level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;

use returns_engine::{AnnualizedReturn, PortfolioEngine, TiingoConfig, TiingoQuoteSource};

/// Compute annualized returns for a portfolio of trades.
#[derive(Debug, Parser)]
#[command(name = "returns-engine", version, about)]
struct Args {
    /// Path to the trades JSON file.
    #[arg(long)]
    trades: PathBuf,

    /// Evaluation end date (YYYY-MM-DD).
    #[arg(long)]
    end_date: NaiveDate,

    /// Number of concurrent quote fetches. 1 runs the sequential path.
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let args = Args::parse();

    tracing::info!(
        trades_file = %args.trades.display(),
        end_date = %args.end_date,
        workers = args.workers,
        "Starting returns engine"
    );

    let trades = returns_engine::read_trades(&args.trades)
        .with_context(|| format!("loading trades from {}", args.trades.display()))?;

    let engine = create_engine()?;

    let results = if args.workers > 1 {
        engine
            .calculate_annualized_return_parallel(&trades, args.end_date, args.workers)
            .await
    } else {
        engine
            .calculate_annualized_return(&trades, args.end_date)
            .await
    }
    .context("calculating annualized returns")?;

    print_results(&results)?;

    tracing::info!(results = results.len(), "Returns engine finished");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
///
/// A missing file is not an error; configuration falls back to the
/// process environment.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "returns_engine=info"
                    .parse()
                    .expect("static directive 'returns_engine=info' is valid"),
            ),
        )
        .init();
}

/// Wire the engine to the Tiingo quote source.
fn create_engine() -> anyhow::Result<PortfolioEngine> {
    let config = TiingoConfig::from_env().context("configuring Tiingo quote source")?;
    let quote_source =
        TiingoQuoteSource::new(&config).context("creating Tiingo quote source")?;

    Ok(PortfolioEngine::new(Arc::new(quote_source)))
}

/// Print the result list to stdout as pretty JSON.
///
/// Diagnostics go to tracing (stderr); stdout carries only the results.
fn print_results(results: &[AnnualizedReturn]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results).context("serializing results")?;
    println!("{json}");
    Ok(())
}
