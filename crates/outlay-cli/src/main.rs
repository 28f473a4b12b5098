//! Outlay CLI - Budget forecasting from a personal expense ledger
//!
//! Usage:
//!   outlay train --ledger ledger.csv        Train the budget model
//!   outlay predict                          Predict next month's budget
//!   outlay forecast --months 3              Multi-month projection
//!   outlay trends --months 6                Monthly spending trends

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let today = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Commands::Train => commands::cmd_train(&cli.ledger, &cli.model, today),
        Commands::Predict => commands::cmd_predict(&cli.ledger, &cli.model, today),
        Commands::Forecast { months } => {
            commands::cmd_forecast(&cli.ledger, &cli.model, today, months)
        }
        Commands::Trends { months } => {
            commands::cmd_trends(&cli.ledger, &cli.model, today, months)
        }
    }
}
