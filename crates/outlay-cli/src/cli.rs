//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Outlay - Forecast monthly spending from your expense ledger
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Budget forecasting from a personal expense ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger CSV file (columns: date,amount,category,kind)
    #[arg(short, long, global = true, default_value = "ledger.csv")]
    pub ledger: PathBuf,

    /// Model artifact path
    #[arg(short, long, global = true, default_value = "outlay_model.json")]
    pub model: PathBuf,

    /// Reference date standing in for "today" (YYYY-MM-DD, defaults to
    /// the current date); useful for reproducible runs
    #[arg(short, long, global = true)]
    pub date: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the budget model from ledger history
    Train,

    /// Predict next month's budget with a spend recommendation
    Predict,

    /// Project spending for the next few months
    Forecast {
        /// Number of months ahead
        #[arg(short = 'n', long, default_value = "3")]
        months: u32,
    },

    /// Show monthly spending trends
    Trends {
        /// Number of months back
        #[arg(short = 'n', long, default_value = "6")]
        months: u32,
    },
}
