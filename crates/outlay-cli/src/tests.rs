//! CLI command tests
//!
//! This module contains tests for argument parsing and the CLI commands
//! run end to end against a temporary ledger and model path.

use chrono::NaiveDate;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands;

fn write_ledger(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("ledger.csv");
    let mut csv = String::from("date,amount,category,kind\n");
    for (month, total) in [(1, 1000.0), (2, 1200.0), (3, 1100.0), (4, 1300.0)] {
        for day in 1..=4usize {
            csv.push_str(&format!(
                "2024-{:02}-{:02},{},{},expense\n",
                month,
                day * 5,
                total / 4.0,
                ["Groceries", "Dining", "Transport", "Utilities"][day - 1],
            ));
        }
    }
    csv.push_str("2024-04-01,3000.00,Salary,income\n");
    std::fs::write(&path, csv).unwrap();
    path
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_forecast_defaults() {
    let cli = Cli::parse_from(["outlay", "forecast"]);
    match cli.command {
        Commands::Forecast { months } => assert_eq!(months, 3),
        _ => panic!("expected forecast command"),
    }
}

#[test]
fn test_parse_trends_with_months() {
    let cli = Cli::parse_from(["outlay", "trends", "--months", "12"]);
    match cli.command {
        Commands::Trends { months } => assert_eq!(months, 12),
        _ => panic!("expected trends command"),
    }
}

#[test]
fn test_parse_global_date_arg() {
    let cli = Cli::parse_from(["outlay", "predict", "--date", "2024-04-30"]);
    assert_eq!(cli.date, Some(today()));
}

// ========== Command Tests ==========

#[test]
fn test_cmd_train_then_predict() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_ledger(&dir);
    let model = dir.path().join("model.json");

    commands::cmd_train(&ledger, &model, today()).unwrap();
    assert!(model.exists());

    commands::cmd_predict(&ledger, &model, today()).unwrap();
}

#[test]
fn test_cmd_train_with_empty_ledger_reports_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("ledger.csv");
    std::fs::write(&ledger, "date,amount,category,kind\n").unwrap();
    let model = dir.path().join("model.json");

    // Insufficient history is a message, not a failure
    commands::cmd_train(&ledger, &model, today()).unwrap();
    assert!(!model.exists());
}

#[test]
fn test_cmd_forecast_without_model_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("ledger.csv");
    std::fs::write(&ledger, "date,amount,category,kind\n").unwrap();
    let model = dir.path().join("model.json");

    commands::cmd_forecast(&ledger, &model, today(), 3).unwrap();
}

#[test]
fn test_cmd_trends() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_ledger(&dir);
    let model = dir.path().join("model.json");

    commands::cmd_trends(&ledger, &model, today(), 6).unwrap();
}

#[test]
fn test_cmd_fails_on_missing_ledger_file() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("nope.csv");
    let model = dir.path().join("model.json");

    assert!(commands::cmd_predict(&ledger, &model, today()).is_err());
}
