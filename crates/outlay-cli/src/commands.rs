//! Command implementations for the Outlay CLI
//!
//! Each command loads the ledger CSV, opens the predictor against the
//! configured model path, and prints the engine's output boundary
//! types as pretty JSON.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use outlay_core::{
    BudgetPredictor, ForecastService, MemoryLedger, ModelStore, TrainOutcome,
};

/// Build the forecast service from the ledger file and model path
fn open_service(ledger_path: &Path, model_path: &Path) -> Result<ForecastService<MemoryLedger>> {
    let ledger = MemoryLedger::from_csv_path(ledger_path)
        .with_context(|| format!("Failed to load ledger from {}", ledger_path.display()))?;

    let predictor = BudgetPredictor::open(ModelStore::new(model_path))
        .context("Failed to open budget predictor")?;

    Ok(ForecastService::new(ledger, predictor))
}

pub fn cmd_train(ledger_path: &Path, model_path: &Path, today: NaiveDate) -> Result<()> {
    println!("📊 Training budget model from {}...", ledger_path.display());

    let mut service = open_service(ledger_path, model_path)?;
    let outcome = service.train_from_history(today)?;

    match &outcome {
        TrainOutcome::Trained(report) => {
            println!(
                "✅ Model trained (MAE {:.2}, R² {:.2}) and saved to {}",
                report.mean_absolute_error,
                report.r_squared,
                model_path.display()
            );
        }
        TrainOutcome::InsufficientHistory { message, .. } => {
            println!("⚠️  {}", message);
        }
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub fn cmd_predict(ledger_path: &Path, model_path: &Path, today: NaiveDate) -> Result<()> {
    let mut service = open_service(ledger_path, model_path)?;
    let prediction = service.predict_next_month(today)?;

    println!(
        "💰 Predicted budget for {}/{}: {:.2} ({})",
        prediction.next_month,
        prediction.next_year,
        prediction.predicted_budget,
        prediction.recommendation
    );
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

pub fn cmd_forecast(
    ledger_path: &Path,
    model_path: &Path,
    today: NaiveDate,
    months: u32,
) -> Result<()> {
    let mut service = open_service(ledger_path, model_path)?;
    let points = service.forecast(today, months)?;

    println!("🔮 {}-month forecast:", months);
    for point in &points {
        println!("   {:<16} {:>10.2}", point.month_label, point.predicted_budget);
    }
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

pub fn cmd_trends(
    ledger_path: &Path,
    model_path: &Path,
    today: NaiveDate,
    months: u32,
) -> Result<()> {
    let service = open_service(ledger_path, model_path)?;
    let trends = service.spending_trends(today, months)?;

    println!("📈 Spending trends (last {} months):", months);
    for trend in &trends {
        println!(
            "   {:<16} expenses {:>10.2}  income {:>10.2}  net {:>10.2}",
            trend.month_label, trend.total_expense, trend.total_income, trend.net_savings
        );
    }
    println!("{}", serde_json::to_string_pretty(&trends)?);
    Ok(())
}
