//! Outlay Core Library
//!
//! Budget forecasting engine for the Outlay personal finance tool:
//! - Ledger access (CSV-backed or in-memory) behind the `Ledger` trait
//! - Monthly feature aggregation from irregular expense records
//! - Elastic-net budget model with seeded train/evaluate split
//! - Model persistence and fallback-first prediction
//! - Forecast orchestration: auto-training, multi-month projection,
//!   spend recommendations, and spending trends

pub mod error;
pub mod forecast;
pub mod ledger;
pub mod models;

pub use error::{Error, Result};
pub use forecast::{
    build_monthly_aggregates, classify_recommendation, BudgetModel, BudgetPredictor,
    ForecastService, ModelStore, PredictorConfig, DEFAULT_FORECAST_MONTHS,
    MIN_TRAINING_MONTHS,
};
pub use ledger::{EntryKind, Ledger, LedgerEntry, MemoryLedger};
pub use models::{
    BudgetPrediction, ExpenseRecord, FeatureVector, ForecastPoint, MonthlyAggregate,
    Recommendation, SpendingTrend, TrainOutcome, TrainingReport,
};
