//! Budget forecasting engine
//!
//! The pipeline, leaf-first: the feature builder turns expense records
//! into monthly aggregates, the trainer fits a standardize +
//! elastic-net pipeline on them, the store persists the fitted model,
//! the predictor serves clamped point estimates with a fallback policy,
//! and the service orchestrates it all against a ledger.

pub mod features;
pub mod model;
pub mod predictor;
pub mod service;
pub mod store;
pub mod trainer;

pub use features::build_monthly_aggregates;
pub use model::BudgetModel;
pub use predictor::{BudgetPredictor, PredictorConfig};
pub use service::{classify_recommendation, ForecastService, DEFAULT_FORECAST_MONTHS};
pub use store::ModelStore;
pub use trainer::MIN_TRAINING_MONTHS;
