//! Predictor
//!
//! Wraps the fitted model behind a fallback policy: an untrained
//! predictor, or any inference failure, yields a fixed default estimate
//! instead of an error. New users with zero history get a usable number
//! immediately, and prediction never crashes the caller.

use tracing::warn;

use crate::error::Result;
use crate::forecast::features::build_monthly_aggregates;
use crate::forecast::model::BudgetModel;
use crate::forecast::store::ModelStore;
use crate::forecast::trainer;
use crate::models::{ExpenseRecord, FeatureVector, TrainingReport};

/// Named defaults for the predictor's fallback policy.
///
/// Injected at construction so tests can override the priors.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Estimate returned when untrained or when inference fails
    pub fallback_budget: f64,
    /// Prior for a typical month's average transaction amount
    pub default_average_amount: f64,
    /// Prior for a typical month's distinct category count
    pub default_category_diversity: u32,
    /// Prior for a typical month's transaction count
    pub default_transaction_count: u32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            fallback_budget: 10_000.0,
            default_average_amount: 2_000.0,
            default_category_diversity: 5,
            default_transaction_count: 20,
        }
    }
}

/// Budget predictor bound to one model artifact.
///
/// Lifecycle per instance: `Untrained -> Trained` on the first
/// successful [`train`](Self::train), then `Trained -> Trained` on
/// retrain (the model is replaced wholesale, never updated
/// incrementally). There is no transition back to untrained; a process
/// restart starts over from whatever the store holds. Callers must
/// serialize `train` against `predict` on a shared instance.
pub struct BudgetPredictor {
    store: ModelStore,
    config: PredictorConfig,
    model: Option<BudgetModel>,
}

impl BudgetPredictor {
    /// Open a predictor, loading any existing artifact from the store.
    ///
    /// A missing artifact means the predictor starts untrained; a
    /// corrupt or unreadable one is a persistence error.
    pub fn open(store: ModelStore) -> Result<Self> {
        Self::open_with_config(store, PredictorConfig::default())
    }

    pub fn open_with_config(store: ModelStore, config: PredictorConfig) -> Result<Self> {
        let model = store.load()?;
        Ok(Self {
            store,
            config,
            model,
        })
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Train on historical expense records and persist the result.
    ///
    /// Fails with insufficient-data errors for an empty ledger or fewer
    /// than 3 monthly aggregates; fit and persistence failures are
    /// surfaced to the caller.
    pub fn train(&mut self, records: &[ExpenseRecord]) -> Result<TrainingReport> {
        let aggregates = build_monthly_aggregates(records)?;
        let (model, report) = trainer::fit(&aggregates)?;

        self.store.save(&model)?;
        self.model = Some(model);

        Ok(report)
    }

    /// Predict the budget for a given month and year.
    ///
    /// Missing optional inputs fall back to the configured priors;
    /// callers with real current-month statistics should always supply
    /// them. Untrained predictors and inference failures both collapse
    /// to the configured fallback budget, so this never fails. Output
    /// is clamped non-negative.
    pub fn predict(
        &self,
        month: u32,
        year: i32,
        average_amount: Option<f64>,
        category_diversity: Option<u32>,
        transaction_count: Option<u32>,
    ) -> f64 {
        let Some(model) = &self.model else {
            return self.config.fallback_budget;
        };

        let features = FeatureVector {
            month,
            year,
            average_amount: average_amount.unwrap_or(self.config.default_average_amount),
            category_diversity: category_diversity
                .unwrap_or(self.config.default_category_diversity),
            transaction_count: transaction_count
                .unwrap_or(self.config.default_transaction_count),
        };

        match model.predict(&features) {
            Ok(raw) => raw.max(0.0),
            Err(e) => {
                warn!(error = %e, "Budget inference failed, returning fallback estimate");
                self.config.fallback_budget
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store_in(dir: &tempfile::TempDir) -> ModelStore {
        ModelStore::new(dir.path().join("budget_model.json"))
    }

    fn record(date: &str, amount: f64, category: &str) -> ExpenseRecord {
        ExpenseRecord {
            amount,
            category: category.to_string(),
            timestamp: date
                .parse::<NaiveDate>()
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    fn four_months_of_records() -> Vec<ExpenseRecord> {
        let mut records = Vec::new();
        for (month, total) in [(1, 1000.0), (2, 1200.0), (3, 1100.0), (4, 1300.0)] {
            for day in 1..=4 {
                records.push(record(
                    &format!("2024-{:02}-{:02}", month, day * 5),
                    total / 4.0,
                    ["Groceries", "Dining", "Transport", "Utilities"][day - 1],
                ));
            }
        }
        records
    }

    #[test]
    fn test_untrained_predictor_returns_fallback_for_any_input() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = BudgetPredictor::open(store_in(&dir)).unwrap();

        assert!(!predictor.is_trained());
        assert_eq!(predictor.predict(1, 2025, None, None, None), 10_000.0);
        assert_eq!(
            predictor.predict(12, 1999, Some(1e9), Some(500), Some(10_000)),
            10_000.0
        );
    }

    #[test]
    fn test_fallback_budget_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let config = PredictorConfig {
            fallback_budget: 1234.5,
            ..PredictorConfig::default()
        };
        let predictor = BudgetPredictor::open_with_config(store_in(&dir), config).unwrap();

        assert_eq!(predictor.predict(6, 2024, None, None, None), 1234.5);
    }

    #[test]
    fn test_train_then_predict_is_non_negative() {
        let dir = tempfile::tempdir().unwrap();
        let mut predictor = BudgetPredictor::open(store_in(&dir)).unwrap();

        let report = predictor.train(&four_months_of_records()).unwrap();
        assert!(predictor.is_trained());
        assert_eq!(report.training_sample_count, 3);
        assert_eq!(report.test_sample_count, 1);

        let prediction = predictor.predict(5, 2024, Some(275.0), Some(4), Some(4));
        assert!(prediction >= 0.0);
        assert!(prediction < 5000.0, "prediction was {}", prediction);
    }

    #[test]
    fn test_output_clamped_when_raw_prediction_negative() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Artifact whose raw output is strongly negative for any input
        store
            .save(&BudgetModel {
                feature_means: vec![0.0; 5],
                feature_scales: vec![1.0; 5],
                coefficients: vec![0.0; 5],
                intercept: -5000.0,
            })
            .unwrap();

        let predictor = BudgetPredictor::open(store).unwrap();
        assert!(predictor.is_trained());
        assert_eq!(predictor.predict(6, 2024, None, None, None), 0.0);
    }

    #[test]
    fn test_inference_failure_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Artifact trained against a different feature shape
        store
            .save(&BudgetModel {
                feature_means: vec![0.0; 3],
                feature_scales: vec![1.0; 3],
                coefficients: vec![1.0; 3],
                intercept: 0.0,
            })
            .unwrap();

        let predictor = BudgetPredictor::open(store).unwrap();
        assert_eq!(predictor.predict(6, 2024, None, None, None), 10_000.0);
    }

    #[test]
    fn test_training_with_too_little_history_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut predictor = BudgetPredictor::open(store_in(&dir)).unwrap();

        let err = predictor.train(&[]).unwrap_err();
        assert!(matches!(err, crate::error::Error::InsufficientData(_)));

        let records = vec![
            record("2024-01-05", 100.0, "Groceries"),
            record("2024-02-05", 120.0, "Groceries"),
        ];
        let err = predictor.train(&records).unwrap_err();
        assert!(matches!(err, crate::error::Error::InsufficientData(_)));
        assert!(!predictor.is_trained());
    }

    #[test]
    fn test_reopened_predictor_reuses_persisted_model() {
        let dir = tempfile::tempdir().unwrap();

        let mut predictor = BudgetPredictor::open(store_in(&dir)).unwrap();
        predictor.train(&four_months_of_records()).unwrap();
        let before = predictor.predict(5, 2024, Some(275.0), Some(4), Some(4));

        // Simulated restart: a fresh instance loads the artifact
        let reopened = BudgetPredictor::open(store_in(&dir)).unwrap();
        assert!(reopened.is_trained());
        let after = reopened.predict(5, 2024, Some(275.0), Some(4), Some(4));

        assert_eq!(before, after);
    }
}
