//! Fitted budget model
//!
//! The trained pipeline reduced to its parameters: per-feature
//! standardization (mean/scale) plus elastic-net coefficients and
//! intercept. Inference is a standardize-then-dot-product; the trainer
//! owns fitting and the store owns persistence.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::FeatureVector;

/// Parameters of a fitted standardize + elastic-net pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetModel {
    /// Per-feature means fitted on the training subset
    pub feature_means: Vec<f64>,
    /// Per-feature scales (population std; 1.0 for zero-variance columns)
    pub feature_scales: Vec<f64>,
    /// Regression coefficients, positionally bound to the feature order
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl BudgetModel {
    /// Run the pipeline on one feature vector.
    ///
    /// Returns the raw regression output, which may be negative; the
    /// predictor applies the non-negativity clamp. Shape mismatches
    /// against a differently-trained artifact are inference errors.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let raw = features.to_array();

        if self.coefficients.len() != raw.len()
            || self.feature_means.len() != raw.len()
            || self.feature_scales.len() != raw.len()
        {
            return Err(Error::Inference(format!(
                "model expects {} features, got {}",
                self.coefficients.len(),
                raw.len()
            )));
        }

        let mut prediction = self.intercept;
        for (i, value) in raw.iter().enumerate() {
            let standardized = (value - self.feature_means[i]) / self.feature_scales[i];
            prediction += standardized * self.coefficients[i];
        }

        Ok(prediction)
    }
}
