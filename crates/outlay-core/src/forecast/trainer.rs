//! Model Trainer
//!
//! Fits the standardize + elastic-net pipeline on monthly aggregates and
//! evaluates it on a held-out subset. All hyperparameters are fixed
//! constants; training is deterministic for a given record set because
//! the train/test split uses a fixed seed.

use linfa::prelude::*;
use linfa_elasticnet::ElasticNet;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::models::{FeatureVector, MonthlyAggregate, TrainingReport};

use super::model::BudgetModel;

/// Minimum monthly aggregates required for a train/evaluate cycle
pub const MIN_TRAINING_MONTHS: usize = 3;

/// Fixed seed for the randomized train/test split
const SPLIT_SEED: u64 = 42;

/// Held-out fraction of the monthly aggregates
const TEST_FRACTION: f64 = 0.2;

/// Elastic-net penalty strength (alpha)
const PENALTY: f64 = 0.1;

/// Elastic-net L1/L2 mix (1.0 = pure lasso)
const L1_RATIO: f64 = 0.7;

/// Columns with no variance in the training subset keep scale 1.0
const MIN_SCALE: f64 = 1e-12;

/// Fit the budget model on monthly aggregates.
///
/// Splits the aggregates 80/20 with a seeded shuffle, standardizes the
/// feature columns on the training subset, fits the elastic net, and
/// evaluates MAE and R-squared on the held-out rows. The split is
/// randomized rather than chronological; with very few months the
/// held-out rows can be unrepresentative and R-squared degenerate
/// (negative R-squared is returned as-is, not treated as an error).
pub fn fit(aggregates: &[MonthlyAggregate]) -> Result<(BudgetModel, TrainingReport)> {
    if aggregates.len() < MIN_TRAINING_MONTHS {
        return Err(Error::InsufficientData(
            "need at least 3 months of data".to_string(),
        ));
    }

    let (train, test) = split_aggregates(aggregates);
    let (means, scales) = fit_standardizer(&train);

    let n_features = FeatureVector::LEN;
    let mut x_train = Array2::<f64>::zeros((train.len(), n_features));
    let mut y_train = Array1::<f64>::zeros(train.len());

    for (row, agg) in train.iter().enumerate() {
        let raw = FeatureVector::from(*agg).to_array();
        for col in 0..n_features {
            x_train[[row, col]] = (raw[col] - means[col]) / scales[col];
        }
        y_train[row] = agg.total_expense;
    }

    let dataset = Dataset::new(x_train, y_train);
    let fitted = ElasticNet::params()
        .penalty(PENALTY)
        .l1_ratio(L1_RATIO)
        .fit(&dataset)
        .map_err(|e| {
            error!(error = %e, "Elastic-net fit failed");
            Error::Training(format!("elastic-net fit failed: {}", e))
        })?;

    let model = BudgetModel {
        feature_means: means,
        feature_scales: scales,
        coefficients: fitted.hyperplane().to_vec(),
        intercept: fitted.intercept(),
    };

    let (mae, r_squared) = evaluate(&model, &test)?;

    info!(
        mae,
        r_squared,
        training_samples = train.len(),
        test_samples = test.len(),
        "Model trained",
    );

    let report = TrainingReport {
        mean_absolute_error: mae,
        r_squared,
        training_sample_count: train.len(),
        test_sample_count: test.len(),
    };

    Ok((model, report))
}

/// Seeded shuffle, then hold out ceil(20%) of the rows for evaluation
fn split_aggregates(
    aggregates: &[MonthlyAggregate],
) -> (Vec<&MonthlyAggregate>, Vec<&MonthlyAggregate>) {
    let mut indices: Vec<usize> = (0..aggregates.len()).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let test_count = ((aggregates.len() as f64) * TEST_FRACTION).ceil() as usize;

    let test = indices[..test_count]
        .iter()
        .map(|&i| &aggregates[i])
        .collect();
    let train = indices[test_count..]
        .iter()
        .map(|&i| &aggregates[i])
        .collect();

    (train, test)
}

/// Per-column mean and population std over the training subset
fn fit_standardizer(train: &[&MonthlyAggregate]) -> (Vec<f64>, Vec<f64>) {
    let n_features = FeatureVector::LEN;
    let n = train.len() as f64;

    let mut means = vec![0.0; n_features];
    for agg in train {
        let raw = FeatureVector::from(*agg).to_array();
        for col in 0..n_features {
            means[col] += raw[col];
        }
    }
    for mean in means.iter_mut() {
        *mean /= n;
    }

    let mut scales = vec![0.0; n_features];
    for agg in train {
        let raw = FeatureVector::from(*agg).to_array();
        for col in 0..n_features {
            let diff = raw[col] - means[col];
            scales[col] += diff * diff;
        }
    }
    for scale in scales.iter_mut() {
        *scale = (*scale / n).sqrt();
        if *scale < MIN_SCALE {
            *scale = 1.0;
        }
    }

    (means, scales)
}

/// MAE and R-squared over the held-out rows.
///
/// R-squared of a zero-variance test target is reported as 0.0.
fn evaluate(model: &BudgetModel, test: &[&MonthlyAggregate]) -> Result<(f64, f64)> {
    let mut abs_errors = 0.0;
    let mut predictions = Vec::with_capacity(test.len());

    for agg in test {
        let prediction = model.predict(&FeatureVector::from(*agg))?;
        abs_errors += (agg.total_expense - prediction).abs();
        predictions.push(prediction);
    }

    let n = test.len() as f64;
    let mae = abs_errors / n;

    let target_mean: f64 = test.iter().map(|a| a.total_expense).sum::<f64>() / n;
    let ss_tot: f64 = test
        .iter()
        .map(|a| (a.total_expense - target_mean).powi(2))
        .sum();
    let ss_res: f64 = test
        .iter()
        .zip(&predictions)
        .map(|(a, p)| (a.total_expense - p).powi(2))
        .sum();

    let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

    Ok((mae, r_squared))
}
