//! Domain models for Outlay

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single expense from the transaction ledger.
///
/// Immutable input to the forecasting engine; the engine only reads
/// snapshots owned by the ledger collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Spent amount, non-negative
    pub amount: f64,
    /// Short category label (e.g. "Groceries")
    pub category: String,
    /// When the expense occurred (timezone-naive)
    pub timestamp: NaiveDateTime,
}

/// Summarized statistics for all expense records in one calendar month.
///
/// One aggregate exists per (year, month) bucket that has at least one
/// record; empty months produce no aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    /// Sum of amounts, the regression target
    pub total_expense: f64,
    /// Mean amount per transaction
    pub average_amount: f64,
    /// Number of transactions in the month
    pub transaction_count: u32,
    /// Number of distinct category labels seen in the month
    pub category_diversity: u32,
}

/// The fixed-order numeric input consumed by the regression model.
///
/// Field order is a contract: the trained model's coefficients are
/// positionally bound to `[month, year, average_amount,
/// category_diversity, transaction_count]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub month: u32,
    pub year: i32,
    pub average_amount: f64,
    pub category_diversity: u32,
    pub transaction_count: u32,
}

impl FeatureVector {
    /// Number of features in the vector
    pub const LEN: usize = 5;

    /// Flatten to the positional array the model consumes
    pub fn to_array(self) -> [f64; Self::LEN] {
        [
            self.month as f64,
            self.year as f64,
            self.average_amount,
            self.category_diversity as f64,
            self.transaction_count as f64,
        ]
    }
}

impl From<&MonthlyAggregate> for FeatureVector {
    fn from(agg: &MonthlyAggregate) -> Self {
        Self {
            month: agg.month,
            year: agg.year,
            average_amount: agg.average_amount,
            category_diversity: agg.category_diversity,
            transaction_count: agg.transaction_count,
        }
    }
}

/// Fit quality reported after a successful training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub mean_absolute_error: f64,
    /// Coefficient of determination; may be negative for a degenerate fit
    pub r_squared: f64,
    pub training_sample_count: usize,
    pub test_sample_count: usize,
}

/// Result of a training request against a user's history.
///
/// Serializes as either the report object or the "not enough data"
/// message object, matching the training output boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrainOutcome {
    Trained(TrainingReport),
    InsufficientHistory {
        message: String,
        training_samples: usize,
    },
}

/// Qualitative spend recommendation for the upcoming month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Increase,
    Maintain,
    Reduce,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "Increase",
            Self::Maintain => "Maintain",
            Self::Reduce => "Reduce",
        }
    }
}

impl std::str::FromStr for Recommendation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "increase" => Ok(Self::Increase),
            "maintain" => Ok(Self::Maintain),
            "reduce" => Ok(Self::Reduce),
            _ => Err(format!("Unknown recommendation: {}", s)),
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Next-month budget prediction with recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPrediction {
    pub predicted_budget: f64,
    pub current_month_spending: f64,
    pub next_month: u32,
    pub next_year: i32,
    pub recommendation: Recommendation,
}

/// One future month's predicted spending, part of an ordered projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: u32,
    pub year: i32,
    pub predicted_budget: f64,
    /// Human-readable label, e.g. "January 2025"
    pub month_label: String,
}

/// One month of historical spending for trend analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub month: u32,
    pub year: i32,
    pub total_expense: f64,
    pub total_income: f64,
    pub net_savings: f64,
    pub month_label: String,
}
