//! Forecasting Orchestrator
//!
//! Composes the ledger, feature builder, trainer, and predictor into the
//! caller-facing forecasting operations: auto-train-on-demand,
//! next-month prediction with a spend recommendation, multi-month
//! projection with calendar rollover, and historical spending trends.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::warn;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{
    BudgetPrediction, ForecastPoint, Recommendation, SpendingTrend, TrainOutcome,
};

use super::predictor::BudgetPredictor;

/// Months of history pulled from the ledger for a training cycle
const HISTORY_MONTHS_BACK: i64 = 12;

/// Default projection horizon in months
pub const DEFAULT_FORECAST_MONTHS: u32 = 3;

/// Current-month statistics used as the feature proxy for future months
#[derive(Debug, Clone, Copy)]
struct MonthStats {
    average_amount: f64,
    category_diversity: u32,
    transaction_count: u32,
}

/// Classify the spend recommendation for the upcoming month.
///
/// Checks are ordered: clearly-higher predictions win first, then the
/// within-10% band maintains, everything else reduces.
pub fn classify_recommendation(
    predicted_budget: f64,
    current_month_spending: f64,
) -> Recommendation {
    if predicted_budget > current_month_spending * 1.1 {
        Recommendation::Increase
    } else if (predicted_budget - current_month_spending).abs() < current_month_spending * 0.1 {
        Recommendation::Maintain
    } else {
        Recommendation::Reduce
    }
}

/// Forecasting service for one user's ledger and predictor
pub struct ForecastService<L: Ledger> {
    ledger: L,
    predictor: BudgetPredictor,
}

impl<L: Ledger> ForecastService<L> {
    pub fn new(ledger: L, predictor: BudgetPredictor) -> Self {
        Self { ledger, predictor }
    }

    pub fn predictor(&self) -> &BudgetPredictor {
        &self.predictor
    }

    /// Train the model from the trailing year of ledger history.
    ///
    /// Fewer than 3 historical records reports insufficient history
    /// rather than failing; fit and persistence errors are surfaced.
    pub fn train_from_history(&mut self, today: NaiveDate) -> Result<TrainOutcome> {
        let start = today - Duration::days(HISTORY_MONTHS_BACK * 30);
        let records = self
            .ledger
            .expenses_between(start, today + Duration::days(1))?;

        if records.len() < 3 {
            return Ok(TrainOutcome::InsufficientHistory {
                message: "Not enough data to train model".to_string(),
                training_samples: records.len(),
            });
        }

        self.predictor.train(&records).map(TrainOutcome::Trained)
    }

    /// Auto-train-on-demand: attempt a training cycle if the predictor
    /// is untrained, ignoring failures so the request proceeds with the
    /// fallback predictor. Expected for brand-new users.
    fn ensure_trained(&mut self, today: NaiveDate) {
        if self.predictor.is_trained() {
            return;
        }

        if let Err(e) = self.train_from_history(today) {
            warn!(error = %e, "Auto-training failed, proceeding untrained");
        }
    }

    /// Predict next month's budget and classify a recommendation
    /// against current-month spending.
    pub fn predict_next_month(&mut self, today: NaiveDate) -> Result<BudgetPrediction> {
        self.ensure_trained(today);

        let (stats, current_month_spending) = self.current_month_stats(today)?;
        let (next_month, next_year) = next_month(today.year(), today.month());

        let predicted_budget = self.predictor.predict(
            next_month,
            next_year,
            Some(stats.average_amount),
            Some(stats.category_diversity),
            Some(stats.transaction_count),
        );

        Ok(BudgetPrediction {
            predicted_budget,
            current_month_spending,
            next_month,
            next_year,
            recommendation: classify_recommendation(predicted_budget, current_month_spending),
        })
    }

    /// Project spending for the next `months_ahead` months.
    ///
    /// Each step advances the calendar month (with year rollover) but
    /// reuses the same current-month statistics as the feature proxy,
    /// so far-future points differ only through the month/year features.
    /// Points are chronological ascending starting at next month.
    pub fn forecast(
        &mut self,
        today: NaiveDate,
        months_ahead: u32,
    ) -> Result<Vec<ForecastPoint>> {
        self.ensure_trained(today);

        let (stats, _) = self.current_month_stats(today)?;
        let mut points = Vec::with_capacity(months_ahead as usize);

        for step in 1..=months_ahead {
            let (month, year) = add_months(today.year(), today.month(), step);

            let predicted_budget = self.predictor.predict(
                month,
                year,
                Some(stats.average_amount),
                Some(stats.category_diversity),
                Some(stats.transaction_count),
            );

            points.push(ForecastPoint {
                month,
                year,
                predicted_budget,
                month_label: month_label(year, month),
            });
        }

        Ok(points)
    }

    /// Monthly expense/income totals walking back from the current
    /// month, returned oldest first.
    pub fn spending_trends(
        &self,
        today: NaiveDate,
        months_back: u32,
    ) -> Result<Vec<SpendingTrend>> {
        let mut trends = Vec::with_capacity(months_back as usize);

        for step in 0..months_back {
            let mut month = today.month() as i32 - step as i32;
            let mut year = today.year();
            while month <= 0 {
                month += 12;
                year -= 1;
            }
            let month = month as u32;

            let start = month_start(year, month);
            let end = month_start_after(year, month);

            let total_expense: f64 = self
                .ledger
                .expenses_between(start, end)?
                .iter()
                .map(|r| r.amount)
                .sum();
            let total_income = self.ledger.income_between(start, end)?;

            trends.push(SpendingTrend {
                month,
                year,
                total_expense,
                total_income,
                net_savings: total_income - total_expense,
                month_label: month_label(year, month),
            });
        }

        trends.reverse();
        Ok(trends)
    }

    /// Aggregate statistics for the current calendar month.
    ///
    /// An empty month falls back to the configured priors for average
    /// amount and diversity; the transaction count stays at the true
    /// zero. Also returns total current-month spending.
    fn current_month_stats(&self, today: NaiveDate) -> Result<(MonthStats, f64)> {
        let start = month_start(today.year(), today.month());
        let end = month_start_after(today.year(), today.month());
        let records = self.ledger.expenses_between(start, end)?;

        let total: f64 = records.iter().map(|r| r.amount).sum();
        let config = self.predictor.config();

        let stats = if records.is_empty() {
            MonthStats {
                average_amount: config.default_average_amount,
                category_diversity: config.default_category_diversity,
                transaction_count: 0,
            }
        } else {
            let categories: std::collections::HashSet<&str> =
                records.iter().map(|r| r.category.as_str()).collect();
            MonthStats {
                average_amount: total / records.len() as f64,
                category_diversity: categories.len() as u32,
                transaction_count: records.len() as u32,
            }
        };

        Ok((stats, total))
    }
}

/// First day of the given month
fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// First day of the month after the given month
fn month_start_after(year: i32, month: u32) -> NaiveDate {
    let (month, year) = next_month(year, month);
    month_start(year, month)
}

/// The calendar month following (year, month), with December rollover
fn next_month(year: i32, month: u32) -> (u32, i32) {
    if month < 12 {
        (month + 1, year)
    } else {
        (1, year + 1)
    }
}

/// Add `steps` months to (year, month) and normalize
fn add_months(year: i32, month: u32, steps: u32) -> (u32, i32) {
    let mut month = month + steps;
    let mut year = year;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    (month, year)
}

/// Human-readable label like "January 2025"
fn month_label(year: i32, month: u32) -> String {
    month_start(year, month).format("%B %Y").to_string()
}
