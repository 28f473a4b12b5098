//! Feature Builder
//!
//! Turns the irregular, time-stamped expense ledger into one row of
//! aggregate statistics per calendar month. Aggregates are the training
//! rows: `total_expense` is the regression target, the remaining fields
//! form the feature vector.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;

use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, MonthlyAggregate};

/// Group expense records into per-month aggregates.
///
/// One aggregate per (year, month) bucket with at least one record;
/// months with no records produce no row (no zero-filling). Callers
/// must not rely on the ordering of the returned rows.
pub fn build_monthly_aggregates(records: &[ExpenseRecord]) -> Result<Vec<MonthlyAggregate>> {
    if records.is_empty() {
        return Err(Error::InsufficientData("no expense records provided".to_string()));
    }

    let mut buckets: BTreeMap<(i32, u32), Vec<&ExpenseRecord>> = BTreeMap::new();
    for record in records {
        let key = (record.timestamp.year(), record.timestamp.month());
        buckets.entry(key).or_default().push(record);
    }

    let aggregates = buckets
        .into_iter()
        .map(|((year, month), group)| {
            let total_expense: f64 = group.iter().map(|r| r.amount).sum();
            let transaction_count = group.len() as u32;
            let average_amount = total_expense / group.len() as f64;
            let categories: HashSet<&str> =
                group.iter().map(|r| r.category.as_str()).collect();

            MonthlyAggregate {
                year,
                month,
                total_expense,
                average_amount,
                transaction_count,
                category_diversity: categories.len() as u32,
            }
        })
        .collect();

    Ok(aggregates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, amount: f64, category: &str) -> ExpenseRecord {
        ExpenseRecord {
            amount,
            category: category.to_string(),
            timestamp: date
                .parse::<NaiveDate>()
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_empty_input_is_insufficient_data() {
        let err = build_monthly_aggregates(&[]).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_single_month_aggregate() {
        let records = vec![
            record("2024-03-05", 100.0, "Groceries"),
            record("2024-03-12", 50.0, "Dining"),
            record("2024-03-20", 150.0, "Groceries"),
        ];

        let aggregates = build_monthly_aggregates(&records).unwrap();
        assert_eq!(aggregates.len(), 1);

        let agg = &aggregates[0];
        assert_eq!(agg.year, 2024);
        assert_eq!(agg.month, 3);
        assert!((agg.total_expense - 300.0).abs() < 1e-9);
        assert!((agg.average_amount - 100.0).abs() < 1e-9);
        assert_eq!(agg.transaction_count, 3);
        assert_eq!(agg.category_diversity, 2);
    }

    #[test]
    fn test_groups_by_year_and_month() {
        // Same month number in different years must not merge
        let records = vec![
            record("2023-12-10", 100.0, "Gifts"),
            record("2024-12-10", 200.0, "Gifts"),
            record("2024-01-10", 50.0, "Groceries"),
        ];

        let aggregates = build_monthly_aggregates(&records).unwrap();
        assert_eq!(aggregates.len(), 3);

        let dec_2023 = aggregates
            .iter()
            .find(|a| a.year == 2023 && a.month == 12)
            .unwrap();
        assert!((dec_2023.total_expense - 100.0).abs() < 1e-9);

        let dec_2024 = aggregates
            .iter()
            .find(|a| a.year == 2024 && a.month == 12)
            .unwrap();
        assert!((dec_2024.total_expense - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_zero_filling_of_empty_months() {
        // January and April present, February and March absent
        let records = vec![
            record("2024-01-05", 100.0, "Groceries"),
            record("2024-04-05", 100.0, "Groceries"),
        ];

        let aggregates = build_monthly_aggregates(&records).unwrap();
        assert_eq!(aggregates.len(), 2);
        assert!(aggregates.iter().all(|a| a.month == 1 || a.month == 4));
    }

    #[test]
    fn test_category_diversity_counts_distinct_labels() {
        let records = vec![
            record("2024-05-01", 10.0, "Dining"),
            record("2024-05-02", 10.0, "Dining"),
            record("2024-05-03", 10.0, "Dining"),
        ];

        let aggregates = build_monthly_aggregates(&records).unwrap();
        assert_eq!(aggregates[0].category_diversity, 1);
        assert_eq!(aggregates[0].transaction_count, 3);
    }
}
