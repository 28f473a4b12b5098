//! Ledger access for the forecasting engine
//!
//! The transaction ledger is an external collaborator; the engine only
//! reads snapshots of it. `Ledger` is the seam, `MemoryLedger` the
//! in-process implementation backed by CSV files or in-memory entries.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::ExpenseRecord;

/// Whether a ledger entry is money out or money in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown entry kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub amount: f64,
    pub category: String,
    pub timestamp: NaiveDateTime,
    pub kind: EntryKind,
}

/// Read access to a user's transaction ledger.
///
/// Date ranges are half-open: `[start, end)`.
pub trait Ledger {
    /// Expense records with timestamps in the range
    fn expenses_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ExpenseRecord>>;

    /// Total income recorded in the range
    fn income_between(&self, start: NaiveDate, end: NaiveDate) -> Result<f64>;
}

/// Ledger held entirely in memory, optionally loaded from CSV
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    entries: Vec<LedgerEntry>,
}

/// CSV row shape: `date,amount,category,kind`
///
/// `kind` may be omitted and defaults to `expense`.
#[derive(Debug, Deserialize)]
struct LedgerRow {
    date: NaiveDate,
    amount: f64,
    category: String,
    #[serde(default)]
    kind: EntryKind,
}

impl MemoryLedger {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    /// Parse ledger entries from CSV data
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();

        for row in csv_reader.deserialize() {
            let row: LedgerRow = row?;
            entries.push(LedgerEntry {
                amount: row.amount,
                category: row.category,
                timestamp: row.date.and_hms_opt(0, 0, 0).unwrap(),
                kind: row.kind,
            });
        }

        debug!(count = entries.len(), "Loaded ledger entries from CSV");
        Ok(Self::new(entries))
    }

    /// Load a ledger CSV file from disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv(file)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}

impl Ledger for MemoryLedger {
    fn expenses_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| {
                e.kind == EntryKind::Expense
                    && e.timestamp.date() >= start
                    && e.timestamp.date() < end
            })
            .map(|e| ExpenseRecord {
                amount: e.amount,
                category: e.category.clone(),
                timestamp: e.timestamp,
            })
            .collect())
    }

    fn income_between(&self, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        Ok(self
            .entries
            .iter()
            .filter(|e| {
                e.kind == EntryKind::Income
                    && e.timestamp.date() >= start
                    && e.timestamp.date() < end
            })
            .map(|e| e.amount)
            .sum())
    }
}
