//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single raw cell value as handed over by the I/O collaborator.
///
/// The core never reads files itself; whatever uploaded or queried the source
/// tables converts each cell into one of these variants. Text cells go through
/// the locale-tolerant parsers, typed cells are used directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Free-form text (amounts and dates in arbitrary locale formats land here)
    Text(String),
    /// A value the source already parsed as a number
    Number(f64),
    /// A value the source already parsed as a calendar date
    Date(NaiveDate),
    /// Blank or null cell
    Empty,
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// One raw row: column name to cell value
pub type RawRow = HashMap<String, CellValue>;

/// An ordered table of raw rows, immutable once handed to the core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows in source order
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Append a row, preserving source order
    pub fn push_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    /// Rows in source order
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One normalized transaction from the external bank record.
///
/// Per-value parse failures degrade to `None` fields; the entry itself is
/// always constructed and keeps flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Stable index into the raw statement table, for join-back
    pub row: usize,
    /// Transaction date, `None` if the cell could not be parsed
    pub date: Option<NaiveDate>,
    /// Trimmed, upper-cased description
    pub description: String,
    /// Parsed amount with its sign preserved
    pub signed_amount: Option<BigDecimal>,
    /// Integer-scaled amount used for exact-equality matching.
    /// Always computed together with `signed_amount`: both are `Some` or both `None`.
    pub amount_key: Option<i64>,
}

/// One normalized transaction from the internal system record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Stable index into the raw ledger table, for join-back
    pub row: usize,
    /// Issue date, `None` if unparseable
    pub issue_date: Option<NaiveDate>,
    /// Due date, `None` if unparseable
    pub due_date: Option<NaiveDate>,
    /// Signed amount backing the primary key (single-column value, or the
    /// debit/credit combination in debit/credit mode)
    pub signed_amount: Option<BigDecimal>,
    /// Key derived from `signed_amount`; the matching fallback when no
    /// debit/credit key exists
    pub primary_key: Option<i64>,
    /// Key for a present, non-zero debit magnitude, treated as positive
    pub debit_key: Option<i64>,
    /// Key for a present, non-zero credit magnitude, treated as negative
    pub credit_key: Option<i64>,
}

impl LedgerEntry {
    /// Candidate amount keys in the fixed order the matcher evaluates them:
    /// debit key first, then credit key, falling back to the primary key
    /// when neither side carries one.
    pub fn candidate_keys(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(2);
        if let Some(k) = self.debit_key {
            keys.push(k);
        }
        if let Some(k) = self.credit_key {
            keys.push(k);
        }
        if keys.is_empty() {
            if let Some(k) = self.primary_key {
                keys.push(k);
            }
        }
        keys
    }
}

/// A matched (ledger entry, statement entry) pair.
///
/// Each ledger entry and each statement entry appears in at most one pair
/// across a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub ledger: LedgerEntry,
    pub statement: StatementEntry,
    /// Minimum whole-day distance between the statement date and the closer
    /// of issue/due date; `None` when no valid date pair existed
    pub day_delta: Option<i64>,
}

/// Why a statement entry was excluded before matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// Description matched the exact exclusion set
    Exact(String),
    /// Description contained the given keyword
    Contains(String),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Exact(description) => write!(f, "EXACT:{}", description),
            ExclusionReason::Contains(keyword) => write!(f, "CONTAINS:{}", keyword),
        }
    }
}

/// An excluded statement entry plus its reason, kept for audit reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRecord {
    pub entry: StatementEntry,
    pub reason: ExclusionReason,
}

/// Errors that can occur while setting up a reconciliation run.
///
/// These are configuration-level and fatal: they are reported before any row
/// is processed. Dirty cell values are never errors; they degrade to `None`
/// fields on the owning entry instead.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Missing column mapping: {0}")]
    MissingMapping(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Source error: {0}")]
    Source(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
