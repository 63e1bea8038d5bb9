//! # Reconcile Core
//!
//! A bank reconciliation library that matches external bank statement rows
//! against internal ledger records, tolerating the dirty, locale-mixed data
//! real exports contain.
//!
//! ## Features
//!
//! - **Locale-tolerant parsing**: Amounts with mixed thousands/decimal
//!   separators, currency symbols, parentheses negatives and unicode dashes;
//!   day-first dates with common fallback formats
//! - **Value normalization**: Raw tables become canonical entries; per-cell
//!   parse failures degrade to absent fields instead of aborting a run
//! - **Exclusion filtering**: Recurring noise rows (fees, taxes) are dropped
//!   from the matching pool with an auditable reason
//! - **One-to-one matching**: Greedy exact-amount matching with nearest-date
//!   tie-breaking and an optional day window
//! - **Due-date partitioning**: Unmatched ledger entries split into overdue
//!   and deferred around a cutoff date
//! - **Source abstraction**: Trait-based table providers keep the core free
//!   of file and database I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use reconcile_core::{
//!     LedgerMapping, RawTable, ReconciliationConfig, ReconciliationEngine, StatementMapping,
//! };
//! use chrono::NaiveDate;
//!
//! let config = ReconciliationConfig {
//!     decimals: 2,
//!     statement: StatementMapping::single_column("Fecha", "Concepto", "Importe"),
//!     ledger: LedgerMapping::debit_credit("Emision", "Vencimiento", "Debe", "Haber"),
//!     exclude_exact: vec![],
//!     exclude_contains: vec!["IMPUESTO".to_string()],
//!     cutoff_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     max_day_window: 0,
//!     oldest_issue_first: false,
//! };
//! let engine = ReconciliationEngine::new(config).unwrap();
//! let report = engine.reconcile(&RawTable::new(), &RawTable::new()).unwrap();
//! assert_eq!(report.matched_count(), 0);
//! ```

pub mod normalize;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use normalize::{
    normalize_ledger, normalize_statement, AmountMode, LedgerMapping, StatementMapping,
};
pub use reconciliation::{
    min_day_delta, partition_by_due_date, DuePartition, ExclusionFilter, ExclusionSummary,
    MatchOutcome, Matcher, ReconciliationConfig, ReconciliationEngine, ReconciliationReport,
};
pub use traits::*;
pub use types::*;
pub use utils::memory_table::MemoryTables;
