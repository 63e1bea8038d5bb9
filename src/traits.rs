//! Traits for integrating external data sources

use async_trait::async_trait;

use crate::types::{RawTable, ReconcileResult};

/// Source abstraction for the two raw tables of a run.
///
/// File upload, sheet selection and header handling live outside the core;
/// whatever implements this trait (a web form backend, a CLI reading
/// spreadsheets, a fixture in tests) delivers the statement and ledger tables
/// already shaped as [`RawTable`]s. The reconciliation itself is synchronous;
/// only the handover is async so slow collaborators do not constrain callers.
#[async_trait]
pub trait TableProvider: Send + Sync {
    /// Fetch the external bank statement table
    async fn statement_table(&self) -> ReconcileResult<RawTable>;

    /// Fetch the internal system ledger table
    async fn ledger_table(&self) -> ReconcileResult<RawTable>;
}
