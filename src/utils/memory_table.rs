//! In-memory table provider for testing and development

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::TableProvider;
use crate::types::{RawRow, RawTable, ReconcileResult};

/// Table provider backed by in-memory tables, for testing and small
/// interactive runs where the data is already loaded
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    statement: Arc<RwLock<RawTable>>,
    ledger: Arc<RwLock<RawTable>>,
}

impl MemoryTables {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider preloaded with both tables
    pub fn with_tables(statement: RawTable, ledger: RawTable) -> Self {
        Self {
            statement: Arc::new(RwLock::new(statement)),
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn push_statement_row(&self, row: RawRow) {
        if let Ok(mut table) = self.statement.write() {
            table.push_row(row);
        }
    }

    pub fn push_ledger_row(&self, row: RawRow) {
        if let Ok(mut table) = self.ledger.write() {
            table.push_row(row);
        }
    }

    /// Clear both tables (useful for testing)
    pub fn clear(&self) {
        if let Ok(mut table) = self.statement.write() {
            *table = RawTable::new();
        }
        if let Ok(mut table) = self.ledger.write() {
            *table = RawTable::new();
        }
    }
}

#[async_trait]
impl TableProvider for MemoryTables {
    async fn statement_table(&self) -> ReconcileResult<RawTable> {
        Ok(self
            .statement
            .read()
            .map(|table| table.clone())
            .unwrap_or_default())
    }

    async fn ledger_table(&self) -> ReconcileResult<RawTable> {
        Ok(self
            .ledger
            .read()
            .map(|table| table.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn row(description: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert("Concepto".to_string(), CellValue::from(description));
        row
    }

    #[tokio::test]
    async fn serves_pushed_rows() {
        let tables = MemoryTables::new();
        tables.push_statement_row(row("PAGO"));
        tables.push_ledger_row(row("FACTURA"));
        tables.push_ledger_row(row("NOTA"));

        assert_eq!(tables.statement_table().await.unwrap().len(), 1);
        assert_eq!(tables.ledger_table().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_both_tables() {
        let tables = MemoryTables::with_tables(
            RawTable::from_rows(vec![row("A")]),
            RawTable::from_rows(vec![row("B")]),
        );
        tables.clear();

        assert!(tables.statement_table().await.unwrap().is_empty());
        assert!(tables.ledger_table().await.unwrap().is_empty());
    }
}
