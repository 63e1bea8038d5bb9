//! Due-date partitioning of unmatched ledger entries.

use chrono::NaiveDate;

use crate::types::LedgerEntry;

/// Unmatched ledger entries split around the cutoff date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuePartition {
    /// Due on or before the cutoff
    pub overdue: Vec<LedgerEntry>,
    /// Due after the cutoff (possibly deferred payments)
    pub deferred: Vec<LedgerEntry>,
}

impl DuePartition {
    /// Entries that landed in either bucket
    pub fn total_classified(&self) -> usize {
        self.overdue.len() + self.deferred.len()
    }
}

/// Partition strictly by due date: `due <= cutoff` is overdue, `due > cutoff`
/// is deferred. Entries without a valid due date cannot be classified and
/// appear in neither bucket; they stay visible only in the raw unmatched set
/// upstream.
pub fn partition_by_due_date(entries: &[LedgerEntry], cutoff: NaiveDate) -> DuePartition {
    let mut partition = DuePartition::default();
    for entry in entries {
        match entry.due_date {
            Some(due) if due <= cutoff => partition.overdue.push(entry.clone()),
            Some(_) => partition.deferred.push(entry.clone()),
            None => {}
        }
    }
    partition
}
