//! Exclusion filtering of statement entries before matching.
//!
//! Recurring noise rows (fees, taxes, internal sweeps) are dropped from the
//! matching pool but retained with a reason for audit reporting.

use std::collections::HashSet;

use crate::normalize::value::normalize_text;
use crate::types::{ExclusionReason, ExclusionRecord, StatementEntry};

/// Drops statement entries whose description matches the configured exact
/// set or contains one of the configured keywords.
///
/// Configuration goes through the same normalization as entry descriptions,
/// so a lower-case, padded config string still matches normalized data.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    exact: HashSet<String>,
    contains: Vec<String>,
}

impl ExclusionFilter {
    pub fn new(exclude_exact: &[String], exclude_contains: &[String]) -> Self {
        Self {
            exact: exclude_exact.iter().map(|s| normalize_text(s)).collect(),
            contains: exclude_contains.iter().map(|s| normalize_text(s)).collect(),
        }
    }

    /// Reason this description would be excluded, if any.
    ///
    /// Exact match is checked first; keywords are checked in declaration
    /// order and the first hit wins.
    pub fn reason_for(&self, description: &str) -> Option<ExclusionReason> {
        if self.exact.contains(description) {
            return Some(ExclusionReason::Exact(description.to_string()));
        }
        self.contains
            .iter()
            .find(|keyword| description.contains(keyword.as_str()))
            .map(|keyword| ExclusionReason::Contains(keyword.clone()))
    }

    /// Split entries into the kept matching pool and the excluded audit set
    pub fn apply(&self, entries: Vec<StatementEntry>) -> (Vec<StatementEntry>, Vec<ExclusionRecord>) {
        let mut kept = Vec::with_capacity(entries.len());
        let mut excluded = Vec::new();
        for entry in entries {
            match self.reason_for(&entry.description) {
                Some(reason) => excluded.push(ExclusionRecord { entry, reason }),
                None => kept.push(entry),
            }
        }
        (kept, excluded)
    }
}
