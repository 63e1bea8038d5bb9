//! Greedy one-to-one matching on exact amount keys with nearest-date tie-breaking.
//!
//! The assignment is deterministic but deliberately not globally optimal: a
//! single pass over the ledger consumes statement entries first-come, with no
//! backtracking, so an early pair can take a statement entry that would have
//! been a closer date match for a later ledger entry. Callers rely on this
//! exact iteration order and tie-break rule; do not replace it with an
//! optimal bipartite assignment.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::types::{LedgerEntry, MatchPair, StatementEntry};

/// Minimum whole-day distance between a statement date and the closer of the
/// ledger entry's issue and due dates. An invalid date on one side of the
/// `min` is ignored; `None` when the statement date is invalid or both
/// ledger dates are.
pub fn min_day_delta(
    statement_date: Option<NaiveDate>,
    issue_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
) -> Option<i64> {
    let statement = statement_date?;
    let against_issue = issue_date.map(|d| (statement - d).num_days().abs());
    let against_due = due_date.map(|d| (statement - d).num_days().abs());
    match (against_issue, against_due) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Result of one matching pass
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Emitted pairs, in ledger iteration order
    pub pairs: Vec<MatchPair>,
    /// Statement entries no pair consumed, in table order
    pub unmatched_statement: Vec<StatementEntry>,
    /// Ledger entries no pair consumed, in table order
    pub unmatched_ledger: Vec<LedgerEntry>,
}

/// One-to-one matcher over canonical entry sets.
///
/// The "used" membership sets live inside [`Matcher::run`] for the duration
/// of one pass and are never exposed.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    /// Maximum allowed day-delta for a pair; 0 disables the window entirely
    pub max_day_window: i64,
    /// Walk the ledger in issue-date order (invalid dates last) instead of
    /// table order
    pub oldest_issue_first: bool,
}

impl Matcher {
    pub fn new(max_day_window: i64, oldest_issue_first: bool) -> Self {
        Self {
            max_day_window,
            oldest_issue_first,
        }
    }

    /// Run the greedy single pass described in the module docs.
    ///
    /// For each ledger entry, candidate keys are evaluated in their fixed
    /// order (debit, credit, then primary fallback) against the pool of
    /// not-yet-used statement entries sharing that exact key; the candidate
    /// with the strictly smallest day-delta wins, so on ties the first one
    /// found (earlier key, then earlier statement row) is kept.
    pub fn run(&self, ledger: &[LedgerEntry], statement: &[StatementEntry]) -> MatchOutcome {
        let mut statement_by_key: HashMap<i64, Vec<usize>> = HashMap::new();
        for (index, entry) in statement.iter().enumerate() {
            if let Some(key) = entry.amount_key {
                statement_by_key.entry(key).or_default().push(index);
            }
        }

        let mut order: Vec<usize> = (0..ledger.len()).collect();
        if self.oldest_issue_first {
            // Stable sort: entries without an issue date sink to the end in
            // table order
            order.sort_by_key(|&i| ledger[i].issue_date.unwrap_or(NaiveDate::MAX));
        }

        let mut used_statement: HashSet<usize> = HashSet::new();
        let mut used_ledger: HashSet<usize> = HashSet::new();
        let mut pairs = Vec::new();

        for &ledger_index in &order {
            let entry = &ledger[ledger_index];
            let mut best: Option<(usize, Option<i64>)> = None;

            for key in entry.candidate_keys() {
                let Some(pool) = statement_by_key.get(&key) else {
                    continue;
                };
                for &statement_index in pool {
                    if used_statement.contains(&statement_index) {
                        continue;
                    }
                    let delta = min_day_delta(
                        statement[statement_index].date,
                        entry.issue_date,
                        entry.due_date,
                    );
                    if self.max_day_window > 0
                        && delta.is_none_or(|d| d > self.max_day_window)
                    {
                        continue;
                    }
                    if best
                        .as_ref()
                        .is_none_or(|(_, current)| delta_rank(delta) < delta_rank(*current))
                    {
                        best = Some((statement_index, delta));
                    }
                }
            }

            if let Some((statement_index, day_delta)) = best {
                used_statement.insert(statement_index);
                used_ledger.insert(ledger_index);
                pairs.push(MatchPair {
                    ledger: entry.clone(),
                    statement: statement[statement_index].clone(),
                    day_delta,
                });
            }
        }

        let unmatched_statement = statement
            .iter()
            .enumerate()
            .filter(|(i, _)| !used_statement.contains(i))
            .map(|(_, e)| e.clone())
            .collect();
        let unmatched_ledger = ledger
            .iter()
            .enumerate()
            .filter(|(i, _)| !used_ledger.contains(i))
            .map(|(_, e)| e.clone())
            .collect();

        MatchOutcome {
            pairs,
            unmatched_statement,
            unmatched_ledger,
        }
    }
}

/// Unknown deltas rank after every finite delta
fn delta_rank(delta: Option<i64>) -> i64 {
    delta.unwrap_or(i64::MAX)
}
