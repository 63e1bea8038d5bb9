//! Pipeline orchestrator: normalize, filter, match, partition.
//!
//! One run is a pure, fully sequential computation over the two in-memory
//! tables. Setup problems (a column mapping missing for the selected amount
//! mode, an out-of-range parameter) fail before any row is processed; dirty
//! cell values never fail a run.

use bigdecimal::{BigDecimal, Zero};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::normalize::{normalize_ledger, normalize_statement, LedgerMapping, StatementMapping};
use crate::reconciliation::filter::ExclusionFilter;
use crate::reconciliation::matcher::Matcher;
use crate::reconciliation::partition::partition_by_due_date;
use crate::traits::TableProvider;
use crate::types::{
    ExclusionRecord, LedgerEntry, MatchPair, RawTable, ReconcileResult, StatementEntry,
};
use crate::utils::validation;

/// All run parameters supplied by the configuration surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Amount scale for key derivation, 0 to 4
    pub decimals: u32,
    pub statement: StatementMapping,
    pub ledger: LedgerMapping,
    /// Descriptions to drop from the statement before matching (exact match)
    pub exclude_exact: Vec<String>,
    /// Keywords to drop by substring match, checked in declaration order
    pub exclude_contains: Vec<String>,
    /// Reference date splitting unmatched ledger entries into overdue/deferred
    pub cutoff_date: NaiveDate,
    /// Maximum day-delta for a pair; 0 disables the window
    pub max_day_window: i64,
    /// Walk the ledger oldest issue date first instead of table order
    pub oldest_issue_first: bool,
}

impl ReconciliationConfig {
    /// Validate every parameter once, before any parsing
    pub fn validate(&self) -> ReconcileResult<()> {
        validation::validate_decimals(self.decimals)?;
        validation::validate_day_window(self.max_day_window)?;
        validation::validate_exclusion_keywords(&self.exclude_contains)?;
        self.statement.validate()?;
        self.ledger.validate()?;
        Ok(())
    }
}

/// One line of the exclusion audit: how many statement rows a description
/// accounted for and their parsed total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionSummary {
    pub description: String,
    pub count: usize,
    pub total: BigDecimal,
}

/// Everything a run produces, for downstream reporting and export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub run_id: Uuid,
    pub reconciled_at: NaiveDateTime,
    /// Matched pairs in emission order
    pub pairs: Vec<MatchPair>,
    /// Statement entries that survived exclusion but found no pair
    pub unmatched_statement: Vec<StatementEntry>,
    /// Ledger entries that found no pair
    pub unmatched_ledger: Vec<LedgerEntry>,
    /// Unmatched ledger entries due on or before the cutoff
    pub overdue: Vec<LedgerEntry>,
    /// Unmatched ledger entries due after the cutoff
    pub deferred: Vec<LedgerEntry>,
    /// Statement entries dropped before matching, with reasons
    pub exclusions: Vec<ExclusionRecord>,
    /// Statement entries that entered the matcher
    pub statement_total: usize,
    /// Ledger entries that entered the matcher
    pub ledger_total: usize,
}

impl ReconciliationReport {
    pub fn matched_count(&self) -> usize {
        self.pairs.len()
    }

    /// Group exclusion records by description into count/total lines,
    /// ascending by total, for the audit section of a report
    pub fn exclusion_summary(&self) -> Vec<ExclusionSummary> {
        let mut grouped: BTreeMap<&str, (usize, BigDecimal)> = BTreeMap::new();
        for record in &self.exclusions {
            let slot = grouped
                .entry(record.entry.description.as_str())
                .or_insert_with(|| (0, BigDecimal::zero()));
            slot.0 += 1;
            if let Some(amount) = &record.entry.signed_amount {
                slot.1 += amount;
            }
        }
        let mut summary: Vec<ExclusionSummary> = grouped
            .into_iter()
            .map(|(description, (count, total))| ExclusionSummary {
                description: description.to_string(),
                count,
                total,
            })
            .collect();
        summary.sort_by(|a, b| a.total.cmp(&b.total));
        summary
    }

    pub fn summary(&self) -> String {
        format!(
            "Reconciliation {}: {} matched, {} statement-only, {} overdue, {} deferred, {} excluded",
            self.run_id,
            self.matched_count(),
            self.unmatched_statement.len(),
            self.overdue.len(),
            self.deferred.len(),
            self.exclusions.len(),
        )
    }
}

/// The reconciliation pipeline with a validated configuration
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    config: ReconciliationConfig,
}

impl ReconciliationEngine {
    /// Build an engine, rejecting bad configuration before any table is read
    pub fn new(config: ReconciliationConfig) -> ReconcileResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Run the full pipeline over two raw tables:
    /// normalize both sides, exclusion-filter the statement side, match
    /// one-to-one, then partition the unmatched ledger entries at the cutoff.
    pub fn reconcile(
        &self,
        statement: &RawTable,
        ledger: &RawTable,
    ) -> ReconcileResult<ReconciliationReport> {
        let statement_entries =
            normalize_statement(statement, &self.config.statement, self.config.decimals)?;
        let (kept, exclusions) =
            ExclusionFilter::new(&self.config.exclude_exact, &self.config.exclude_contains)
                .apply(statement_entries);

        let ledger_entries = normalize_ledger(ledger, &self.config.ledger, self.config.decimals)?;

        let outcome = Matcher::new(self.config.max_day_window, self.config.oldest_issue_first)
            .run(&ledger_entries, &kept);

        let partition = partition_by_due_date(&outcome.unmatched_ledger, self.config.cutoff_date);

        Ok(ReconciliationReport {
            run_id: Uuid::new_v4(),
            reconciled_at: chrono::Utc::now().naive_utc(),
            statement_total: kept.len(),
            ledger_total: ledger_entries.len(),
            pairs: outcome.pairs,
            unmatched_statement: outcome.unmatched_statement,
            unmatched_ledger: outcome.unmatched_ledger,
            overdue: partition.overdue,
            deferred: partition.deferred,
            exclusions,
        })
    }

    /// Fetch both tables from a provider, then run the synchronous pipeline
    pub async fn reconcile_from<P: TableProvider>(
        &self,
        provider: &P,
    ) -> ReconcileResult<ReconciliationReport> {
        let statement = provider.statement_table().await?;
        let ledger = provider.ledger_table().await?;
        self.reconcile(&statement, &ledger)
    }
}
