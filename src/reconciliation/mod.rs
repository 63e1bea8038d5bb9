//! Bank reconciliation: exclusion filtering, one-to-one matching and
//! due-date partitioning, orchestrated by [`engine::ReconciliationEngine`].

pub mod engine;
pub mod filter;
pub mod matcher;
pub mod partition;

pub use engine::{
    ExclusionSummary, ReconciliationConfig, ReconciliationEngine, ReconciliationReport,
};
pub use filter::ExclusionFilter;
pub use matcher::{min_day_delta, MatchOutcome, Matcher};
pub use partition::{partition_by_due_date, DuePartition};
