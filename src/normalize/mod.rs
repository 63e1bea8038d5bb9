//! Normalization: raw cells to canonical values, raw rows to canonical entries

pub mod record;
pub mod value;

pub use record::{
    normalize_ledger, normalize_statement, AmountMode, LedgerMapping, StatementMapping,
};
pub use value::{normalize_text, parse_amount, parse_date, to_amount_key};
