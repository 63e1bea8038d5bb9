//! Row-level normalization driven by a column mapping configuration.
//!
//! Column-name-to-role binding is chosen by the caller at configuration time
//! and validated once, before any row is parsed. Per-row parse failures never
//! stop a run: the entry is still built with `None` in the affected fields.

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, FromPrimitive, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::value::{normalize_text, parse_amount, parse_date, to_amount_key};
use crate::types::{
    CellValue, LedgerEntry, RawRow, RawTable, ReconcileError, ReconcileResult, StatementEntry,
};

/// How a table expresses transaction amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountMode {
    /// One signed amount column
    SingleColumn,
    /// Separate debit and credit columns holding non-negative magnitudes
    DebitCredit,
}

/// Column roles for the bank statement table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementMapping {
    pub date_column: String,
    pub description_column: String,
    pub amount_mode: AmountMode,
    /// Required in single-column mode
    pub amount_column: Option<String>,
    /// Required in debit/credit mode
    pub debit_column: Option<String>,
    /// Required in debit/credit mode
    pub credit_column: Option<String>,
    /// Drop the sign after parsing (single-column mode only)
    pub force_absolute: bool,
}

impl StatementMapping {
    /// Mapping for a statement with one signed amount column
    pub fn single_column(date: &str, description: &str, amount: &str) -> Self {
        Self {
            date_column: date.to_string(),
            description_column: description.to_string(),
            amount_mode: AmountMode::SingleColumn,
            amount_column: Some(amount.to_string()),
            debit_column: None,
            credit_column: None,
            force_absolute: false,
        }
    }

    /// Mapping for a statement with separate debit and credit columns
    pub fn debit_credit(date: &str, description: &str, debit: &str, credit: &str) -> Self {
        Self {
            date_column: date.to_string(),
            description_column: description.to_string(),
            amount_mode: AmountMode::DebitCredit,
            amount_column: None,
            debit_column: Some(debit.to_string()),
            credit_column: Some(credit.to_string()),
            force_absolute: false,
        }
    }

    /// Check that every column the selected mode needs is mapped
    pub fn validate(&self) -> ReconcileResult<()> {
        match self.amount_mode {
            AmountMode::SingleColumn if self.amount_column.is_none() => {
                Err(ReconcileError::MissingMapping(
                    "statement amount column (single-column mode selected)".to_string(),
                ))
            }
            AmountMode::DebitCredit if self.debit_column.is_none() => {
                Err(ReconcileError::MissingMapping(
                    "statement debit column (debit/credit mode selected)".to_string(),
                ))
            }
            AmountMode::DebitCredit if self.credit_column.is_none() => {
                Err(ReconcileError::MissingMapping(
                    "statement credit column (debit/credit mode selected)".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Column roles for the internal system ledger table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerMapping {
    pub issue_date_column: String,
    pub due_date_column: String,
    pub amount_mode: AmountMode,
    /// Required in single-column mode
    pub amount_column: Option<String>,
    /// Required in debit/credit mode
    pub debit_column: Option<String>,
    /// Required in debit/credit mode
    pub credit_column: Option<String>,
    /// Drop the sign after parsing (single-column mode only)
    pub force_absolute: bool,
}

impl LedgerMapping {
    /// Mapping for a ledger with one signed amount column
    pub fn single_column(issue_date: &str, due_date: &str, amount: &str) -> Self {
        Self {
            issue_date_column: issue_date.to_string(),
            due_date_column: due_date.to_string(),
            amount_mode: AmountMode::SingleColumn,
            amount_column: Some(amount.to_string()),
            debit_column: None,
            credit_column: None,
            force_absolute: false,
        }
    }

    /// Mapping for a ledger with separate debit and credit columns
    pub fn debit_credit(issue_date: &str, due_date: &str, debit: &str, credit: &str) -> Self {
        Self {
            issue_date_column: issue_date.to_string(),
            due_date_column: due_date.to_string(),
            amount_mode: AmountMode::DebitCredit,
            amount_column: None,
            debit_column: Some(debit.to_string()),
            credit_column: Some(credit.to_string()),
            force_absolute: false,
        }
    }

    /// Check that every column the selected mode needs is mapped
    pub fn validate(&self) -> ReconcileResult<()> {
        match self.amount_mode {
            AmountMode::SingleColumn if self.amount_column.is_none() => {
                Err(ReconcileError::MissingMapping(
                    "ledger amount column (single-column mode selected)".to_string(),
                ))
            }
            AmountMode::DebitCredit if self.debit_column.is_none() => {
                Err(ReconcileError::MissingMapping(
                    "ledger debit column (debit/credit mode selected)".to_string(),
                ))
            }
            AmountMode::DebitCredit if self.credit_column.is_none() => {
                Err(ReconcileError::MissingMapping(
                    "ledger credit column (debit/credit mode selected)".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a CellValue> {
    row.get(column)
}

fn cell_text(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Empty) => String::new(),
        Some(CellValue::Text(s)) => normalize_text(s),
        Some(CellValue::Number(n)) => normalize_text(&n.to_string()),
        Some(CellValue::Date(d)) => normalize_text(&d.to_string()),
    }
}

fn cell_date(value: Option<&CellValue>) -> Option<NaiveDate> {
    match value {
        Some(CellValue::Date(d)) => Some(*d),
        Some(CellValue::Text(s)) => parse_date(s),
        Some(CellValue::Number(_)) | Some(CellValue::Empty) | None => None,
    }
}

fn cell_amount(
    value: Option<&CellValue>,
    decimals: u32,
    force_absolute: bool,
) -> Option<BigDecimal> {
    match value {
        Some(CellValue::Text(s)) => parse_amount(s, decimals, force_absolute),
        Some(CellValue::Number(n)) => {
            let parsed = BigDecimal::from_f64(*n)?
                .with_scale_round(decimals as i64, RoundingMode::HalfUp);
            Some(if force_absolute { parsed.abs() } else { parsed })
        }
        Some(CellValue::Date(_)) | Some(CellValue::Empty) | None => None,
    }
}

/// Normalize every statement row into a [`StatementEntry`].
///
/// Fails only on a mapping/mode mismatch, before touching any row.
pub fn normalize_statement(
    table: &RawTable,
    mapping: &StatementMapping,
    decimals: u32,
) -> ReconcileResult<Vec<StatementEntry>> {
    mapping.validate()?;

    let entries = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            let signed_amount = match mapping.amount_mode {
                AmountMode::SingleColumn => {
                    let column = mapping.amount_column.as_deref().unwrap_or_default();
                    cell_amount(cell(raw, column), decimals, mapping.force_absolute)
                }
                AmountMode::DebitCredit => {
                    let debit = cell_amount(
                        cell(raw, mapping.debit_column.as_deref().unwrap_or_default()),
                        decimals,
                        true,
                    );
                    let credit = cell_amount(
                        cell(raw, mapping.credit_column.as_deref().unwrap_or_default()),
                        decimals,
                        true,
                    );
                    match (debit, credit) {
                        (None, None) => None,
                        // Magnitudes combine as credit − debit
                        (d, c) => Some(
                            c.unwrap_or_else(BigDecimal::zero) - d.unwrap_or_else(BigDecimal::zero),
                        ),
                    }
                }
            };
            let amount_key = signed_amount
                .as_ref()
                .and_then(|amount| to_amount_key(amount, decimals));

            StatementEntry {
                row,
                date: cell_date(cell(raw, &mapping.date_column)),
                description: cell_text(cell(raw, &mapping.description_column)),
                signed_amount,
                amount_key,
            }
        })
        .collect();

    Ok(entries)
}

/// Normalize every ledger row into a [`LedgerEntry`].
///
/// In debit/credit mode a present, non-zero debit keys as positive and a
/// present, non-zero credit keys as negative; the primary signed amount is
/// `+debit` when the debit side is non-zero, else `-credit`, else invalid.
pub fn normalize_ledger(
    table: &RawTable,
    mapping: &LedgerMapping,
    decimals: u32,
) -> ReconcileResult<Vec<LedgerEntry>> {
    mapping.validate()?;

    let entries = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            let issue_date = cell_date(cell(raw, &mapping.issue_date_column));
            let due_date = cell_date(cell(raw, &mapping.due_date_column));

            match mapping.amount_mode {
                AmountMode::SingleColumn => {
                    let column = mapping.amount_column.as_deref().unwrap_or_default();
                    let signed_amount =
                        cell_amount(cell(raw, column), decimals, mapping.force_absolute);
                    let primary_key = signed_amount
                        .as_ref()
                        .and_then(|amount| to_amount_key(amount, decimals));
                    LedgerEntry {
                        row,
                        issue_date,
                        due_date,
                        signed_amount,
                        primary_key,
                        debit_key: None,
                        credit_key: None,
                    }
                }
                AmountMode::DebitCredit => {
                    let debit = cell_amount(
                        cell(raw, mapping.debit_column.as_deref().unwrap_or_default()),
                        decimals,
                        true,
                    )
                    .filter(|d| !d.is_zero());
                    let credit = cell_amount(
                        cell(raw, mapping.credit_column.as_deref().unwrap_or_default()),
                        decimals,
                        true,
                    )
                    .filter(|c| !c.is_zero());

                    let signed_amount = match (&debit, &credit) {
                        (Some(d), _) => Some(d.clone()),
                        (None, Some(c)) => Some(-c.clone()),
                        (None, None) => None,
                    };
                    let primary_key = signed_amount
                        .as_ref()
                        .and_then(|amount| to_amount_key(amount, decimals));
                    let debit_key = debit.as_ref().and_then(|d| to_amount_key(d, decimals));
                    let credit_key = credit
                        .as_ref()
                        .and_then(|c| to_amount_key(&-c.clone(), decimals));

                    LedgerEntry {
                        row,
                        issue_date,
                        due_date,
                        signed_amount,
                        primary_key,
                        debit_key,
                        credit_key,
                    }
                }
            }
        })
        .collect();

    Ok(entries)
}
