//! Integration tests for reconcile-core

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconcile_core::{
    CellValue, LedgerMapping, MemoryTables, RawRow, RawTable, ReconciliationConfig,
    ReconciliationEngine, StatementMapping,
};
use std::str::FromStr;

fn row(cells: &[(&str, CellValue)]) -> RawRow {
    cells
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn config() -> ReconciliationConfig {
    ReconciliationConfig {
        decimals: 2,
        statement: StatementMapping::single_column("Fecha", "Concepto", "Importe"),
        ledger: LedgerMapping::debit_credit("Emision", "Vencimiento", "Debe", "Haber"),
        exclude_exact: vec!["COMISION MANTENIMIENTO".to_string()],
        exclude_contains: vec!["IMPUESTO".to_string(), "SELLOS".to_string()],
        cutoff_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        max_day_window: 0,
        oldest_issue_first: false,
    }
}

/// A realistically dirty bank export: mixed separators, currency symbols,
/// parentheses negatives, unicode dashes and some noise rows.
fn statement_table() -> RawTable {
    RawTable::from_rows(vec![
        row(&[
            ("Fecha", "05/03/2024".into()),
            ("Concepto", "transferencia cliente acme ".into()),
            ("Importe", "$ 1.234,56".into()),
        ]),
        row(&[
            ("Fecha", "12/03/2024".into()),
            ("Concepto", "PAGO PROVEEDOR SUR".into()),
            ("Importe", "(2.000,00)".into()),
        ]),
        row(&[
            ("Fecha", "15/03/2024".into()),
            ("Concepto", "IMPUESTO LEY 25413".into()),
            ("Importe", "\u{2212}45,10".into()),
        ]),
        row(&[
            ("Fecha", "20/03/2024".into()),
            ("Concepto", "COMISION MANTENIMIENTO".into()),
            ("Importe", "-15,00".into()),
        ]),
        row(&[
            ("Fecha", "no es fecha".into()),
            ("Concepto", "DEPOSITO EFECTIVO".into()),
            ("Importe", "999,99".into()),
        ]),
        row(&[
            ("Fecha", "28/03/2024".into()),
            ("Concepto", "ACREDITACION HABERES".into()),
            ("Importe", "3500,00".into()),
        ]),
    ])
}

/// The internal ledger: debit/credit columns, one invoice per row
fn ledger_table() -> RawTable {
    RawTable::from_rows(vec![
        // Matches the ACME transfer: debit 1234.56, issue 01/03, due 10/03
        row(&[
            ("Emision", "01/03/2024".into()),
            ("Vencimiento", "10/03/2024".into()),
            ("Debe", "1234,56".into()),
            ("Haber", CellValue::Empty),
        ]),
        // Matches the supplier payment: credit 2000.00
        row(&[
            ("Emision", "02/03/2024".into()),
            ("Vencimiento", "12/03/2024".into()),
            ("Debe", CellValue::Empty),
            ("Haber", "2.000,00".into()),
        ]),
        // No statement counterpart, due before the cutoff: overdue
        row(&[
            ("Emision", "03/03/2024".into()),
            ("Vencimiento", "25/03/2024".into()),
            ("Debe", "777,77".into()),
            ("Haber", CellValue::Empty),
        ]),
        // No statement counterpart, due after the cutoff: deferred
        row(&[
            ("Emision", "04/03/2024".into()),
            ("Vencimiento", "30/04/2024".into()),
            ("Debe", "888,88".into()),
            ("Haber", CellValue::Empty),
        ]),
        // Unparseable amount cell: never matches, no key at all
        row(&[
            ("Emision", "05/03/2024".into()),
            ("Vencimiento", "15/04/2024".into()),
            ("Debe", "N/A".into()),
            ("Haber", CellValue::Empty),
        ]),
    ])
}

#[test]
fn test_complete_reconciliation_workflow() {
    let engine = ReconciliationEngine::new(config()).unwrap();
    let report = engine
        .reconcile(&statement_table(), &ledger_table())
        .unwrap();

    // Noise rows never reach the matcher
    assert_eq!(report.exclusions.len(), 2);
    assert_eq!(report.statement_total, 4);
    assert_eq!(report.ledger_total, 5);

    // The ACME debit and the supplier credit both find their counterparts
    assert_eq!(report.matched_count(), 2);
    let acme = report
        .pairs
        .iter()
        .find(|p| p.statement.description.contains("ACME"))
        .unwrap();
    assert_eq!(
        acme.statement.signed_amount,
        Some(BigDecimal::from_str("1234.56").unwrap())
    );
    assert_eq!(acme.ledger.row, 0);
    // Statement 05/03 vs issue 01/03 (4 days) and due 10/03 (5 days)
    assert_eq!(acme.day_delta, Some(4));

    let supplier = report
        .pairs
        .iter()
        .find(|p| p.statement.description.contains("PROVEEDOR"))
        .unwrap();
    assert_eq!(supplier.ledger.row, 1);
    assert_eq!(
        supplier.statement.signed_amount,
        Some(BigDecimal::from_str("-2000.00").unwrap())
    );

    // Everything else stays visible in the report
    assert_eq!(report.unmatched_statement.len(), 2);
    assert_eq!(report.unmatched_ledger.len(), 3);
    assert_eq!(report.overdue.len(), 1);
    assert_eq!(report.overdue[0].row, 2);
    assert_eq!(report.deferred.len(), 1);
    assert_eq!(report.deferred[0].row, 3);

    // The keyless ledger row is unmatched but in neither due bucket
    assert!(report
        .unmatched_ledger
        .iter()
        .any(|entry| entry.row == 4 && entry.candidate_keys().is_empty()));

    let summary = report.summary();
    assert!(summary.contains("2 matched"));
    assert!(summary.contains("2 excluded"));
}

#[test]
fn test_exclusion_audit_reasons_and_totals() {
    let engine = ReconciliationEngine::new(config()).unwrap();
    let report = engine
        .reconcile(&statement_table(), &ledger_table())
        .unwrap();

    let reasons: Vec<String> = report
        .exclusions
        .iter()
        .map(|record| record.reason.to_string())
        .collect();
    assert!(reasons.contains(&"CONTAINS:IMPUESTO".to_string()));
    assert!(reasons.contains(&"EXACT:COMISION MANTENIMIENTO".to_string()));

    let summary = report.exclusion_summary();
    assert_eq!(summary.len(), 2);
    // Ascending by total: the tax row (-45.10) before the fee row (-15.00)
    assert_eq!(summary[0].description, "IMPUESTO LEY 25413");
    assert_eq!(summary[0].total, BigDecimal::from_str("-45.10").unwrap());
    assert_eq!(summary[1].description, "COMISION MANTENIMIENTO");
    assert_eq!(summary[1].count, 1);
}

#[test]
fn test_day_window_rejects_distant_pairs() {
    let mut cfg = config();
    cfg.max_day_window = 2;
    let engine = ReconciliationEngine::new(cfg).unwrap();
    let report = engine
        .reconcile(&statement_table(), &ledger_table())
        .unwrap();

    // The ACME pair sits 4 days out and is rejected; the supplier pair's
    // statement date equals the due date and survives
    assert_eq!(report.matched_count(), 1);
    assert_eq!(report.pairs[0].ledger.row, 1);
    assert_eq!(report.pairs[0].day_delta, Some(0));
}

#[test]
fn test_runs_are_deterministic() {
    let engine = ReconciliationEngine::new(config()).unwrap();
    let first = engine
        .reconcile(&statement_table(), &ledger_table())
        .unwrap();
    let second = engine
        .reconcile(&statement_table(), &ledger_table())
        .unwrap();

    assert_eq!(first.pairs, second.pairs);
    assert_eq!(first.unmatched_statement, second.unmatched_statement);
    assert_eq!(first.unmatched_ledger, second.unmatched_ledger);
    assert_eq!(first.overdue, second.overdue);
    assert_eq!(first.deferred, second.deferred);
    assert_eq!(first.exclusions, second.exclusions);
}

#[tokio::test]
async fn test_reconcile_from_provider() {
    let tables = MemoryTables::with_tables(statement_table(), ledger_table());
    let engine = ReconciliationEngine::new(config()).unwrap();

    let report = engine.reconcile_from(&tables).await.unwrap();
    assert_eq!(report.matched_count(), 2);
    assert_eq!(report.overdue.len(), 1);
}

#[test]
fn test_config_round_trips_through_json() {
    let cfg = config();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: ReconciliationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_report_serializes_for_export() {
    let engine = ReconciliationEngine::new(config()).unwrap();
    let report = engine
        .reconcile(&statement_table(), &ledger_table())
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["pairs"].as_array().unwrap().len(), 2);
    assert!(json["run_id"].is_string());
}
