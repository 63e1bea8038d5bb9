//! Basic reconciliation example

use chrono::NaiveDate;
use reconcile_core::utils::MemoryTables;
use reconcile_core::{
    CellValue, LedgerMapping, RawRow, ReconciliationConfig, ReconciliationEngine, StatementMapping,
};

fn row(cells: &[(&str, &str)]) -> RawRow {
    cells
        .iter()
        .map(|(name, value)| (name.to_string(), CellValue::from(*value)))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconcile Core - Basic Reconciliation Example\n");

    // 1. Load both tables into the in-memory provider
    println!("📥 Loading bank statement and ledger rows...");
    let tables = MemoryTables::new();

    tables.push_statement_row(row(&[
        ("Fecha", "05/03/2024"),
        ("Concepto", "Transferencia Cliente ACME"),
        ("Importe", "$ 1.234,56"),
    ]));
    tables.push_statement_row(row(&[
        ("Fecha", "12/03/2024"),
        ("Concepto", "Pago Proveedor Sur"),
        ("Importe", "(2.000,00)"),
    ]));
    tables.push_statement_row(row(&[
        ("Fecha", "15/03/2024"),
        ("Concepto", "Impuesto Ley 25413"),
        ("Importe", "-45,10"),
    ]));

    tables.push_ledger_row(row(&[
        ("Emision", "01/03/2024"),
        ("Vencimiento", "10/03/2024"),
        ("Debe", "1234,56"),
        ("Haber", ""),
    ]));
    tables.push_ledger_row(row(&[
        ("Emision", "02/03/2024"),
        ("Vencimiento", "12/03/2024"),
        ("Debe", ""),
        ("Haber", "2.000,00"),
    ]));
    tables.push_ledger_row(row(&[
        ("Emision", "03/03/2024"),
        ("Vencimiento", "25/03/2024"),
        ("Debe", "777,77"),
        ("Haber", ""),
    ]));

    // 2. Configure and run the pipeline
    println!("⚙️  Running reconciliation...\n");
    let config = ReconciliationConfig {
        decimals: 2,
        statement: StatementMapping::single_column("Fecha", "Concepto", "Importe"),
        ledger: LedgerMapping::debit_credit("Emision", "Vencimiento", "Debe", "Haber"),
        exclude_exact: vec![],
        exclude_contains: vec!["IMPUESTO".to_string()],
        cutoff_date: NaiveDate::from_ymd_opt(2024, 3, 31).ok_or("bad cutoff date")?,
        max_day_window: 0,
        oldest_issue_first: false,
    };

    let engine = ReconciliationEngine::new(config)?;
    let report = engine.reconcile_from(&tables).await?;

    // 3. Walk through the results
    println!("✅ Matched pairs:");
    for pair in &report.pairs {
        println!(
            "  ✓ ledger row {} ↔ statement row {} ({}) Δ{} days",
            pair.ledger.row,
            pair.statement.row,
            pair.statement.description,
            pair.day_delta.map_or("?".to_string(), |d| d.to_string()),
        );
    }

    println!("\n⏰ Overdue (unmatched, due on or before the cutoff):");
    for entry in &report.overdue {
        println!(
            "  • ledger row {} due {}",
            entry.row,
            entry.due_date.map_or("?".to_string(), |d| d.to_string()),
        );
    }

    println!("\n🚫 Excluded statement rows:");
    for summary in report.exclusion_summary() {
        println!(
            "  • {} ({} rows, total {})",
            summary.description, summary.count, summary.total
        );
    }

    println!("\n{}", report.summary());
    Ok(())
}
