use chrono::NaiveDate;
use finpulse_core::{BudgetEnvelope, Debt, Transaction, TransactionKind, YearMonth};
use finpulse_ledger::{Ledger, LedgerError, export_transactions_csv, import_transactions_csv};
use std::fs;
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    let food = ledger
        .upsert(BudgetEnvelope {
            id: String::new(),
            name: "Food".into(),
            budgeted_amount: 800.0,
        })
        .unwrap();
    ledger
        .upsert(Transaction::new("", day(1), "Payroll", 6000.0, TransactionKind::Income, "Salary"))
        .unwrap();
    ledger
        .upsert(
            Transaction::new("", day(3), "Mercado", 320.0, TransactionKind::Expense, "Food")
                .with_envelope(food),
        )
        .unwrap();
    ledger.upsert(Debt::new("", "Card", 1500.0, 12.5, 150.0)).unwrap();
    ledger
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("ledger.json");

    let ledger = sample_ledger();
    ledger.save(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = Ledger::load(&path).unwrap();
    assert_eq!(loaded, ledger);

    let month = YearMonth::new(2026, 3).unwrap();
    let usage = loaded.envelope_usage(month);
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].spent, 320.0);
}

#[test]
fn test_missing_file_is_empty_ledger() {
    let dir = tempdir().unwrap();
    let ledger = Ledger::load(dir.path().join("absent.json")).unwrap();
    assert_eq!(ledger, Ledger::default());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Ledger::load(&path).unwrap_err();
    assert!(matches!(err, LedgerError::Parse { .. }));
    assert!(err.to_string().contains("ledger.json"));
}

#[test]
fn test_tables_default_when_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, r#"{"debts": {}}"#).unwrap();

    let ledger = Ledger::load(&path).unwrap();
    assert!(ledger.transactions.is_empty());
    assert!(ledger.goals.is_empty());
}

#[test]
fn test_csv_export_then_import_into_fresh_ledger() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("transactions.csv");

    let source = sample_ledger();
    export_transactions_csv(&csv_path, &source.records::<Transaction>()).unwrap();

    let report = import_transactions_csv(&csv_path).unwrap();
    assert_eq!(report.skipped, 0);

    let mut target = Ledger::default();
    for txn in report.transactions {
        target.upsert(txn).unwrap();
    }
    assert_eq!(target.transactions.len(), 2);

    let month = YearMonth::new(2026, 3).unwrap();
    let flow = target.cash_flow(month);
    assert_eq!(flow.income, 6000.0);
    assert_eq!(flow.expenses, 320.0);
}
