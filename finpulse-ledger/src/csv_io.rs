//! CSV import and export of transactions.
//!
//! The format is the one `export_transactions` writes:
//! Date,Description,Category,Type,Amount,Payment Method,Recurrence
//!
//! Bank exports often put a few lines of preamble above the header, so the importer
//! skips rows until it finds one whose first cell is "Date". Column order after that
//! is taken from the header.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use finpulse_core::{Transaction, TransactionKind};
use regex::Regex;
use tracing::{debug, warn};

use crate::category_rules::categorize;
use crate::error::{LedgerError, Result};

pub const HEADER: [&str; 7] = [
    "Date",
    "Description",
    "Category",
    "Type",
    "Amount",
    "Payment Method",
    "Recurrence",
];

/// Rows accepted from an import; ids are left empty for the ledger to assign
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub transactions: Vec<Transaction>,
    pub skipped: usize,
}

fn money_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^\s*(?P<open>\()?\s*(?P<neg>-)?\s*",
            r"(?P<cur>R\$|US\$|\$|€)?\s*",
            r"(?P<num>\d[\d.,]*)",
            r"\s*(?P<eur>€)?\s*\)?\s*$"
        ))
        .expect("money pattern is valid")
    })
}

fn dot_groups_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,3}(\.\d{3})+$").expect("grouping pattern is valid"))
}

/// Parse amounts like `1,234.56`, `R$ 1.234,56`, `-$14.05`, `(20.00)` or `12,5 €`.
pub fn parse_money(raw: &str) -> Option<f64> {
    let caps = money_re().captures(raw)?;
    let num = &caps["num"];

    // A comma followed by one or two trailing digits is a decimal comma.
    let decimal_comma = match num.rfind(',') {
        Some(pos) => {
            let tail = &num[pos + 1..];
            (1..=2).contains(&tail.len()) && num.rfind('.').is_none_or(|dot| dot < pos)
        }
        None => false,
    };
    // R$ and € amounts group thousands with dots, as does any `1.234.567` shape.
    let dot_locale = matches!(caps.name("cur").map(|m| m.as_str()), Some("R$" | "€"))
        || caps.name("eur").is_some();
    let dots_group = dot_groups_re().is_match(num) || (dot_locale && !num.contains(','));

    let normalized = if decimal_comma || dots_group {
        num.replace('.', "").replace(',', ".")
    } else {
        num.replace(',', "")
    };

    let value: f64 = normalized.parse().ok()?;
    let negative = caps.name("neg").is_some() || caps.name("open").is_some();
    Some(if negative { -value } else { value })
}

/// ISO dates first, then day-first `dd/mm/yyyy`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

fn column_index(header: &csv::StringRecord) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

fn cell<'r>(record: &'r csv::StringRecord, cols: &HashMap<String, usize>, name: &str) -> &'r str {
    cols.get(name).and_then(|&i| record.get(i)).unwrap_or("")
}

/// Read transactions from any CSV source.
pub fn import_transactions<R: io::Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut columns: Option<HashMap<String, usize>> = None;
    let mut report = ImportReport::default();

    for result in rdr.records() {
        let record = result?;

        let Some(cols) = columns.as_ref() else {
            if record.get(0).map(|s| s.eq_ignore_ascii_case("date")) == Some(true) {
                columns = Some(column_index(&record));
            }
            continue;
        };

        if record.iter().all(|c| c.is_empty()) {
            continue;
        }

        let get = |name: &str| cell(&record, cols, name);

        let (Some(date), Some(signed)) = (parse_date(get("date")), parse_money(get("amount")))
        else {
            debug!(row = ?record, "skipping unparseable row");
            report.skipped += 1;
            continue;
        };
        let description = get("description").to_string();
        if description.is_empty() {
            report.skipped += 1;
            continue;
        }

        let kind = get("type").parse::<TransactionKind>().unwrap_or(if signed < 0.0 {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        });
        let category = match get("category") {
            "" => categorize(&description, kind).to_string(),
            c => c.to_string(),
        };

        let mut txn = Transaction::new("", date, description, signed.abs(), kind, category);
        txn.payment_method = get("payment method").parse().unwrap_or_default();
        txn.recurrence = get("recurrence").parse().unwrap_or_default();
        report.transactions.push(txn);
    }

    if columns.is_none() {
        return Err(LedgerError::Validation(
            "no header row starting with \"Date\" found in CSV".to_string(),
        ));
    }
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "some CSV rows could not be imported");
    }
    Ok(report)
}

pub fn import_transactions_csv(path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_transactions(file)
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

/// Write transactions oldest first in the import format.
pub fn export_transactions<W: io::Write>(writer: W, txns: &[Transaction]) -> Result<()> {
    let mut sorted: Vec<&Transaction> = txns.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for t in sorted {
        wtr.write_record([
            t.date.format("%Y-%m-%d").to_string(),
            t.description.clone(),
            t.category.clone(),
            kind_label(t.kind).to_string(),
            format!("{:.2}", t.amount),
            t.payment_method.label().to_string(),
            t.recurrence.label().to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_transactions_csv(path: impl AsRef<Path>, txns: &[Transaction]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    export_transactions(file, txns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finpulse_core::{PaymentMethod, Recurrence};

    #[test]
    fn test_parse_money_formats() {
        assert_eq!(parse_money("1,234.56"), Some(1234.56));
        assert_eq!(parse_money("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_money("-$14.05"), Some(-14.05));
        assert_eq!(parse_money("(20.00)"), Some(-20.0));
        assert_eq!(parse_money("12,5 €"), Some(12.5));
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("1.2.3"), None);
    }

    #[test]
    fn test_parse_money_dot_grouping() {
        assert_eq!(parse_money("R$ 1.500"), Some(1500.0));
        assert_eq!(parse_money("-R$ 2.000"), Some(-2000.0));
        assert_eq!(parse_money("1.234.567"), Some(1234567.0));
        assert_eq!(parse_money("1.234.567,00"), Some(1234567.0));
        assert_eq!(parse_money("2.500 €"), Some(2500.0));
        // a plain decimal point is still a decimal point
        assert_eq!(parse_money("12.50"), Some(12.5));
        assert_eq!(parse_money("$1.50"), Some(1.5));
    }

    #[test]
    fn test_import_brl_thousands_without_cents() {
        let csv = "\
Date,Description,Category,Type,Amount
2026-02-05,Aluguel,Housing,expense,R$ 1.500
";
        let report = import_transactions(csv.as_bytes()).unwrap();
        assert_eq!(report.skipped, 0);
        assert_eq!(report.transactions[0].amount, 1500.0);
    }

    #[test]
    fn test_parse_date_formats() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        assert_eq!(parse_date("2026-02-18"), Some(d));
        assert_eq!(parse_date("18/02/2026"), Some(d));
        assert_eq!(parse_date("02/18/2026"), None);
    }

    #[test]
    fn test_import_skips_preamble_and_bad_rows() {
        let csv = "\
Statement for account 1234,,
,,
Date,Description,Category,Type,Amount,Payment Method,Recurrence
2026-02-01,ACME PAYROLL,,income,\"5,000.00\",bank-transfer,monthly
05/02/2026,Aluguel,Housing,expense,\"R$ 1.500,00\",pix,monthly
not-a-date,Broken,,expense,10.00,,
2026-02-07,Mercado,,,-230.10,,
";
        let report = import_transactions(csv.as_bytes()).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.transactions.len(), 3);

        let pay = &report.transactions[0];
        assert_eq!(pay.amount, 5000.0);
        assert_eq!(pay.kind, TransactionKind::Income);
        assert_eq!(pay.category, "Salary");
        assert_eq!(pay.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(pay.recurrence, Recurrence::Monthly);

        let market = &report.transactions[2];
        assert_eq!(market.kind, TransactionKind::Expense);
        assert_eq!(market.amount, 230.10);
        assert_eq!(market.category, "Food");
        assert!(market.id.is_empty());
    }

    #[test]
    fn test_import_without_header_fails() {
        let err = import_transactions("a,b,c\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_export_then_import() {
        let d1 = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let d0 = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let txns = vec![
            Transaction::new("b", d1, "Cinema, snacks", 42.5, TransactionKind::Expense, "Leisure"),
            Transaction::new("a", d0, "Salary", 5000.0, TransactionKind::Income, "Salary"),
        ];

        let mut buf = Vec::new();
        export_transactions(&mut buf, &txns).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("Date,Description,Category,Type,Amount,Payment Method,Recurrence"));
        assert!(text.lines().nth(1).unwrap().starts_with("2026-02-01,Salary"));

        let back = import_transactions(buf.as_slice()).unwrap();
        assert_eq!(back.transactions.len(), 2);
        assert_eq!(back.transactions[1].description, "Cinema, snacks");
        assert_eq!(back.transactions[1].amount, 42.5);
    }
}
