//! finpulse-ledger: the JSON ledger file, record validation, and CSV import/export

pub mod category_rules;
pub mod csv_io;
pub mod entity;
pub mod error;
pub mod store;

pub use category_rules::{UNCATEGORIZED, categorize};
pub use csv_io::{
    ImportReport, export_transactions, export_transactions_csv, import_transactions,
    import_transactions_csv, parse_date, parse_money,
};
pub use entity::Entity;
pub use error::{LedgerError, Result};
pub use store::Ledger;
