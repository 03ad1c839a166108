//! Export module for MoneyMap
//!
//! - JSON: the full record set, machine-readable, re-importable for checks
//! - YAML: the same document for reading by eye
//! - CSV: transactions, for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use json::{export_full_json, import_from_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
