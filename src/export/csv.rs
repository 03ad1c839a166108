//! CSV export of transactions

use std::io::Write;

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::storage::Storage;

const HEADER: [&str; 6] = ["ID", "Date", "Company", "Kind", "Status", "Amount"];

/// Write every transaction, newest first, as CSV
///
/// Amounts are plain decimals without a currency symbol.
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> MoneyMapResult<usize> {
    let export_err = |e: csv::Error| MoneyMapError::Export(e.to_string());
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADER).map_err(export_err)?;

    let transactions = storage.transactions.get_all()?;
    for txn in &transactions {
        csv_writer
            .write_record([
                txn.id.as_uuid().to_string(),
                txn.date.to_string(),
                txn.company_name.clone(),
                txn.kind.to_string(),
                txn.status.to_string(),
                txn.amount.format_with_symbol(""),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| MoneyMapError::Export(e.to_string()))?;
    Ok(transactions.len())
}
