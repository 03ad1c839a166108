//! Transaction tables and detail views

use tabled::{settings::Style, Table, Tabled};

use super::report::truncate;
use crate::models::{EntryKind, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn signed_amount(txn: &Transaction, symbol: &str) -> String {
    let sign = match txn.kind {
        EntryKind::Income => "+",
        EntryKind::Expense => "-",
    };
    format!("{}{}", sign, txn.amount.format_with_symbol(symbol))
}

/// Table of transactions, or a short notice when there are none
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str, date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format(date_format).to_string(),
        company: truncate(&txn.company_name, 28),
        status: txn.status.to_string(),
        amount: signed_amount(txn, symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    format!(
        "Transaction: {}\nDate:        {}\nCompany:     {}\nKind:        {}\nStatus:      {}\nAmount:      {}\n",
        txn.id,
        txn.date.format(date_format),
        txn.company_name,
        txn.kind,
        txn.status,
        signed_amount(txn, symbol)
    )
}
