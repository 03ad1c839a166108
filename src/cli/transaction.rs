//! Transaction CLI commands

use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_table};
use crate::error::MoneyMapResult;
use crate::models::{EntryKind, TransactionStatus};
use crate::services::{
    CreateTransactionInput, TransactionFilter, TransactionService, TransactionUpdate,
};
use crate::state::AppState;

use super::{parse_date, parse_money};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Company or person on the other side
        company: String,
        /// Amount (e.g., "42.50"); always positive
        amount: String,
        /// Money coming in rather than going out
        #[arg(short, long)]
        income: bool,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Status (pending, successful, failed)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only income or only expenses
        #[arg(short, long)]
        kind: Option<String>,
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID or ID prefix
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID or ID prefix
        id: String,
        /// New company name
        #[arg(short, long)]
        company: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New kind (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID or ID prefix
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(state: &AppState, cmd: TransactionCommands) -> MoneyMapResult<()> {
    let service = TransactionService::new(&state.storage);
    let symbol = state.symbol();
    let date_format = &state.settings.date_format;

    match cmd {
        TransactionCommands::Add {
            company,
            amount,
            income,
            date,
            status,
        } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => state.today(),
            };
            let status = status.map(|s| s.parse::<TransactionStatus>()).transpose()?;

            let txn = service.create(CreateTransactionInput {
                company_name: company,
                date,
                kind: if income { EntryKind::Income } else { EntryKind::Expense },
                amount: parse_money(&amount)?,
                status,
            })?;

            println!("Created transaction:");
            println!("  ID:      {}", txn.id);
            println!("  Date:    {}", txn.date.format(date_format));
            println!("  Company: {}", txn.company_name);
            println!("  Kind:    {}", txn.kind);
            println!("  Amount:  {}", txn.amount.format_with_symbol(symbol));
            println!("  Status:  {}", txn.status);
        }

        TransactionCommands::List {
            from,
            to,
            kind,
            status,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            filter.start_date = from.as_deref().map(parse_date).transpose()?;
            filter.end_date = to.as_deref().map(parse_date).transpose()?;
            if let Some(kind) = kind {
                filter = filter.kind(kind.parse()?);
            }
            if let Some(status) = status {
                filter = filter.status(status.parse()?);
            }

            let transactions = service.list(&filter)?;
            if transactions.is_empty() {
                println!("No transactions found.");
            } else {
                println!("{}", format_transaction_table(&transactions, symbol, date_format));
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!("{}", format_transaction_details(&txn, symbol, date_format));
        }

        TransactionCommands::Edit {
            id,
            company,
            amount,
            date,
            kind,
            status,
        } => {
            let txn = service.find(&id)?;
            let changes = TransactionUpdate {
                company_name: company,
                date: date.as_deref().map(parse_date).transpose()?,
                kind: kind.map(|k| k.parse()).transpose()?,
                status: status.map(|s| s.parse()).transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
            };

            let updated = service.update(txn.id, changes)?;
            println!("Updated transaction {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.find(&id)?;
            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction {} ({} {})",
                deleted.id,
                deleted.company_name,
                deleted.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
