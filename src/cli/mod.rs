//! CLI command handlers
//!
//! Each submodule pairs a clap `Subcommand` enum with a handler that calls
//! the service layer or the engine and prints the result.

pub mod audit;
pub mod budget;
pub mod category;
pub mod export;
pub mod goal;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{Frequency, Money};

/// Parse a user-typed amount such as "1,250.50" or "$40"
pub(crate) fn parse_money(input: &str) -> MoneyMapResult<Money> {
    Money::parse(input)
        .map_err(|e| MoneyMapError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(input: &str) -> MoneyMapResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        MoneyMapError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format.", input))
    })
}

/// Parse a recurring contribution given as an amount plus a frequency
///
/// Both parts or neither must be given.
pub(crate) fn parse_recurrence(
    amount: Option<&str>,
    frequency: Option<&str>,
) -> MoneyMapResult<Option<(Money, Frequency)>> {
    match (amount, frequency) {
        (Some(amount), Some(frequency)) => Ok(Some((parse_money(amount)?, frequency.parse()?))),
        (None, None) => Ok(None),
        _ => Err(MoneyMapError::Validation(
            "A recurring contribution needs both --every and --frequency".into(),
        )),
    }
}
