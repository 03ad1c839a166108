//! Budget CLI commands

use clap::Subcommand;

use crate::display::budget::format_budget_table;
use crate::error::MoneyMapResult;
use crate::models::Money;
use crate::services::{BudgetService, BudgetUpdate, CreateBudgetInput};
use crate::state::AppState;

use super::{parse_money, parse_recurrence};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Budget an amount for a category
    Add {
        /// Category name
        category: String,
        /// Budgeted amount
        amount: String,
        /// Amount already spent
        #[arg(short, long)]
        spent: Option<String>,
        /// Recurring contribution amount
        #[arg(short, long)]
        every: Option<String>,
        /// Recurring contribution frequency (daily, weekly, monthly, quarterly)
        #[arg(short, long)]
        frequency: Option<String>,
    },
    /// Set the income baseline for the period
    Income {
        /// Income amount
        amount: String,
    },
    /// Record spending against a budget line
    Spend {
        /// Budget line ID or category name
        entry: String,
        /// Amount spent
        amount: String,
    },
    /// List budget lines
    List,
    /// Edit a budget line
    Edit {
        /// Budget line ID or category name
        entry: String,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New budgeted amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New spent amount
        #[arg(short, long)]
        spent: Option<String>,
        /// Recurring contribution amount
        #[arg(short, long)]
        every: Option<String>,
        /// Recurring contribution frequency
        #[arg(short, long)]
        frequency: Option<String>,
        /// Remove the recurring contribution
        #[arg(long, conflicts_with_all = ["every", "frequency"])]
        no_recurring: bool,
    },
    /// Delete a budget line
    Delete {
        /// Budget line ID or category name
        entry: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(state: &AppState, cmd: BudgetCommands) -> MoneyMapResult<()> {
    let service = BudgetService::new(&state.storage);
    let symbol = state.symbol();

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            spent,
            every,
            frequency,
        } => {
            let entry = service.create(CreateBudgetInput {
                category,
                expense_amount: parse_money(&amount)?,
                amount_spent: spent.as_deref().map(parse_money).transpose()?.unwrap_or_default(),
                recurrence: parse_recurrence(every.as_deref(), frequency.as_deref())?,
            })?;

            println!(
                "Budgeted {} for {} ({})",
                entry.expense_amount.format_with_symbol(symbol),
                entry.category,
                entry.id
            );
        }

        BudgetCommands::Income { amount } => {
            let entry = service.set_income(parse_money(&amount)?)?;
            println!("Income baseline set to {}", entry.income.format_with_symbol(symbol));
        }

        BudgetCommands::Spend { entry, amount } => {
            let line = service.find(&entry)?;
            let updated = service.record_spending(line.id, parse_money(&amount)?)?;

            let remaining = updated.expense_amount - updated.amount_spent;
            println!(
                "{}: spent {} of {}",
                updated.category,
                updated.amount_spent.format_with_symbol(symbol),
                updated.expense_amount.format_with_symbol(symbol)
            );
            if remaining.is_negative() {
                println!("Over budget by {}", (-remaining).format_with_symbol(symbol));
            }
        }

        BudgetCommands::List => {
            let entries = service.list()?;
            if entries.is_empty() {
                println!("No budget lines yet. Add one with: moneymap budget add <category> <amount>");
            } else {
                println!("{}", format_budget_table(&entries, symbol));
            }
        }

        BudgetCommands::Edit {
            entry,
            category,
            amount,
            spent,
            every,
            frequency,
            no_recurring,
        } => {
            let line = service.find(&entry)?;

            let recurrence = if no_recurring {
                Some(None)
            } else {
                parse_recurrence(every.as_deref(), frequency.as_deref())?.map(Some)
            };
            let amount = amount.as_deref().map(parse_money).transpose()?;
            let (income, expense_amount) = split_amount(line.is_income(), amount);

            let updated = service.update(
                line.id,
                BudgetUpdate {
                    category,
                    income,
                    expense_amount,
                    amount_spent: spent.as_deref().map(parse_money).transpose()?,
                    recurrence,
                },
            )?;
            println!("Updated budget line {} ({})", updated.id, updated.category);
        }

        BudgetCommands::Delete { entry } => {
            let line = service.find(&entry)?;
            let deleted = service.delete(line.id)?;
            println!("Deleted budget line for {}", deleted.category);
        }
    }

    Ok(())
}

/// `--amount` edits the income on the income row and the budget elsewhere
fn split_amount(is_income: bool, amount: Option<Money>) -> (Option<Money>, Option<Money>) {
    match amount {
        Some(amount) if is_income => (Some(amount), None),
        other => (None, other),
    }
}
