//! Goal CLI commands

use clap::Subcommand;

use crate::display::goal::{format_goal_details, format_goal_table};
use crate::engine::progress;
use crate::error::MoneyMapResult;
use crate::services::{CreateGoalInput, GoalService, GoalUpdate};
use crate::state::AppState;

use super::{parse_date, parse_money, parse_recurrence};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        by: String,
        /// Category the goal belongs to
        #[arg(short, long, default_value = "Savings")]
        category: String,
        /// Recurring contribution amount
        #[arg(short, long)]
        every: Option<String>,
        /// Recurring contribution frequency (daily, weekly, monthly, quarterly)
        #[arg(short, long)]
        frequency: Option<String>,
        /// Amount already saved
        #[arg(short, long)]
        saved: Option<String>,
    },
    /// List goals with progress
    List,
    /// Show goal details
    Show {
        /// Goal name or ID
        goal: String,
    },
    /// Edit a goal
    Edit {
        /// Goal name or ID
        goal: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New target amount
        #[arg(short, long)]
        target: Option<String>,
        /// New target date
        #[arg(short, long)]
        by: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// Recurring contribution amount
        #[arg(short, long)]
        every: Option<String>,
        /// Recurring contribution frequency
        #[arg(short, long)]
        frequency: Option<String>,
        /// Stop the recurring contribution
        #[arg(long, conflicts_with_all = ["every", "frequency"])]
        no_recurring: bool,
    },
    /// Put money toward a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        /// Amount contributed
        amount: String,
    },
    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(state: &AppState, cmd: GoalCommands) -> MoneyMapResult<()> {
    let service = GoalService::new(&state.storage);
    let symbol = state.symbol();
    let today = state.today();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            by,
            category,
            every,
            frequency,
            saved,
        } => {
            let goal = service.create(CreateGoalInput {
                name,
                target_amount: parse_money(&target)?,
                category,
                target_date: parse_date(&by)?,
                contribution: parse_recurrence(every.as_deref(), frequency.as_deref())?,
                saved_amount: saved.as_deref().map(parse_money).transpose()?.unwrap_or_default(),
            })?;

            println!(
                "Created goal '{}': {} by {}",
                goal.name,
                goal.target_amount.format_with_symbol(symbol),
                goal.target_date.format(&state.settings.date_format)
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::List => {
            let goals = service
                .list()?
                .into_iter()
                .map(|goal| {
                    let p = progress(&goal, goal.saved_amount, today)?;
                    Ok((goal, p))
                })
                .collect::<MoneyMapResult<Vec<_>>>()?;

            println!(
                "{}",
                format_goal_table(
                    &goals,
                    symbol,
                    &state.settings.date_format,
                    state.settings.at_risk_threshold
                )
            );
        }

        GoalCommands::Show { goal } => {
            let goal = service.find(&goal)?;
            let p = progress(&goal, goal.saved_amount, today)?;
            print!("{}", format_goal_details(&goal, &p, symbol));
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            by,
            category,
            every,
            frequency,
            no_recurring,
        } => {
            let goal = service.find(&goal)?;
            let contribution = if no_recurring {
                Some(None)
            } else {
                parse_recurrence(every.as_deref(), frequency.as_deref())?.map(Some)
            };

            let updated = service.update(
                goal.id,
                GoalUpdate {
                    name,
                    target_amount: target.as_deref().map(parse_money).transpose()?,
                    category,
                    target_date: by.as_deref().map(parse_date).transpose()?,
                    contribution,
                },
            )?;
            println!("Updated goal '{}'", updated.name);
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = service.find(&goal)?;
            let updated = service.contribute(goal.id, parse_money(&amount)?)?;
            let p = progress(&updated, updated.saved_amount, today)?;

            println!(
                "{}: {} of {} saved ({:.1}%)",
                updated.name,
                updated.saved_amount.format_with_symbol(symbol),
                updated.target_amount.format_with_symbol(symbol),
                p.percent
            );
            if p.is_complete() {
                println!("Goal reached!");
            }
        }

        GoalCommands::Delete { goal } => {
            let goal = service.find(&goal)?;
            let deleted = service.delete(goal.id)?;
            println!("Deleted goal '{}'", deleted.name);
        }
    }

    Ok(())
}
