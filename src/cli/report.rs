//! CLI commands for reports
//!
//! Every report runs the analysis engine over a snapshot of storage, so the
//! figures shown by different reports always agree with each other.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::display::analysis::{
    format_comparison_table, format_recommendations, format_recurring, format_summary,
};
use crate::display::goal::format_goal_table;
use crate::display::report::format_header;
use crate::engine::{analyze, Analysis, Snapshot};
use crate::error::MoneyMapResult;
use crate::state::AppState;

use super::parse_date;

/// Date range applied to transactions
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl RangeArgs {
    fn bounds(&self) -> MoneyMapResult<Option<(NaiveDate, NaiveDate)>> {
        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;
        Ok(match (from, to) {
            (None, None) => None,
            (from, to) => Some((from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))),
        })
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and net balance
    Summary {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Budgeted vs actual spending per category
    Budget,

    /// Recurring contributions normalized to a month
    Recurring,

    /// Progress toward every goal
    Goals,

    /// Suggestions based on spending and goals
    #[command(alias = "recommendations")]
    Advice {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Every report at once
    #[command(alias = "dashboard")]
    All {
        #[command(flatten)]
        range: RangeArgs,

        /// Print the analysis as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(state: &AppState, cmd: ReportCommands) -> MoneyMapResult<()> {
    let symbol = state.symbol();

    match cmd {
        ReportCommands::Summary { range } => {
            let analysis = run_analysis(state, &range)?;
            print!(
                "{}",
                format_summary(&analysis.summary, Some(analysis.income_left()), symbol)
            );
        }

        ReportCommands::Budget => {
            let analysis = run_analysis(state, &RangeArgs::default())?;
            println!("{}", format_comparison_table(&analysis.comparisons, symbol));
        }

        ReportCommands::Recurring => {
            let analysis = run_analysis(state, &RangeArgs::default())?;
            print!("{}", format_recurring(&analysis.recurring, symbol));
        }

        ReportCommands::Goals => {
            let snapshot = state.storage.snapshot()?;
            let analysis = analyze(&snapshot, state.today())?;
            print_goals(state, &snapshot, &analysis);
        }

        ReportCommands::Advice { range } => {
            let analysis = run_analysis(state, &range)?;
            println!("{}", format_recommendations(&analysis.recommendations));
        }

        ReportCommands::All { range, json } => {
            let snapshot = load_snapshot(state, &range)?;
            let analysis = analyze(&snapshot, state.today())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
                return Ok(());
            }

            print!(
                "{}",
                format_summary(&analysis.summary, Some(analysis.income_left()), symbol)
            );
            println!();
            println!("{}", format_header("Budget"));
            println!("{}", format_comparison_table(&analysis.comparisons, symbol));
            println!();
            print!("{}", format_recurring(&analysis.recurring, symbol));
            println!();
            println!("{}", format_header("Goals"));
            print_goals(state, &snapshot, &analysis);
            println!();
            println!("{}", format_header("Advice"));
            println!("{}", format_recommendations(&analysis.recommendations));
        }
    }

    Ok(())
}

fn load_snapshot(state: &AppState, range: &RangeArgs) -> MoneyMapResult<Snapshot> {
    let snapshot = state.storage.snapshot()?;
    Ok(match range.bounds()? {
        Some((start, end)) => {
            tracing::debug!(%start, %end, "restricting report to date range");
            snapshot.within(start, end)
        }
        None => snapshot,
    })
}

fn run_analysis(state: &AppState, range: &RangeArgs) -> MoneyMapResult<Analysis> {
    analyze(&load_snapshot(state, range)?, state.today())
}

fn print_goals(state: &AppState, snapshot: &Snapshot, analysis: &Analysis) {
    let goals: Vec<_> = snapshot
        .goals
        .iter()
        .cloned()
        .zip(analysis.goals.iter().cloned())
        .collect();

    println!(
        "{}",
        format_goal_table(
            &goals,
            state.symbol(),
            &state.settings.date_format,
            state.settings.at_risk_threshold
        )
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(from: Option<&str>, to: Option<&str>) -> RangeArgs {
        RangeArgs {
            from: from.map(String::from),
            to: to.map(String::from),
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(range(None, None).bounds().unwrap(), None);

        let (start, end) = range(Some("2025-01-01"), None).bounds().unwrap().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::MAX);

        assert!(range(Some("01/02/2025"), None).bounds().is_err());
    }
}
