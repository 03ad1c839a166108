//! Goal tables with progress

use tabled::{settings::Style, Table, Tabled};

use super::report::{format_bar, format_percentage};
use crate::engine::GoalProgress;
use crate::models::FinancialGoal;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// One-word status used in goal tables
pub fn goal_status(progress: &GoalProgress, at_risk_threshold: f64) -> &'static str {
    if progress.is_complete() {
        "Complete"
    } else if progress.overdue {
        "Overdue"
    } else if progress.on_track() == Some(false) {
        "Behind"
    } else if progress.is_at_risk(at_risk_threshold) {
        "At risk"
    } else {
        "On track"
    }
}

/// Goals paired with their computed progress, in the same order
pub fn format_goal_table(
    goals: &[(FinancialGoal, GoalProgress)],
    symbol: &str,
    date_format: &str,
    at_risk_threshold: f64,
) -> String {
    if goals.is_empty() {
        return "No goals yet. Add one with `moneymap goal add`.".to_string();
    }

    let rows = goals.iter().map(|(goal, progress)| GoalRow {
        name: goal.name.clone(),
        saved: progress.saved_amount.format_with_symbol(symbol),
        target: progress.target_amount.format_with_symbol(symbol),
        progress: format!(
            "{} {}",
            format_bar(progress.percent, 100.0, 10),
            format_percentage(progress.percent)
        ),
        due: if progress.overdue {
            goal.target_date.format(date_format).to_string()
        } else {
            format!(
                "{} ({} mo)",
                goal.target_date.format(date_format),
                progress.time_left_months
            )
        },
        status: goal_status(progress, at_risk_threshold).to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_goal_details(goal: &FinancialGoal, progress: &GoalProgress, symbol: &str) -> String {
    let mut output = format!(
        "Goal:       {} ({})\nCategory:   {}\nSaved:      {} of {} ({})\nRemaining:  {}\nDue:        {}",
        goal.name,
        goal.id,
        if goal.category.is_empty() { "-" } else { goal.category.as_str() },
        progress.saved_amount.format_with_symbol(symbol),
        progress.target_amount.format_with_symbol(symbol),
        format_percentage(progress.percent),
        progress.remaining().format_with_symbol(symbol),
        goal.target_date,
    );

    if progress.overdue {
        output.push_str(" (overdue)");
    } else {
        output.push_str(&format!(" ({} months left)", progress.time_left_months));
    }
    output.push('\n');

    if let (Some(amount), Some(frequency), Some(monthly)) =
        (goal.income_amount, goal.frequency, progress.monthly_contribution)
    {
        output.push_str(&format!(
            "Saving:     {} {} (~{} per month)\n",
            amount.format_with_symbol(symbol),
            frequency,
            monthly.format_with_symbol(symbol)
        ));
        if let Some(months) = progress.months_to_target {
            output.push_str(&format!("Reached in: {} month(s) at this pace\n", months));
        }
    }

    output
}
