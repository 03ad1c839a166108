//! Rendering of engine results
//!
//! Everything here formats figures the engine already computed; no totals
//! are derived in this module.

use tabled::{settings::Style, Table, Tabled};

use super::report::{format_bar, format_header, format_percentage};
use crate::engine::{Comparison, Recommendation, RecurringLine, RecurringReport, Summary};
use crate::models::Money;

pub fn format_summary(summary: &Summary, income_left: Option<Money>, symbol: &str) -> String {
    let mut output = format_header("Summary");
    output.push('\n');
    output.push_str(&format!(
        "Income:      {:>14}\nExpenses:    {:>14}\nNet balance: {:>14}\n",
        summary.total_income.format_with_symbol(symbol),
        summary.total_expenses.format_with_symbol(symbol),
        summary.net_balance.format_with_symbol(symbol),
    ));
    if let Some(left) = income_left {
        output.push_str(&format!(
            "Income left: {:>14}  (budgeted income minus amounts spent)\n",
            left.format_with_symbol(symbol)
        ));
    }
    output
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    actual: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

pub fn format_comparison_table(comparisons: &[Comparison], symbol: &str) -> String {
    if comparisons.is_empty() {
        return "No budget lines to compare.".to_string();
    }

    let rows = comparisons.iter().map(|c| {
        let used = match c.used_percent() {
            Some(pct) => format!("{} {}", format_bar(pct, 100.0, 10), format_percentage(pct)),
            None => "n/a".to_string(),
        };
        ComparisonRow {
            category: if c.over_budget {
                format!("{} (over)", c.category)
            } else {
                c.category.clone()
            },
            budgeted: c.budgeted.format_with_symbol(symbol),
            actual: c.actual.format_with_symbol(symbol),
            remaining: c.remaining().format_with_symbol(symbol),
            used,
        }
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "Source")]
    source: &'static str,
    #[tabled(rename = "Name")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

fn recurring_rows<'a>(
    source: &'static str,
    lines: &'a [RecurringLine],
    symbol: &'a str,
) -> impl Iterator<Item = RecurringRow> + 'a {
    lines.iter().map(move |line| RecurringRow {
        source,
        label: line.label.clone(),
        amount: line.amount.format_with_symbol(symbol),
        frequency: line.frequency.to_string(),
        monthly: line.monthly.format_with_symbol(symbol),
    })
}

pub fn format_recurring(report: &RecurringReport, symbol: &str) -> String {
    if report.budget_lines.is_empty() && report.goal_lines.is_empty() {
        return "No recurring contributions.".to_string();
    }

    let rows: Vec<_> = recurring_rows("Budget", &report.budget_lines, symbol)
        .chain(recurring_rows("Goal", &report.goal_lines, symbol))
        .collect();

    format!(
        "{}\nTotal per month: {}",
        Table::new(rows).with(Style::rounded()),
        report.total_monthly.format_with_symbol(symbol)
    )
}

pub fn format_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "Nothing to flag. Spending is within budget.".to_string();
    }

    recommendations
        .iter()
        .map(|r| format!("• {}", r))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compare, BudgetLine, CategoryBudgets};
    use crate::models::Frequency;

    #[test]
    fn test_summary_lines() {
        let summary = Summary {
            total_income: Money::from_units(3000),
            total_expenses: Money::from_units(3100),
            net_balance: Money::from_units(-100),
        };
        let text = format_summary(&summary, Some(Money::from_units(1200)), "$");
        assert!(text.contains("$3000.00"));
        assert!(text.contains("-$100.00"));
        assert!(text.contains("Income left:"));
    }

    #[test]
    fn test_comparison_marks_over_budget() {
        let budgets: CategoryBudgets = [
            ("Groceries", BudgetLine::new(Money::from_units(500), Money::from_units(600))),
            ("Rent", BudgetLine::new(Money::from_units(1200), Money::from_units(1200))),
        ]
        .into_iter()
        .collect();
        let table = format_comparison_table(&compare(&budgets), "$");
        assert!(table.contains("Groceries (over)"));
        assert!(table.contains("-$100.00"));
        assert!(!table.contains("Rent (over)"));
    }

    #[test]
    fn test_recurring_total() {
        let report = RecurringReport {
            budget_lines: vec![],
            goal_lines: vec![RecurringLine {
                label: "Car".into(),
                amount: Money::from_units(1200),
                frequency: Frequency::Quarterly,
                monthly: Money::from_units(400),
            }],
            total_monthly: Money::from_units(400),
        };
        let text = format_recurring(&report, "$");
        assert!(text.contains("Quarterly"));
        assert!(text.ends_with("Total per month: $400.00"));
    }

    #[test]
    fn test_recommendations_list() {
        let recs = vec![Recommendation::NegativeBalance {
            deficit: Money::from_units(5),
        }];
        assert!(format_recommendations(&recs).starts_with("• Warning"));
        assert!(format_recommendations(&[]).starts_with("Nothing to flag"));
    }
}
