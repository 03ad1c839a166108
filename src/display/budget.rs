//! Budget line tables

use tabled::{settings::Style, Table, Tabled};

use crate::models::BudgetEntry;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Recurring")]
    recurring: String,
}

pub fn format_budget_table(entries: &[BudgetEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "No budget lines yet. Add one with `moneymap budget add`.".to_string();
    }

    let rows = entries.iter().map(|entry| {
        let recurring = match (entry.recurring, entry.income_amount, entry.frequency) {
            (true, Some(amount), Some(frequency)) => {
                format!("{} {}", amount.format_with_symbol(symbol), frequency)
            }
            _ => String::new(),
        };

        if entry.is_income() {
            BudgetRow {
                id: entry.id.to_string(),
                category: entry.category.clone(),
                kind: entry.kind.to_string(),
                budgeted: entry.income.format_with_symbol(symbol),
                spent: String::new(),
                recurring,
            }
        } else {
            BudgetRow {
                id: entry.id.to_string(),
                category: entry.category.clone(),
                kind: entry.kind.to_string(),
                budgeted: entry.expense_amount.format_with_symbol(symbol),
                spent: entry.amount_spent.format_with_symbol(symbol),
                recurring,
            }
        }
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
