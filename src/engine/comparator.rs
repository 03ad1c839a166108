//! Comparator
//!
//! Compares actual spend against the budgeted amount for each category.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetEntry, Money};

/// Budgeted and actual amounts for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetLine {
    pub budgeted: Money,
    pub actual: Money,
}

impl BudgetLine {
    pub fn new(budgeted: Money, actual: Money) -> Self {
        Self { budgeted, actual }
    }
}

/// Category -> budget line mapping that remembers insertion order
///
/// Category names match case-insensitively; inserting a category twice adds
/// the amounts to the first line, which keeps its original spelling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBudgets {
    lines: Vec<(String, BudgetLine)>,
}

impl CategoryBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping from the expense rows of a budget
    pub fn from_budget_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a BudgetEntry>,
    {
        let mut budgets = Self::new();
        for entry in entries.into_iter().filter(|e| !e.is_income()) {
            budgets.insert(
                entry.category.clone(),
                BudgetLine::new(entry.expense_amount, entry.amount_spent),
            );
        }
        budgets
    }

    pub fn insert(&mut self, category: impl Into<String>, line: BudgetLine) {
        let category = category.into();
        let existing = self
            .lines
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(category.trim()));

        match existing {
            Some((_, current)) => {
                current.budgeted += line.budgeted;
                current.actual += line.actual;
            }
            None => self.lines.push((category.trim().to_string(), line)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&BudgetLine> {
        self.lines
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category.trim()))
            .map(|(_, line)| line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BudgetLine)> {
        self.lines.iter().map(|(name, line)| (name.as_str(), line))
    }
}

impl<S: Into<String>> FromIterator<(S, BudgetLine)> for CategoryBudgets {
    fn from_iter<T: IntoIterator<Item = (S, BudgetLine)>>(iter: T) -> Self {
        let mut budgets = Self::new();
        for (category, line) in iter {
            budgets.insert(category, line);
        }
        budgets
    }
}

/// Result of comparing one category's spend with its budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub category: String,
    pub budgeted: Money,
    pub actual: Money,
    pub over_budget: bool,
}

impl Comparison {
    /// Budget left (negative when overspent)
    pub fn remaining(&self) -> Money {
        self.budgeted - self.actual
    }

    /// Amount spent beyond the budget, zero when within budget
    pub fn overspend(&self) -> Money {
        if self.over_budget {
            self.actual - self.budgeted
        } else {
            Money::zero()
        }
    }

    /// Share of the budget used; `None` when nothing was budgeted
    pub fn used_percent(&self) -> Option<f64> {
        self.actual.percent_of(self.budgeted)
    }
}

/// Compare every category, in insertion order
///
/// Categories that differ only in case were merged on insert and are reported
/// once, under the spelling that was inserted first.
pub fn compare(budgets: &CategoryBudgets) -> Vec<Comparison> {
    budgets
        .iter()
        .map(|(category, line)| Comparison {
            category: category.to_string(),
            budgeted: line.budgeted,
            actual: line.actual,
            over_budget: line.actual > line.budgeted,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_over_budget_flag() {
        let budgets: CategoryBudgets =
            [("Groceries", BudgetLine::new(units(500), units(600)))].into_iter().collect();
        let result = compare(&budgets);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Groceries");
        assert!(result[0].over_budget);
        assert_eq!(result[0].overspend(), units(100));
        assert_eq!(result[0].remaining(), units(-100));
    }

    #[test]
    fn test_exactly_on_budget_is_not_over() {
        let budgets: CategoryBudgets =
            [("Rent", BudgetLine::new(units(1500), units(1500)))].into_iter().collect();
        let result = compare(&budgets);
        assert!(!result[0].over_budget);
        assert_eq!(result[0].overspend(), Money::zero());
        assert_eq!(result[0].used_percent(), Some(100.0));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let budgets: CategoryBudgets = [
            ("Utilities", BudgetLine::new(units(200), units(50))),
            ("Entertainment", BudgetLine::new(units(100), units(0))),
            ("Food", BudgetLine::new(units(300), units(320))),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = compare(&budgets).into_iter().map(|c| c.category).collect();
        assert_eq!(names, vec!["Utilities", "Entertainment", "Food"]);
    }

    #[test]
    fn test_zero_spend_categories_are_kept() {
        let budgets: CategoryBudgets =
            [("Others", BudgetLine::new(units(50), Money::zero()))].into_iter().collect();
        assert_eq!(compare(&budgets).len(), 1);
    }

    #[test]
    fn test_duplicate_category_accumulates() {
        let mut budgets = CategoryBudgets::new();
        budgets.insert("Food", BudgetLine::new(units(100), units(80)));
        budgets.insert("food", BudgetLine::new(units(50), units(90)));

        assert_eq!(budgets.len(), 1);
        let line = budgets.get("FOOD").unwrap();
        assert_eq!(line.budgeted, units(150));
        assert_eq!(line.actual, units(170));
    }

    #[test]
    fn test_merged_category_reported_under_first_spelling() {
        let entries = vec![
            BudgetEntry::expense("Dining Out", units(100)).with_spent(units(40)),
            BudgetEntry::expense("dining out", units(60)).with_spent(units(90)),
            BudgetEntry::expense("DINING OUT ", units(10)),
        ];
        let result = compare(&CategoryBudgets::from_budget_entries(&entries));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Dining Out");
        assert_eq!(result[0].budgeted, units(170));
        assert_eq!(result[0].actual, units(130));
        assert!(!result[0].over_budget);
    }

    #[test]
    fn test_from_budget_entries_skips_income_row() {
        let entries = vec![
            BudgetEntry::income_row(units(4000)),
            BudgetEntry::expense("Groceries", units(500)).with_spent(units(600)),
        ];
        let budgets = CategoryBudgets::from_budget_entries(&entries);
        assert_eq!(budgets.len(), 1);
        assert!(budgets.get("Income").is_none());
    }

    #[test]
    fn test_compare_is_idempotent() {
        let budgets: CategoryBudgets = [
            ("Food", BudgetLine::new(units(300), units(320))),
            ("Rent", BudgetLine::new(units(1500), units(1500))),
        ]
        .into_iter()
        .collect();
        assert_eq!(compare(&budgets), compare(&budgets));
    }

    #[test]
    fn test_empty_input() {
        assert!(compare(&CategoryBudgets::new()).is_empty());
    }
}
