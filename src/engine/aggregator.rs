//! Aggregator
//!
//! Folds a sequence of ledger records into income, expense and net totals.

use serde::{Deserialize, Serialize};

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{BudgetEntry, EntryKind, Money, Transaction};

/// A record that moves money in or out
pub trait LedgerEntry {
    /// Direction and amount, or `None` when the record carries no money
    fn flow(&self) -> Option<(EntryKind, Money)>;

    /// Short label used in error messages
    fn label(&self) -> String;
}

impl LedgerEntry for Transaction {
    fn flow(&self) -> Option<(EntryKind, Money)> {
        if self.status.counts_toward_totals() {
            Some((self.kind, self.amount))
        } else {
            None
        }
    }

    fn label(&self) -> String {
        format!("transaction {} ({})", self.id, self.company_name)
    }
}

impl LedgerEntry for BudgetEntry {
    fn flow(&self) -> Option<(EntryKind, Money)> {
        match self.kind {
            EntryKind::Income => Some((EntryKind::Income, self.income)),
            EntryKind::Expense => Some((EntryKind::Expense, self.amount_spent)),
        }
    }

    fn label(&self) -> String {
        format!("budget entry {} ({})", self.id, self.category)
    }
}

impl<T: LedgerEntry + ?Sized> LedgerEntry for &T {
    fn flow(&self) -> Option<(EntryKind, Money)> {
        (**self).flow()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Income, expense and net totals for a set of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_balance: Money,
}

impl Summary {
    /// Totals of two disjoint record sets
    pub fn combine(self, other: Summary) -> MoneyMapResult<Summary> {
        let total_income = self
            .total_income
            .checked_add(other.total_income)
            .ok_or_else(|| MoneyMapError::amount_overflow("Total income"))?;
        let total_expenses = self
            .total_expenses
            .checked_add(other.total_expenses)
            .ok_or_else(|| MoneyMapError::amount_overflow("Total expenses"))?;
        Summary::from_totals(total_income, total_expenses)
    }

    fn from_totals(total_income: Money, total_expenses: Money) -> MoneyMapResult<Summary> {
        let net_balance = total_income
            .checked_sub(total_expenses)
            .ok_or_else(|| MoneyMapError::amount_overflow("Net balance"))?;
        Ok(Summary {
            total_income,
            total_expenses,
            net_balance,
        })
    }

    pub fn is_deficit(&self) -> bool {
        self.net_balance.is_negative()
    }

    /// Share of income already spent, if there is any income
    pub fn spent_ratio(&self) -> Option<f64> {
        self.total_expenses.percent_of(self.total_income)
    }
}

/// Sum income and expenses over `entries`
///
/// Fails on the first record with a negative amount instead of summing it.
pub fn summarize<I>(entries: I) -> MoneyMapResult<Summary>
where
    I: IntoIterator,
    I::Item: LedgerEntry,
{
    let mut total_income = Money::zero();
    let mut total_expenses = Money::zero();

    for entry in entries {
        let Some((kind, amount)) = entry.flow() else {
            continue;
        };

        if amount.is_negative() {
            return Err(MoneyMapError::Validation(format!(
                "{} has a negative amount ({})",
                entry.label(),
                amount
            )));
        }

        let (total, what) = match kind {
            EntryKind::Income => (&mut total_income, "Total income"),
            EntryKind::Expense => (&mut total_expenses, "Total expenses"),
        };
        *total = total
            .checked_add(amount)
            .ok_or_else(|| MoneyMapError::amount_overflow(what))?;
    }

    Summary::from_totals(total_income, total_expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionStatus;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income("Employer", day(1), Money::from_units(3000)),
            Transaction::expense("Landlord", day(2), Money::from_units(1200)),
            Transaction::expense("Grocer", day(5), Money::from_cents(8550)),
        ]
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = summarize(Vec::<Transaction>::new()).unwrap();
        assert_eq!(summary, Summary::default());
        assert!(summary.total_income.is_zero());
        assert!(summary.total_expenses.is_zero());
        assert!(summary.net_balance.is_zero());
    }

    #[test]
    fn test_totals() {
        let summary = summarize(&sample()).unwrap();
        assert_eq!(summary.total_income, Money::from_units(3000));
        assert_eq!(summary.total_expenses, Money::from_cents(128550));
        assert_eq!(summary.net_balance, Money::from_cents(171450));
    }

    #[test]
    fn test_idempotent() {
        let txns = sample();
        assert_eq!(summarize(&txns).unwrap(), summarize(&txns).unwrap());
    }

    #[test]
    fn test_additive_over_disjoint_sets() {
        let all = sample();
        let (a, b) = all.split_at(1);
        let combined = summarize(a)
            .unwrap()
            .combine(summarize(b).unwrap())
            .unwrap();
        assert_eq!(summarize(&all).unwrap(), combined);
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let txns = vec![
            Transaction::income("Lottery", day(1), half),
            Transaction::income("Lottery", day(2), half),
        ];
        assert!(summarize(&txns).unwrap_err().is_validation());

        let one = summarize(&txns[..1]).unwrap();
        assert!(one.combine(one).unwrap_err().is_validation());
    }

    #[test]
    fn test_adding_expense_is_monotonic() {
        let mut txns = sample();
        let before = summarize(&txns).unwrap();

        txns.push(Transaction::expense("Cinema", day(9), Money::from_units(15)));
        let after = summarize(&txns).unwrap();

        assert!(after.total_expenses >= before.total_expenses);
        assert!(after.net_balance <= before.net_balance);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let txns = vec![Transaction::expense("Refund?", day(3), Money::from_cents(-500))];
        let err = summarize(&txns).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_failed_transactions_skipped() {
        let txns = vec![
            Transaction::income("Client", day(1), Money::from_units(100)),
            Transaction::expense("Airline", day(2), Money::from_units(400))
                .with_status(TransactionStatus::Failed),
        ];
        let summary = summarize(&txns).unwrap();
        assert!(summary.total_expenses.is_zero());
        assert_eq!(summary.net_balance, Money::from_units(100));
    }

    #[test]
    fn test_budget_entries() {
        let entries = vec![
            BudgetEntry::income_row(Money::from_units(4000)),
            BudgetEntry::expense("Groceries", Money::from_units(500)).with_spent(Money::from_units(600)),
            BudgetEntry::expense("Rent", Money::from_units(1500)).with_spent(Money::from_units(1500)),
        ];
        let summary = summarize(&entries).unwrap();
        assert_eq!(summary.total_income, Money::from_units(4000));
        assert_eq!(summary.total_expenses, Money::from_units(2100));
        assert_eq!(summary.net_balance, Money::from_units(1900));
    }

    #[test]
    fn test_deficit_and_ratio() {
        let summary = Summary {
            total_income: Money::from_units(100),
            total_expenses: Money::from_units(150),
            net_balance: Money::from_units(-50),
        };
        assert!(summary.is_deficit());
        assert_eq!(summary.spent_ratio(), Some(150.0));
        assert_eq!(Summary::default().spent_ratio(), None);
    }
}
