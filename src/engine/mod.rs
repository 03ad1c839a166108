//! Budget & goal analytics engine
//!
//! Pure functions that turn a snapshot of stored records into the figures the
//! presentation layer shows. Nothing in here touches storage or mutates a
//! record; every operation either returns a complete result or a typed error.
//!
//! - `aggregator`: income, expense and net totals
//! - `comparator`: actual vs budgeted spend per category
//! - `recurrence`: monthly equivalents of recurring contributions
//! - `progress`: goal completion, time left and pace
//! - `recommend`: rule-based advice
//!
//! [`analyze`] runs all of them once over a [`Snapshot`].

pub mod aggregator;
pub mod comparator;
pub mod progress;
pub mod recommend;
pub mod recurrence;

pub use aggregator::{summarize, LedgerEntry, Summary};
pub use comparator::{compare, BudgetLine, CategoryBudgets, Comparison};
pub use progress::{months_between, progress, GoalProgress};
pub use recommend::{recommend, recommend_messages, Recommendation, ENCOURAGEMENT_THRESHOLD};
pub use recurrence::{
    monthly_contribution, monthly_equivalent, recurring_breakdown, total_recurring_monthly,
    RecurringContribution, RecurringLine,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MoneyMapResult;
use crate::models::{BudgetEntry, FinancialGoal, Money, Transaction};

/// Point-in-time copy of every stored record the engine reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetEntry>,
    pub goals: Vec<FinancialGoal>,
}

impl Snapshot {
    pub fn new(
        transactions: Vec<Transaction>,
        budgets: Vec<BudgetEntry>,
        goals: Vec<FinancialGoal>,
    ) -> Self {
        Self {
            transactions,
            budgets,
            goals,
        }
    }

    /// Restrict transactions to `start..=end`; budgets and goals are kept
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> Snapshot {
        Snapshot {
            transactions: self
                .transactions
                .iter()
                .filter(|t| t.date >= start && t.date <= end)
                .cloned()
                .collect(),
            budgets: self.budgets.clone(),
            goals: self.goals.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.budgets.is_empty() && self.goals.is_empty()
    }
}

/// Recurring contributions across budgets and goals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringReport {
    pub budget_lines: Vec<RecurringLine>,
    pub goal_lines: Vec<RecurringLine>,
    pub total_monthly: Money,
}

/// Everything the dashboard shows, computed once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub as_of: NaiveDate,
    /// Totals over the snapshot's transactions
    pub summary: Summary,
    /// Totals over the budget entries (income baseline vs amount spent)
    pub budget_summary: Summary,
    pub comparisons: Vec<Comparison>,
    pub recurring: RecurringReport,
    pub goals: Vec<GoalProgress>,
    pub recommendations: Vec<Recommendation>,
}

impl Analysis {
    pub fn over_budget(&self) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter().filter(|c| c.over_budget)
    }

    /// Income left after budgeted spending
    pub fn income_left(&self) -> Money {
        self.budget_summary.net_balance
    }
}

/// Run the whole engine over `snapshot` as of `now`
pub fn analyze(snapshot: &Snapshot, now: NaiveDate) -> MoneyMapResult<Analysis> {
    let summary = summarize(&snapshot.transactions)?;
    let budget_summary = summarize(&snapshot.budgets)?;

    let comparisons = compare(&CategoryBudgets::from_budget_entries(&snapshot.budgets));

    let budget_lines = recurring_breakdown(&snapshot.budgets)?;
    let goal_lines = recurring_breakdown(&snapshot.goals)?;
    let total_monthly = recurrence::sum_monthly(budget_lines.iter().chain(goal_lines.iter()))?;

    let goals = snapshot
        .goals
        .iter()
        .map(|goal| progress(goal, goal.saved_amount, now))
        .collect::<MoneyMapResult<Vec<_>>>()?;

    let recommendations = recommend(&summary, &comparisons, &goals);

    tracing::debug!(
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        goals = snapshot.goals.len(),
        advice = recommendations.len(),
        "analysis computed"
    );

    Ok(Analysis {
        as_of: now,
        summary,
        budget_summary,
        comparisons,
        recurring: RecurringReport {
            budget_lines,
            goal_lines,
            total_monthly,
        },
        goals,
        recommendations,
    })
}
