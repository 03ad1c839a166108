//! Budget entry model
//!
//! One budget entry pairs a category's budgeted amount with what was actually
//! spent in the period. Income rows carry the period's income baseline and are
//! marked with `EntryKind::Income` instead of a magic category name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::goal::{check_recurrence, RecurrenceError};
use super::ids::BudgetEntryId;
use super::money::Money;
use super::transaction::EntryKind;

/// Category name older data files used to mark the income row
pub const LEGACY_INCOME_CATEGORY: &str = "Income";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredBudgetEntry")]
pub struct BudgetEntry {
    pub id: BudgetEntryId,

    pub category: String,

    pub kind: EntryKind,

    /// Income baseline for the period (income rows)
    #[serde(default)]
    pub income: Money,

    /// Budgeted amount for the category (expense rows)
    #[serde(default)]
    pub expense_amount: Money,

    /// Actual spend recorded against the category
    #[serde(default)]
    pub amount_spent: Money,

    #[serde(default)]
    pub recurring: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetEntry {
    /// Create an expense line budgeting `expense_amount` for `category`
    pub fn expense(category: impl Into<String>, expense_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetEntryId::new(),
            category: category.into(),
            kind: EntryKind::Expense,
            income: Money::zero(),
            expense_amount,
            amount_spent: Money::zero(),
            recurring: false,
            income_amount: None,
            frequency: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the income baseline row
    pub fn income_row(income: Money) -> Self {
        let mut entry = Self::expense(LEGACY_INCOME_CATEGORY, Money::zero());
        entry.kind = EntryKind::Income;
        entry.income = income;
        entry
    }

    pub fn with_spent(mut self, amount_spent: Money) -> Self {
        self.amount_spent = amount_spent;
        self
    }

    pub fn with_recurrence(mut self, amount: Money, frequency: Frequency) -> Self {
        self.recurring = true;
        self.income_amount = Some(amount);
        self.frequency = Some(frequency);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        if self.income.is_negative()
            || self.expense_amount.is_negative()
            || self.amount_spent.is_negative()
        {
            return Err(BudgetValidationError::NegativeAmount);
        }
        check_recurrence(self.recurring, self.income_amount, self.frequency)
            .map_err(BudgetValidationError::Recurrence)
    }
}

/// On-disk shape of a budget entry
///
/// Files written before `kind` existed marked the income row with the
/// "Income" category. Only rows without a `kind` are read that way; a row
/// that states its kind keeps it whatever its category is called.
#[derive(Deserialize)]
struct StoredBudgetEntry {
    id: BudgetEntryId,
    category: String,
    #[serde(default)]
    kind: Option<EntryKind>,
    #[serde(default)]
    income: Money,
    #[serde(default)]
    expense_amount: Money,
    #[serde(default)]
    amount_spent: Money,
    #[serde(default)]
    recurring: bool,
    #[serde(default)]
    income_amount: Option<Money>,
    #[serde(default)]
    frequency: Option<Frequency>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoredBudgetEntry> for BudgetEntry {
    fn from(stored: StoredBudgetEntry) -> Self {
        let mut entry = BudgetEntry {
            id: stored.id,
            category: stored.category,
            kind: stored.kind.unwrap_or_default(),
            income: stored.income,
            expense_amount: stored.expense_amount,
            amount_spent: stored.amount_spent,
            recurring: stored.recurring,
            income_amount: stored.income_amount,
            frequency: stored.frequency,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        };

        let legacy_income_row = stored.kind.is_none()
            && entry.category.trim().eq_ignore_ascii_case(LEGACY_INCOME_CATEGORY);
        if legacy_income_row {
            entry.kind = EntryKind::Income;
            if entry.income.is_zero() {
                entry.income = entry.expense_amount;
                entry.expense_amount = Money::zero();
            }
        }
        entry
    }
}

impl fmt::Display for BudgetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Income => write!(f, "{}: income {}", self.category, self.income),
            EntryKind::Expense => write!(
                f,
                "{}: {} of {}",
                self.category, self.amount_spent, self.expense_amount
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NegativeAmount,
    Recurrence(RecurrenceError),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NegativeAmount => write!(f, "Budget amounts cannot be negative"),
            Self::Recurrence(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
