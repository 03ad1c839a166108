//! Financial goal model
//!
//! A savings target with a deadline, optionally fed by a recurring
//! contribution (an amount plus a frequency).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::Frequency;
use super::ids::GoalId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub recurring: bool,
    /// Recurring contribution amount; required when `recurring`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Money>,
    /// Recurring contribution frequency; required when `recurring`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    pub target_date: NaiveDate,
    /// Amount saved toward the goal so far
    #[serde(default)]
    pub saved_amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialGoal {
    pub fn new(
        name: impl Into<String>,
        target_amount: Money,
        category: impl Into<String>,
        target_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            category: category.into(),
            recurring: false,
            income_amount: None,
            frequency: None,
            target_date,
            saved_amount: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a recurring contribution
    pub fn with_contribution(mut self, amount: Money, frequency: Frequency) -> Self {
        self.recurring = true;
        self.income_amount = Some(amount);
        self.frequency = Some(frequency);
        self
    }

    pub fn with_saved(mut self, saved_amount: Money) -> Self {
        self.saved_amount = saved_amount;
        self
    }

    /// Drop the recurring contribution
    pub fn clear_contribution(&mut self) {
        self.recurring = false;
        self.income_amount = None;
        self.frequency = None;
        self.updated_at = Utc::now();
    }

    /// Amount still missing to reach the target (never negative)
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.saved_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Validate the goal's own invariants
    ///
    /// The target date is checked against the creation date, so an old goal
    /// does not become invalid just because its deadline has passed.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.saved_amount.is_negative() {
            return Err(GoalValidationError::NegativeSaved);
        }
        if self.target_date < self.created_at.date_naive() {
            return Err(GoalValidationError::TargetDateInPast);
        }
        check_recurrence(self.recurring, self.income_amount, self.frequency)
            .map_err(GoalValidationError::Recurrence)
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {} by {})",
            self.name,
            self.saved_amount,
            self.target_amount,
            self.target_date.format("%Y-%m-%d")
        )
    }
}

/// Check the recurring-contribution invariant shared by goals and budget lines
///
/// Recurring records need both an amount and a frequency; non-recurring
/// records must carry neither.
pub fn check_recurrence(
    recurring: bool,
    amount: Option<Money>,
    frequency: Option<Frequency>,
) -> Result<(), RecurrenceError> {
    match (recurring, amount, frequency) {
        (true, None, _) => Err(RecurrenceError::MissingAmount),
        (true, Some(_), None) => Err(RecurrenceError::MissingFrequency),
        (true, Some(amount), Some(_)) if !amount.is_positive() => {
            Err(RecurrenceError::NonPositiveAmount)
        }
        (true, Some(_), Some(_)) => Ok(()),
        (false, None, None) => Ok(()),
        (false, _, _) => Err(RecurrenceError::UnexpectedContribution),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceError {
    MissingAmount,
    MissingFrequency,
    NonPositiveAmount,
    UnexpectedContribution,
}

impl fmt::Display for RecurrenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAmount => write!(f, "Recurring entries need a contribution amount"),
            Self::MissingFrequency => write!(f, "Recurring entries need a frequency"),
            Self::NonPositiveAmount => write!(f, "Recurring contribution must be positive"),
            Self::UnexpectedContribution => write!(
                f,
                "Contribution amount and frequency are only allowed on recurring entries"
            ),
        }
    }
}

impl std::error::Error for RecurrenceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NegativeSaved,
    TargetDateInPast,
    Recurrence(RecurrenceError),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target amount must be greater than zero"),
            Self::NegativeSaved => write!(f, "Saved amount cannot be negative"),
            Self::TargetDateInPast => {
                write!(f, "Goal target date cannot be before the goal was created")
            }
            Self::Recurrence(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GoalValidationError {}
