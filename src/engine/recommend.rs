//! Recommendation Generator
//!
//! Deterministic advice derived from the period's totals, the category
//! comparisons and goal progress. Output order is fixed: over-budget
//! categories (in comparison order), then the net-balance warning, then goal
//! encouragement.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregator::Summary;
use super::comparator::Comparison;
use super::progress::GoalProgress;
use crate::models::Money;

/// Goals at or above this percentage count as well under way
pub const ENCOURAGEMENT_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Recommendation {
    /// A category spent more than its budget
    ReviewSpending { category: String, over_by: Money },
    /// Expenses exceeded income for the period
    NegativeBalance { deficit: Money },
    /// No goal has reached the halfway mark yet
    GoalEncouragement { goal_count: usize },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReviewSpending { category, over_by } => {
                write!(f, "Review spending in {} ({} over budget)", category, over_by)
            }
            Self::NegativeBalance { deficit } => write!(
                f,
                "Warning: expenses exceed income by {} this period",
                deficit
            ),
            Self::GoalEncouragement { goal_count } => {
                let noun = if *goal_count == 1 { "goal is" } else { "goals are" };
                write!(
                    f,
                    "Keep going: none of your {} {} halfway there yet; regular contributions add up",
                    goal_count, noun
                )
            }
        }
    }
}

/// Build the advice list for a period
pub fn recommend(
    summary: &Summary,
    comparisons: &[Comparison],
    goals: &[GoalProgress],
) -> Vec<Recommendation> {
    let mut advice: Vec<Recommendation> = comparisons
        .iter()
        .filter(|c| c.over_budget)
        .map(|c| Recommendation::ReviewSpending {
            category: c.category.clone(),
            over_by: c.overspend(),
        })
        .collect();

    if summary.net_balance.is_negative() {
        advice.push(Recommendation::NegativeBalance {
            deficit: -summary.net_balance,
        });
    }

    if !goals.is_empty() && goals.iter().all(|g| g.percent < ENCOURAGEMENT_THRESHOLD) {
        advice.push(Recommendation::GoalEncouragement {
            goal_count: goals.len(),
        });
    }

    advice
}

/// Same as [`recommend`], rendered to display strings
pub fn recommend_messages(
    summary: &Summary,
    comparisons: &[Comparison],
    goals: &[GoalProgress],
) -> Vec<String> {
    recommend(summary, comparisons, goals)
        .iter()
        .map(ToString::to_string)
        .collect()
}
