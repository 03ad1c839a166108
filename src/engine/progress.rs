//! Goal Progress Calculator
//!
//! Percent complete, time left and contribution pace for a financial goal.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::recurrence::monthly_contribution;
use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{FinancialGoal, GoalId, Money};

/// Progress of one goal as of a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: GoalId,
    pub name: String,
    pub target_amount: Money,
    pub saved_amount: Money,
    /// 0.0 ..= 100.0
    pub percent: f64,
    pub time_left_months: u32,
    pub overdue: bool,
    /// Monthly equivalent of the recurring contribution, if any
    pub monthly_contribution: Option<Money>,
    /// Months of contributions needed to cover what is still missing
    pub months_to_target: Option<u32>,
}

impl GoalProgress {
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }

    /// Below the caller's display threshold (conventionally 50%)
    pub fn is_at_risk(&self, threshold_percent: f64) -> bool {
        self.percent < threshold_percent
    }

    /// Whether the recurring contribution reaches the target in time
    ///
    /// `None` for goals without a recurring contribution.
    pub fn on_track(&self) -> Option<bool> {
        if self.is_complete() {
            return Some(true);
        }
        self.months_to_target
            .map(|months| !self.overdue && months <= self.time_left_months)
    }

    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.saved_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }
}

/// Whole calendar months from `from` to `to`
///
/// A month only counts once its day-of-month has been reached, so
/// Jan 31 -> Feb 28 is 0 months. Negative when `to` is before `from`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    if to < from {
        return -months_between(to, from);
    }

    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

/// Compute a goal's progress from the amount saved so far
pub fn progress(goal: &FinancialGoal, saved_amount: Money, now: NaiveDate) -> MoneyMapResult<GoalProgress> {
    if goal.target_amount.is_negative() {
        return Err(MoneyMapError::Validation(format!(
            "Goal '{}' has a negative target amount ({})",
            goal.name, goal.target_amount
        )));
    }

    let percent = saved_amount
        .percent_of(goal.target_amount)
        .ok_or_else(|| {
            MoneyMapError::DivisionByZero(format!("goal '{}' has a zero target amount", goal.name))
        })?
        .clamp(0.0, 100.0);

    let overdue = now > goal.target_date;
    let time_left_months = if overdue {
        0
    } else {
        months_between(now, goal.target_date).max(0) as u32
    };

    let monthly = monthly_contribution(goal)?;

    let remaining = goal.target_amount - saved_amount;
    let months_to_target = monthly.filter(|m| m.is_positive()).map(|m| {
        if remaining.is_positive() {
            let needed = (remaining.cents() + m.cents() - 1) / m.cents();
            u32::try_from(needed).unwrap_or(u32::MAX)
        } else {
            0
        }
    });

    Ok(GoalProgress {
        goal_id: goal.id,
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        saved_amount,
        percent,
        time_left_months,
        overdue,
        monthly_contribution: monthly,
        months_to_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(target_units: i64, target_date: NaiveDate) -> FinancialGoal {
        FinancialGoal::new("Emergency fund", Money::from_units(target_units), "Savings", target_date)
    }

    #[test]
    fn test_zero_saved_is_zero_percent() {
        let g = goal(1000, date(2026, 1, 1));
        let p = progress(&g, Money::zero(), date(2025, 1, 1)).unwrap();
        assert_eq!(p.percent, 0.0);
    }

    #[test]
    fn test_target_reached_is_hundred_percent() {
        let g = goal(1000, date(2026, 1, 1));
        let p = progress(&g, Money::from_units(1000), date(2025, 1, 1)).unwrap();
        assert_eq!(p.percent, 100.0);
        assert!(p.is_complete());
    }

    #[test]
    fn test_saturates_above_target() {
        let g = goal(1000, date(2026, 1, 1));
        let p = progress(&g, Money::from_units(2500), date(2025, 1, 1)).unwrap();
        assert_eq!(p.percent, 100.0);
        assert_eq!(p.remaining(), Money::zero());
    }

    #[test]
    fn test_negative_saved_clamps_to_zero() {
        let g = goal(1000, date(2026, 1, 1));
        let p = progress(&g, Money::from_units(-5), date(2025, 1, 1)).unwrap();
        assert_eq!(p.percent, 0.0);
    }

    #[test]
    fn test_zero_target_is_division_by_zero() {
        let g = goal(0, date(2026, 1, 1));
        let err = progress(&g, Money::zero(), date(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, MoneyMapError::DivisionByZero(_)));
    }

    #[test]
    fn test_negative_target_is_validation() {
        let g = goal(-10, date(2026, 1, 1));
        assert!(progress(&g, Money::zero(), date(2025, 1, 1))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_overdue_goal() {
        let now = date(2025, 6, 15);
        let g = goal(1000, date(2025, 6, 14));
        let p = progress(&g, Money::from_units(200), now).unwrap();
        assert_eq!(p.time_left_months, 0);
        assert!(p.overdue);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let now = date(2025, 6, 15);
        let p = progress(&goal(1000, now), Money::zero(), now).unwrap();
        assert!(!p.overdue);
        assert_eq!(p.time_left_months, 0);
    }

    #[test]
    fn test_time_left_in_whole_months() {
        let g = goal(1000, date(2025, 12, 10));
        let p = progress(&g, Money::zero(), date(2025, 6, 15)).unwrap();
        assert_eq!(p.time_left_months, 5);
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2025, 1, 15), date(2025, 3, 15)), 2);
        assert_eq!(months_between(date(2025, 1, 31), date(2025, 2, 28)), 0);
        assert_eq!(months_between(date(2024, 11, 1), date(2025, 2, 1)), 3);
        assert_eq!(months_between(date(2025, 3, 15), date(2025, 1, 15)), -2);
    }

    #[test]
    fn test_recurring_contribution_pace() {
        let g = goal(1200, date(2026, 6, 1))
            .with_contribution(Money::from_units(300), Frequency::Quarterly);
        let p = progress(&g, Money::from_units(200), date(2025, 6, 1)).unwrap();

        assert_eq!(p.monthly_contribution, Some(Money::from_units(100)));
        // 1000 left at 100/month
        assert_eq!(p.months_to_target, Some(10));
        assert_eq!(p.time_left_months, 12);
        assert_eq!(p.on_track(), Some(true));
    }

    #[test]
    fn test_recurring_contribution_too_slow() {
        let g = goal(1200, date(2025, 9, 1))
            .with_contribution(Money::from_units(50), Frequency::Monthly);
        let p = progress(&g, Money::zero(), date(2025, 6, 1)).unwrap();
        assert_eq!(p.months_to_target, Some(24));
        assert_eq!(p.on_track(), Some(false));
    }

    #[test]
    fn test_non_recurring_has_no_pace() {
        let p = progress(&goal(500, date(2026, 1, 1)), Money::zero(), date(2025, 1, 1)).unwrap();
        assert_eq!(p.monthly_contribution, None);
        assert_eq!(p.on_track(), None);
    }

    #[test]
    fn test_at_risk_threshold() {
        let g = goal(1000, date(2026, 1, 1));
        let p = progress(&g, Money::from_units(499), date(2025, 1, 1)).unwrap();
        assert!(p.is_at_risk(50.0));

        let p = progress(&g, Money::from_units(500), date(2025, 1, 1)).unwrap();
        assert!(!p.is_at_risk(50.0));
    }
}
