//! Recurrence Analyzer
//!
//! Normalizes recurring contributions to a per-month rate so amounts with
//! different frequencies can be added and compared.

use serde::{Deserialize, Serialize};

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{BudgetEntry, FinancialGoal, Frequency, Money};

/// A record that may carry a recurring contribution
pub trait RecurringContribution {
    fn label(&self) -> String;
    fn is_recurring(&self) -> bool;
    fn contribution(&self) -> Option<Money>;
    fn frequency(&self) -> Option<Frequency>;
}

impl RecurringContribution for FinancialGoal {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn is_recurring(&self) -> bool {
        self.recurring
    }

    fn contribution(&self) -> Option<Money> {
        self.income_amount
    }

    fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }
}

impl RecurringContribution for BudgetEntry {
    fn label(&self) -> String {
        self.category.clone()
    }

    fn is_recurring(&self) -> bool {
        self.recurring
    }

    fn contribution(&self) -> Option<Money> {
        self.income_amount
    }

    fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }
}

impl<T: RecurringContribution + ?Sized> RecurringContribution for &T {
    fn label(&self) -> String {
        (**self).label()
    }

    fn is_recurring(&self) -> bool {
        (**self).is_recurring()
    }

    fn contribution(&self) -> Option<Money> {
        (**self).contribution()
    }

    fn frequency(&self) -> Option<Frequency> {
        (**self).frequency()
    }
}

/// Convert an amount paid at `frequency` into its monthly equivalent
///
/// ```
/// use moneymap::engine::monthly_equivalent;
/// use moneymap::models::{Frequency, Money};
///
/// let monthly = monthly_equivalent(Money::from_units(1200), Frequency::Quarterly).unwrap();
/// assert_eq!(monthly, Money::from_units(400));
/// ```
pub fn monthly_equivalent(amount: Money, frequency: Frequency) -> MoneyMapResult<Money> {
    let (numerator, denominator) = frequency.monthly_ratio();
    amount.mul_ratio(numerator, denominator).ok_or_else(|| {
        MoneyMapError::Validation(format!(
            "{} {} is too large to convert to a monthly amount",
            amount, frequency
        ))
    })
}

/// Contribution amount and frequency of a recurring record
///
/// `Ok(None)` for non-recurring records. A recurring record without a
/// frequency is an `InvalidFrequency` error.
fn recurring_terms<R: RecurringContribution>(entry: &R) -> MoneyMapResult<Option<(Money, Frequency)>> {
    if !entry.is_recurring() {
        return Ok(None);
    }

    let frequency = entry.frequency().ok_or_else(|| {
        MoneyMapError::InvalidFrequency(format!(
            "'{}' is marked recurring but has no frequency",
            entry.label()
        ))
    })?;
    let amount = entry.contribution().ok_or_else(|| {
        MoneyMapError::Validation(format!(
            "'{}' is marked recurring but has no contribution amount",
            entry.label()
        ))
    })?;

    Ok(Some((amount, frequency)))
}

/// Monthly rate of one record's contribution, `None` when not recurring
pub fn monthly_contribution<R: RecurringContribution>(entry: &R) -> MoneyMapResult<Option<Money>> {
    match recurring_terms(entry)? {
        Some((amount, frequency)) => monthly_equivalent(amount, frequency).map(Some),
        None => Ok(None),
    }
}

/// One recurring record with its normalized rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringLine {
    pub label: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub monthly: Money,
}

/// Recurring lines for every record flagged recurring, in input order
pub fn recurring_breakdown<I>(entries: I) -> MoneyMapResult<Vec<RecurringLine>>
where
    I: IntoIterator,
    I::Item: RecurringContribution,
{
    let mut lines = Vec::new();

    for entry in entries {
        if let Some((amount, frequency)) = recurring_terms(&entry)? {
            lines.push(RecurringLine {
                label: entry.label(),
                amount,
                frequency,
                monthly: monthly_equivalent(amount, frequency)?,
            });
        }
    }

    Ok(lines)
}

/// Sum of the monthly equivalents of all recurring records
pub fn total_recurring_monthly<I>(entries: I) -> MoneyMapResult<Money>
where
    I: IntoIterator,
    I::Item: RecurringContribution,
{
    sum_monthly(&recurring_breakdown(entries)?)
}

/// Checked sum of the `monthly` column of `lines`
pub(crate) fn sum_monthly<'a, I>(lines: I) -> MoneyMapResult<Money>
where
    I: IntoIterator<Item = &'a RecurringLine>,
{
    lines.into_iter().try_fold(Money::zero(), |total, line| {
        total
            .checked_add(line.monthly)
            .ok_or_else(|| MoneyMapError::amount_overflow("Monthly recurring total"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn goal(name: &str) -> FinancialGoal {
        FinancialGoal::new(
            name,
            Money::from_units(5000),
            "Savings",
            Utc::now().date_naive() + Duration::days(400),
        )
    }

    #[test]
    fn test_round_figures() {
        assert_eq!(
            monthly_equivalent(Money::from_units(1200), Frequency::Quarterly).unwrap(),
            Money::from_units(400)
        );
        assert_eq!(
            monthly_equivalent(Money::from_units(700), Frequency::Weekly).unwrap(),
            Money::from_cents(303333)
        );
        assert_eq!(
            monthly_equivalent(Money::from_units(100), Frequency::Daily).unwrap(),
            Money::from_cents(304167)
        );
        assert_eq!(
            monthly_equivalent(Money::from_units(250), Frequency::Monthly).unwrap(),
            Money::from_units(250)
        );
    }

    #[test]
    fn test_overflow_is_validation_error() {
        let err = monthly_equivalent(Money::from_cents(i64::MAX), Frequency::Daily).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_total_overflow_is_validation_error() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let goals = vec![
            goal("Yacht").with_contribution(half, Frequency::Monthly),
            goal("Island").with_contribution(half, Frequency::Monthly),
        ];
        assert!(total_recurring_monthly(&goals).unwrap_err().is_validation());
    }

    #[test]
    fn test_total_skips_non_recurring() {
        let goals = vec![
            goal("Car").with_contribution(Money::from_units(1200), Frequency::Quarterly),
            goal("House"),
            goal("Trip").with_contribution(Money::from_units(100), Frequency::Monthly),
        ];
        assert_eq!(total_recurring_monthly(&goals).unwrap(), Money::from_units(500));
    }

    #[test]
    fn test_missing_frequency_is_invalid_frequency() {
        let mut broken = goal("Broken");
        broken.recurring = true;
        broken.income_amount = Some(Money::from_units(10));

        let err = total_recurring_monthly([&broken]).unwrap_err();
        assert!(matches!(err, MoneyMapError::InvalidFrequency(_)));
    }

    #[test]
    fn test_budget_entries_contribute() {
        let entries = vec![
            BudgetEntry::expense("Gym", Money::from_units(40))
                .with_recurrence(Money::from_units(10), Frequency::Weekly),
            BudgetEntry::expense("Groceries", Money::from_units(500)),
        ];
        let lines = recurring_breakdown(&entries).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "Gym");
        assert_eq!(lines[0].frequency, Frequency::Weekly);
        // 10 * 52 / 12 = 43.333...
        assert_eq!(lines[0].monthly, Money::from_cents(4333));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(
            total_recurring_monthly(Vec::<FinancialGoal>::new()).unwrap(),
            Money::zero()
        );
    }
}
