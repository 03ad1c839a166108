//! Money type for representing currency amounts
//!
//! Amounts are stored as integer cents so that repeated additions never drift.
//! Rational scaling (frequency conversion, ratios) is done in `i128` and
//! rounded half away from zero to the nearest cent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use moneymap::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Sum that returns `None` instead of overflowing
    pub const fn checked_add(self, rhs: Money) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    pub const fn checked_sub(self, rhs: Money) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Scale by `numerator / denominator`, rounding half away from zero.
    ///
    /// Returns `None` when the denominator is zero or the result does not fit.
    ///
    /// ```
    /// use moneymap::models::Money;
    /// let weekly = Money::from_units(700);
    /// assert_eq!(weekly.mul_ratio(52, 12), Some(Money::from_cents(303333)));
    /// ```
    pub fn mul_ratio(&self, numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }

        let scaled = self.0 as i128 * numerator as i128;
        let den = denominator as i128;
        let quotient = scaled / den;
        let remainder = scaled % den;

        // Round half away from zero
        let rounded = if remainder.abs() * 2 >= den.abs() {
            if (scaled < 0) != (den < 0) {
                quotient - 1
            } else {
                quotient + 1
            }
        } else {
            quotient
        };

        i64::try_from(rounded).ok().map(Self)
    }

    /// Express this amount as a percentage of `whole`
    ///
    /// Returns `None` when `whole` is zero.
    pub fn percent_of(&self, whole: Money) -> Option<f64> {
        if whole.is_zero() {
            return None;
        }
        Some(self.0 as f64 * 100.0 / whole.0 as f64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "1,250.00" and "10" (whole units).
    /// More than two decimal places is an error rather than a rounding.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let rest: String = rest.chars().filter(|c| *c != ',').collect();

        if rest.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest.as_str(), ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => fraction.parse().map_err(|_| invalid())?,
            _ => return Err(MoneyParseError::TooPrecise(trimmed.to_string())),
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

macro_rules! impl_cent_ops {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident => $sym:tt;)*) => {
        $(
            impl $op for Money {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self {
                    Self(self.0 $sym rhs.0)
                }
            }

            impl $assign for Money {
                fn $assign_method(&mut self, rhs: Self) {
                    *self = *self $sym rhs;
                }
            }
        )*
    };
}

impl_cent_ops! {
    Add::add, AddAssign::add_assign => +;
    Sub::sub, SubAssign::sub_assign => -;
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Rejected input from [`Money::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("'{0}' is not an amount like 12, 12.50 or 1,250.00")]
    InvalidFormat(String),
    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_and_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
        assert_eq!(Money::from_units(12).cents(), 1200);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::from_cents(199).format_with_symbol("€"), "€1.99");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("1,250.00").unwrap().cents(), 125000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("12abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_parse_rejects_sub_cent_precision() {
        assert_eq!(
            Money::parse("19.999"),
            Err(MoneyParseError::TooPrecise("19.999".into()))
        );
        assert!(Money::parse("$0.001").is_err());
        assert_eq!(Money::parse("19.99").unwrap().cents(), 1999);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!(big.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(big.checked_add(Money::from_cents(2)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_units(5).checked_sub(Money::from_units(7)),
            Some(Money::from_units(-2))
        );
    }

    #[test]
    fn test_mul_ratio_exact() {
        assert_eq!(
            Money::from_units(1200).mul_ratio(1, 3),
            Some(Money::from_units(400))
        );
        assert_eq!(Money::from_units(5).mul_ratio(1, 1), Some(Money::from_units(5)));
    }

    #[test]
    fn test_mul_ratio_rounds_half_away_from_zero() {
        // 100 * 365 / 12 = 3041.666...
        assert_eq!(
            Money::from_units(100).mul_ratio(365, 12),
            Some(Money::from_cents(304167))
        );
        // 0.05 / 2 = 0.025 -> 0.03
        assert_eq!(Money::from_cents(5).mul_ratio(1, 2), Some(Money::from_cents(3)));
        assert_eq!(Money::from_cents(-5).mul_ratio(1, 2), Some(Money::from_cents(-3)));
    }

    #[test]
    fn test_mul_ratio_zero_denominator() {
        assert_eq!(Money::from_units(1).mul_ratio(1, 0), None);
    }

    #[test]
    fn test_percent_of() {
        let saved = Money::from_units(250);
        let target = Money::from_units(1000);
        assert_eq!(saved.percent_of(target), Some(25.0));
        assert_eq!(saved.percent_of(Money::zero()), None);
    }

    #[test]
    fn test_arithmetic() {
        let mut balance = Money::from_units(10);
        balance += Money::from_cents(250);
        balance -= Money::from_units(20);
        assert_eq!(balance, Money::from_cents(-750));
        assert_eq!(-balance, Money::from_cents(750));

        let amounts = [Money::from_cents(100), Money::from_cents(200), Money::from_cents(300)];
        let by_ref: Money = amounts.iter().sum();
        assert_eq!(by_ref, Money::from_cents(600));
        assert_eq!(amounts.into_iter().sum::<Money>(), by_ref);
    }

    #[test]
    fn test_stored_as_plain_cents() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1050)).unwrap(), "1050");
        let back: Money = serde_json::from_str("-99").unwrap();
        assert_eq!(back, Money::from_cents(-99));
    }
}
