//! Contribution frequency
//!
//! How often a recurring amount (a goal contribution or a recurring budget
//! line) repeats, and its conversion factor to a monthly rate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MoneyMapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Quarterly,
        ]
    }

    /// Multiplier to a monthly rate as `(numerator, denominator)`
    pub const fn monthly_ratio(&self) -> (i64, i64) {
        match self {
            Frequency::Daily => (365, 12),
            Frequency::Weekly => (52, 12),
            Frequency::Monthly => (1, 1),
            Frequency::Quarterly => (1, 3),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Quarterly => write!(f, "Quarterly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = MoneyMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            other => Err(MoneyMapError::InvalidFrequency(format!(
                "unrecognized frequency '{}' (expected daily, weekly, monthly or quarterly)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" QUARTERLY ".parse::<Frequency>().unwrap(), Frequency::Quarterly);
    }

    #[test]
    fn test_parse_unknown_is_invalid_frequency() {
        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, MoneyMapError::InvalidFrequency(_)));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Frequency::Daily).unwrap();
        assert_eq!(json, "\"daily\"");
    }
}
