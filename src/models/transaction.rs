//! Transaction model
//!
//! A recorded money movement with a company/payee, a date, an explicit
//! income/expense kind and a separate workflow status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::MoneyMapError;

/// Whether a record brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = MoneyMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(MoneyMapError::Validation(format!(
                "Unknown entry kind '{}' (expected income or expense)",
                other
            ))),
        }
    }
}

/// Workflow status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Successful,
    /// The payment did not go through; no money moved
    Failed,
}

impl TransactionStatus {
    /// Check if money actually moved (or is expected to)
    pub fn counts_toward_totals(&self) -> bool {
        !matches!(self, Self::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Successful => write!(f, "Successful"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = MoneyMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "successful" | "success" => Ok(Self::Successful),
            "failed" => Ok(Self::Failed),
            other => Err(MoneyMapError::Validation(format!(
                "Unknown transaction status '{}' (expected pending, successful or failed)",
                other
            ))),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Who was paid, or who paid
    pub company_name: String,

    pub date: NaiveDate,

    /// Income or expense; the amount itself is never negative
    #[serde(default)]
    pub kind: EntryKind,

    #[serde(default)]
    pub status: TransactionStatus,

    pub amount: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        company_name: impl Into<String>,
        date: NaiveDate,
        kind: EntryKind,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            company_name: company_name.into(),
            date,
            kind,
            status: TransactionStatus::Pending,
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn income(company_name: impl Into<String>, date: NaiveDate, amount: Money) -> Self {
        Self::new(company_name, date, EntryKind::Income, amount)
    }

    pub fn expense(company_name: impl Into<String>, date: NaiveDate, amount: Money) -> Self {
        Self::new(company_name, date, EntryKind::Expense, amount)
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn set_status(&mut self, status: TransactionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.company_name.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCompanyName);
        }
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.company_name,
            sign,
            self.amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyCompanyName,
    NegativeAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCompanyName => write!(f, "Company name cannot be empty"),
            Self::NegativeAmount => {
                write!(f, "Transaction amount cannot be negative; use the income/expense kind")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_new_transaction_defaults_to_pending() {
        let txn = Transaction::expense("Grocer", date(), Money::from_units(42));
        assert_eq!(txn.status, TransactionStatus::Pending);
        assert!(!txn.is_income());
    }

    #[test]
    fn test_validation() {
        let txn = Transaction::income("Employer", date(), Money::from_units(3000));
        assert!(txn.validate().is_ok());

        let negative = Transaction::expense("Shop", date(), Money::from_cents(-1));
        assert_eq!(
            negative.validate(),
            Err(TransactionValidationError::NegativeAmount)
        );

        let unnamed = Transaction::expense("  ", date(), Money::from_units(1));
        assert_eq!(
            unnamed.validate(),
            Err(TransactionValidationError::EmptyCompanyName)
        );
    }

    #[test]
    fn test_failed_status_does_not_count() {
        assert!(TransactionStatus::Pending.counts_toward_totals());
        assert!(TransactionStatus::Successful.counts_toward_totals());
        assert!(!TransactionStatus::Failed.counts_toward_totals());
    }

    #[test]
    fn test_parse_status_and_kind() {
        assert_eq!(
            "Successful".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Successful
        );
        assert_eq!("income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert!("refund".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_display() {
        let txn = Transaction::income("Employer", date(), Money::from_units(10));
        assert_eq!(txn.to_string(), "2025-03-14 Employer +$10.00");
    }
}
