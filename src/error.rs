//! Custom error types for MoneyMap
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The analytics engine only ever produces
//! `Validation`, `DivisionByZero` and `InvalidFrequency`; the remaining
//! variants belong to the storage, config and export layers.

use thiserror::Error;

/// The main error type for MoneyMap operations
#[derive(Error, Debug)]
pub enum MoneyMapError {
    /// Malformed or out-of-invariant input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A ratio was requested against a zero denominator
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// A frequency tag was missing or not recognized
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl MoneyMapError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budget entries
    pub fn budget_entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a validation error for a total that no longer fits in cents
    pub fn amount_overflow(what: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{} is too large to represent", what))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for MoneyMapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MoneyMapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for MoneyMap operations
pub type MoneyMapResult<T> = Result<T, MoneyMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MoneyMapError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = MoneyMapError::goal_not_found("Vacation");
        assert_eq!(err.to_string(), "Goal not found: Vacation");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_engine_errors_display() {
        let err = MoneyMapError::InvalidFrequency("fortnightly".into());
        assert_eq!(err.to_string(), "Invalid frequency: fortnightly");

        let err = MoneyMapError::DivisionByZero("goal target amount is zero".into());
        assert!(err.to_string().starts_with("Division by zero"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MoneyMapError = io_err.into();
        assert!(matches!(err, MoneyMapError::Io(_)));
    }
}
