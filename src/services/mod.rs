//! Service layer for MoneyMap
//!
//! Services sit between the CLI and storage: they validate input, resolve
//! user-supplied references to records, persist changes and write the audit
//! trail. They never compute report figures; that is the engine's job.

pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

pub use budget::{BudgetService, BudgetUpdate, CreateBudgetInput};
pub use category::CategoryService;
pub use goal::{CreateGoalInput, GoalService, GoalUpdate};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService, TransactionUpdate};

use crate::error::{MoneyMapError, MoneyMapResult};

/// Pick the single record matching a user-supplied reference
///
/// No match becomes the error built by `not_found`; several matches are a
/// validation error asking for a longer reference.
pub(crate) fn resolve_one<T>(
    mut matches: Vec<T>,
    reference: &str,
    not_found: impl FnOnce(String) -> MoneyMapError,
) -> MoneyMapResult<T> {
    match matches.len() {
        0 => Err(not_found(reference.to_string())),
        1 => Ok(matches.remove(0)),
        n => Err(MoneyMapError::Validation(format!(
            "'{}' is ambiguous ({} matches); use a longer ID",
            reference, n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_one() {
        assert_eq!(resolve_one(vec![7], "x", MoneyMapError::goal_not_found).unwrap(), 7);
        assert!(resolve_one(Vec::<i32>::new(), "x", MoneyMapError::goal_not_found)
            .unwrap_err()
            .is_not_found());
        assert!(resolve_one(vec![1, 2], "x", MoneyMapError::goal_not_found)
            .unwrap_err()
            .is_validation());
    }
}
