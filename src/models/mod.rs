//! Core data models for MoneyMap
//!
//! Value types for the finance domain: transactions, budget entries,
//! financial goals, categories, money and contribution frequencies.

pub mod budget;
pub mod category;
pub mod frequency;
pub mod goal;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::BudgetEntry;
pub use category::{default_categories, Category};
pub use frequency::Frequency;
pub use goal::FinancialGoal;
pub use ids::{BudgetEntryId, CategoryId, GoalId, TransactionId};
pub use money::Money;
pub use transaction::{EntryKind, Transaction, TransactionStatus};
