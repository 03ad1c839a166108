//! Strongly-typed ID wrappers for all entity types
//!
//! Newtype wrappers keep transaction, budget, goal and category IDs from
//! being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generates an ID newtype with a short display prefix
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether a user-typed reference points at this ID.
            ///
            /// Accepts the full UUID, the display form (`prefix-xxxxxxxx`) or a
            /// UUID prefix of at least four characters.
            pub fn matches_reference(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let reference = reference.strip_prefix($display_prefix).unwrap_or(reference);
                reference.len() >= 4 && self.0.to_string().starts_with(&reference.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(BudgetEntryId, "bud-");
define_id!(GoalId, "goal-");
define_id!(CategoryId, "cat-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = GoalId::new();
        let display = id.to_string();
        assert!(display.starts_with("goal-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_matches_reference() {
        let id: TransactionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches_reference("txn-550e8400"));
        assert!(id.matches_reference("550e"));
        assert!(id.matches_reference("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches_reference("550"));
        assert!(!id.matches_reference("txn-deadbeef"));
    }

    #[test]
    fn test_id_serialization() {
        let id = BudgetEntryId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: BudgetEntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
