//! Audit log records
//!
//! Each create, update or delete is kept with the record's JSON on both
//! sides of the change, so the log alone is enough to see what happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::diff::generate_diff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Past-tense verb used in the log listing
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of stored records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    BudgetEntry,
    Goal,
    Category,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::BudgetEntry => "budget line",
            Self::Goal => "goal",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(rename = "at")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "op")]
    pub operation: Operation,
    #[serde(rename = "entity")]
    pub entity_type: EntityType,
    #[serde(rename = "id")]
    pub entity_id: String,
    /// Goal name, company name or category, whichever labels the record
    #[serde(default, rename = "label", skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    /// Field-level summary, updates only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn record<T: Serialize>(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: Option<&T>,
        after: Option<&T>,
    ) -> Self {
        let before = before.and_then(|value| serde_json::to_value(value).ok());
        let after = after.and_then(|value| serde_json::to_value(value).ok());
        let changes = match (&before, &after) {
            (Some(old), Some(new)) => generate_diff(old, new),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            changes,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self::record(Operation::Create, entity_type, entity_id.into(), entity_name, None, Some(entity))
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self::record(
            Operation::Update,
            entity_type,
            entity_id.into(),
            entity_name,
            Some(before),
            Some(after),
        )
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self::record(Operation::Delete, entity_type, entity_id.into(), entity_name, Some(entity), None)
    }

    /// `2025-05-01 09:30  updated  goal goal-1a2b3c4d "Car"` plus a changes line
    pub fn format_human_readable(&self) -> String {
        let label = self
            .entity_name
            .as_deref()
            .map(|name| format!(" \"{}\"", name))
            .unwrap_or_default();

        let mut line = format!(
            "{}  {:<7}  {} {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.operation,
            self.entity_type,
            self.entity_id,
            label
        );
        if let Some(changes) = &self.changes {
            line.push_str("\n    ");
            line.push_str(changes);
        }
        line
    }
}
