//! Full JSON export
//!
//! The document carries `financialGoals`, `transactions` and `budgets` as
//! stored, plus categories and some metadata for checking a file later.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{BudgetEntry, Category, FinancialGoal, Transaction};
use crate::storage::Storage;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub financial_goals: Vec<FinancialGoal>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetEntry>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub goal_count: usize,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> MoneyMapResult<Self> {
        let financial_goals = storage.goals.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let categories = storage.categories.get_all()?;

        let dates = || transactions.iter().map(|t| t.date);
        let metadata = ExportMetadata {
            goal_count: financial_goals.len(),
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            earliest_transaction: dates().min().map(|d| d.to_string()),
            latest_transaction: dates().max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            financial_goals,
            transactions,
            budgets,
            categories,
            metadata,
        })
    }

    /// Check the schema version, record invariants and ID uniqueness
    pub fn validate(&self) -> MoneyMapResult<()> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(MoneyMapError::Validation(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }

        let invalid = |what: String, reason: String| {
            MoneyMapError::Validation(format!("{}: {}", what, reason))
        };

        let mut seen = HashSet::new();
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(invalid(format!("Transaction {}", txn.id), "duplicate ID".into()));
            }
            txn.validate()
                .map_err(|e| invalid(format!("Transaction {}", txn.id), e.to_string()))?;
        }

        let mut seen = HashSet::new();
        for entry in &self.budgets {
            if !seen.insert(entry.id) {
                return Err(invalid(format!("Budget entry {}", entry.id), "duplicate ID".into()));
            }
            entry
                .validate()
                .map_err(|e| invalid(format!("Budget entry {}", entry.id), e.to_string()))?;
        }

        let mut seen = HashSet::new();
        for goal in &self.financial_goals {
            if !seen.insert(goal.id) {
                return Err(invalid(format!("Goal {}", goal.id), "duplicate ID".into()));
            }
            goal.validate()
                .map_err(|e| invalid(format!("Goal {}", goal.id), e.to_string()))?;
        }

        Ok(())
    }
}

pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> MoneyMapResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| MoneyMapError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| MoneyMapError::Export(e.to_string()))
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> MoneyMapResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;
    export.validate()?;
    Ok(export)
}
