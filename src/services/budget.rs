//! Budget service
//!
//! Manages the income baseline row and the per-category expense lines.

use chrono::Utc;

use crate::audit::EntityType;
use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{BudgetEntry, BudgetEntryId, EntryKind, Frequency, Money};
use crate::storage::Storage;

use super::resolve_one;

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category: String,
    pub expense_amount: Money,
    pub amount_spent: Money,
    pub recurrence: Option<(Money, Frequency)>,
}

/// Changes to a budget line; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub income: Option<Money>,
    pub expense_amount: Option<Money>,
    pub amount_spent: Option<Money>,
    /// `Some(None)` removes the recurring contribution
    pub recurrence: Option<Option<(Money, Frequency)>>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an expense line for a category
    pub fn create(&self, input: CreateBudgetInput) -> MoneyMapResult<BudgetEntry> {
        let mut entry = BudgetEntry::expense(input.category.trim(), input.expense_amount)
            .with_spent(input.amount_spent);
        if let Some((amount, frequency)) = input.recurrence {
            entry = entry.with_recurrence(amount, frequency);
        }

        entry
            .validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        if self.storage.categories.get_by_name(&entry.category)?.is_none() {
            tracing::warn!(category = %entry.category, "budget line uses a category that is not defined");
        }

        self.save_new(entry)
    }

    /// Set the income baseline, creating the income row on first use
    pub fn set_income(&self, income: Money) -> MoneyMapResult<BudgetEntry> {
        match self.income_entry()? {
            Some(existing) => self.update(
                existing.id,
                BudgetUpdate {
                    income: Some(income),
                    ..Default::default()
                },
            ),
            None => {
                let entry = BudgetEntry::income_row(income);
                entry
                    .validate()
                    .map_err(|e| MoneyMapError::Validation(e.to_string()))?;
                self.save_new(entry)
            }
        }
    }

    pub fn income_entry(&self) -> MoneyMapResult<Option<BudgetEntry>> {
        Ok(self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .find(BudgetEntry::is_income))
    }

    pub fn get(&self, id: BudgetEntryId) -> MoneyMapResult<Option<BudgetEntry>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget line by ID reference, falling back to its category name
    pub fn find(&self, reference: &str) -> MoneyMapResult<BudgetEntry> {
        let all = self.storage.budgets.get_all()?;

        let by_id: Vec<_> = all
            .iter()
            .filter(|e| e.id.matches_reference(reference))
            .cloned()
            .collect();
        if !by_id.is_empty() {
            return resolve_one(by_id, reference, MoneyMapError::budget_entry_not_found);
        }

        let by_category = all
            .into_iter()
            .filter(|e| e.category.trim().eq_ignore_ascii_case(reference.trim()))
            .collect();
        resolve_one(by_category, reference, MoneyMapError::budget_entry_not_found)
    }

    /// All budget lines in creation order
    pub fn list(&self) -> MoneyMapResult<Vec<BudgetEntry>> {
        self.storage.budgets.get_all()
    }

    pub fn update(&self, id: BudgetEntryId, changes: BudgetUpdate) -> MoneyMapResult<BudgetEntry> {
        let mut entry = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| MoneyMapError::budget_entry_not_found(id.to_string()))?;
        let before = entry.clone();

        if let Some(category) = changes.category {
            entry.category = category.trim().to_string();
        }
        if let Some(income) = changes.income {
            if entry.kind != EntryKind::Income {
                return Err(MoneyMapError::Validation(format!(
                    "'{}' is an expense line; set its budgeted amount instead",
                    entry.category
                )));
            }
            entry.income = income;
        }
        if let Some(amount) = changes.expense_amount {
            entry.expense_amount = amount;
        }
        if let Some(spent) = changes.amount_spent {
            entry.amount_spent = spent;
        }
        match changes.recurrence {
            Some(Some((amount, frequency))) => {
                entry.recurring = true;
                entry.income_amount = Some(amount);
                entry.frequency = Some(frequency);
            }
            Some(None) => {
                entry.recurring = false;
                entry.income_amount = None;
                entry.frequency = None;
            }
            None => {}
        }

        if entry == before {
            return Ok(entry);
        }

        entry.updated_at = Utc::now();
        entry
            .validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(entry.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::BudgetEntry,
            entry.id.to_string(),
            Some(entry.category.clone()),
            &before,
            &entry,
        )?;
        tracing::info!(id = %entry.id, category = %entry.category, "budget line updated");

        Ok(entry)
    }

    /// Add `amount` to what has been spent against a line
    pub fn record_spending(&self, id: BudgetEntryId, amount: Money) -> MoneyMapResult<BudgetEntry> {
        if !amount.is_positive() {
            return Err(MoneyMapError::Validation(
                "Spending amount must be greater than zero".into(),
            ));
        }

        let entry = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| MoneyMapError::budget_entry_not_found(id.to_string()))?;
        if entry.is_income() {
            return Err(MoneyMapError::Validation(
                "Cannot record spending against the income row".into(),
            ));
        }

        self.update(
            id,
            BudgetUpdate {
                amount_spent: Some(
                    entry
                        .amount_spent
                        .checked_add(amount)
                        .ok_or_else(|| MoneyMapError::amount_overflow("Amount spent"))?,
                ),
                ..Default::default()
            },
        )
    }

    pub fn delete(&self, id: BudgetEntryId) -> MoneyMapResult<BudgetEntry> {
        let entry = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| MoneyMapError::budget_entry_not_found(id.to_string()))?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::BudgetEntry,
            entry.id.to_string(),
            Some(entry.category.clone()),
            &entry,
        )?;
        tracing::info!(id = %entry.id, category = %entry.category, "budget line deleted");

        Ok(entry)
    }

    fn save_new(&self, entry: BudgetEntry) -> MoneyMapResult<BudgetEntry> {
        self.storage.budgets.upsert(entry.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::BudgetEntry,
            entry.id.to_string(),
            Some(entry.category.clone()),
            &entry,
        )?;
        tracing::info!(id = %entry.id, category = %entry.category, kind = %entry.kind, "budget line created");

        Ok(entry)
    }
}
