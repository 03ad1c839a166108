//! Transaction service
//!
//! CRUD for transactions with validation and audit logging.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{EntryKind, Money, Transaction, TransactionId, TransactionStatus};
use crate::storage::Storage;

use super::resolve_one;

pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub status: Option<TransactionStatus>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.start_date.map_or(true, |start| txn.date >= start)
            && self.end_date.map_or(true, |end| txn.date <= end)
            && self.kind.map_or(true, |kind| txn.kind == kind)
            && self.status.map_or(true, |status| txn.status == status)
    }
}

#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub company_name: String,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: Money,
    pub status: Option<TransactionStatus>,
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub company_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub status: Option<TransactionStatus>,
    pub amount: Option<Money>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateTransactionInput) -> MoneyMapResult<Transaction> {
        let mut txn = Transaction::new(
            input.company_name.trim(),
            input.date,
            input.kind,
            input.amount,
        );
        if let Some(status) = input.status {
            txn.status = status;
        }

        txn.validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.company_name.clone()),
            &txn,
        )?;
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction created");

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> MoneyMapResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID, display ID or ID prefix
    pub fn find(&self, reference: &str) -> MoneyMapResult<Transaction> {
        let matches = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.id.matches_reference(reference))
            .collect();
        resolve_one(matches, reference, MoneyMapError::transaction_not_found)
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> MoneyMapResult<Vec<Transaction>> {
        let matching = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| filter.matches(t));

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    pub fn update(&self, id: TransactionId, changes: TransactionUpdate) -> MoneyMapResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| MoneyMapError::transaction_not_found(id.to_string()))?;
        let before = txn.clone();

        if let Some(name) = changes.company_name {
            txn.company_name = name.trim().to_string();
        }
        if let Some(date) = changes.date {
            txn.date = date;
        }
        if let Some(kind) = changes.kind {
            txn.kind = kind;
        }
        if let Some(status) = changes.status {
            txn.status = status;
        }
        if let Some(amount) = changes.amount {
            txn.amount = amount;
        }

        if txn == before {
            return Ok(txn);
        }

        txn.updated_at = Utc::now();
        txn.validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.company_name.clone()),
            &before,
            &txn,
        )?;
        tracing::info!(id = %txn.id, "transaction updated");

        Ok(txn)
    }

    pub fn set_status(&self, id: TransactionId, status: TransactionStatus) -> MoneyMapResult<Transaction> {
        self.update(
            id,
            TransactionUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    pub fn delete(&self, id: TransactionId) -> MoneyMapResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| MoneyMapError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.company_name.clone()),
            &txn,
        )?;
        tracing::info!(id = %txn.id, "transaction deleted");

        Ok(txn)
    }
}
