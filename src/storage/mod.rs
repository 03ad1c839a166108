//! Storage layer for MoneyMap
//!
//! One JSON file per record type under `data/`, loaded into memory behind
//! `RwLock`s and written back atomically. The [`Storage`] coordinator also
//! owns the audit logger so every mutation can be recorded next to the data.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::MoneyMapPaths;
use crate::engine::Snapshot;
use crate::error::{MoneyMapError, MoneyMapResult};

/// Map a poisoned lock to a storage error
pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> MoneyMapError {
    MoneyMapError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Access to every repository plus the audit log
pub struct Storage {
    paths: MoneyMapPaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub goals: GoalRepository,
    pub categories: CategoryRepository,
}

impl Storage {
    /// Create the repositories; nothing is read until [`Storage::load_all`]
    pub fn new(paths: MoneyMapPaths) -> MoneyMapResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            goals: GoalRepository::new(paths.goals_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &MoneyMapPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&mut self) -> MoneyMapResult<()> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.goals.load()?;
        self.categories.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> MoneyMapResult<()> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.goals.save()?;
        self.categories.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Immutable copy of every record the analytics engine reads
    pub fn snapshot(&self) -> MoneyMapResult<Snapshot> {
        Ok(Snapshot::new(
            self.transactions.get_all()?,
            self.budgets.get_all()?,
            self.goals.get_all()?,
        ))
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MoneyMapResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> MoneyMapResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MoneyMapResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
