//! Transaction repository backed by `transactions.json`

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::MoneyMapResult;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the in-memory set with the file contents
    pub fn load(&self) -> MoneyMapResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded transactions");
        Ok(())
    }

    pub fn save(&self) -> MoneyMapResult<()> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> MoneyMapResult<Option<Transaction>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> MoneyMapResult<Vec<Transaction>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Transactions dated within `start..=end`, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MoneyMapResult<Vec<Transaction>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    pub fn upsert(&self, txn: Transaction) -> MoneyMapResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> MoneyMapResult<Option<Transaction>> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> MoneyMapResult<usize> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_reload() {
        let (_temp, repo) = repo();
        let txn = Transaction::income("Employer", date(3, 1), Money::from_units(2500));
        let id = txn.id;

        repo.upsert(txn).unwrap();
        repo.save().unwrap();
        repo.load().unwrap();

        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.company_name, "Employer");
        assert!(loaded.is_income());
    }

    #[test]
    fn test_newest_first_and_date_range() {
        let (_temp, repo) = repo();
        for (m, d) in [(1, 5), (3, 10), (2, 20)] {
            repo.upsert(Transaction::expense("Shop", date(m, d), Money::from_units(10)))
                .unwrap();
        }

        let dates: Vec<_> = repo.get_all().unwrap().iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(3, 10), date(2, 20), date(1, 5)]);

        let february = repo.get_by_date_range(date(2, 1), date(2, 28)).unwrap();
        assert_eq!(february.len(), 1);
    }

    #[test]
    fn test_delete_returns_removed() {
        let (_temp, repo) = repo();
        let txn = Transaction::expense("Shop", date(1, 1), Money::from_units(10));
        let id = txn.id;
        repo.upsert(txn).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
