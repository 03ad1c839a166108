//! Budget entry repository backed by `budgets.json`

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyMapResult;
use crate::models::{BudgetEntry, BudgetEntryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<BudgetEntry>,
}

pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetEntryId, BudgetEntry>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries; rows from files without `kind` are upgraded while
    /// deserializing
    pub fn load(&self) -> MoneyMapResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for entry in file_data.budgets {
            data.insert(entry.id, entry);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded budget entries");
        Ok(())
    }

    pub fn save(&self) -> MoneyMapResult<()> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: BudgetEntryId) -> MoneyMapResult<Option<BudgetEntry>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All entries in creation order
    ///
    /// Creation order is the category order the comparator reports in.
    pub fn get_all(&self) -> MoneyMapResult<Vec<BudgetEntry>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.category.cmp(&b.category)));
        Ok(entries)
    }

    /// Expense entries for a category (case-insensitive)
    pub fn get_by_category(&self, category: &str) -> MoneyMapResult<Vec<BudgetEntry>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| !e.is_income() && e.category.trim().eq_ignore_ascii_case(category.trim()))
            .collect())
    }

    pub fn upsert(&self, entry: BudgetEntry) -> MoneyMapResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(entry.id, entry);
        Ok(())
    }

    pub fn delete(&self, id: BudgetEntryId) -> MoneyMapResult<Option<BudgetEntry>> {
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
    use crate::models::{EntryKind, Money};
    use tempfile::TempDir;

    fn repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_save_and_reload_in_creation_order() {
        let (_temp, repo) = repo();
        for name in ["Rent", "Food", "Utilities"] {
            repo.upsert(BudgetEntry::expense(name, Money::from_units(100)))
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        repo.save().unwrap();
        repo.load().unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.category).collect();
        assert_eq!(names, vec!["Rent", "Food", "Utilities"]);
    }

    #[test]
    fn test_legacy_income_row_normalized_on_load() {
        let (temp, repo) = repo();
        std::fs::write(
            temp.path().join("budgets.json"),
            r#"{"budgets": [{
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "category": "Income",
                "expense_amount": 400000,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            }]}"#,
        )
        .unwrap();

        repo.load().unwrap();
        let entry = repo.get_all().unwrap().remove(0);
        assert_eq!(entry.kind, EntryKind::Income);
        assert_eq!(entry.income, Money::from_units(4000));
        assert!(repo.get_by_category("income").unwrap().is_empty());
    }

    #[test]
    fn test_expense_line_named_income_stays_an_expense() {
        let (temp, repo) = repo();
        let line = BudgetEntry::expense("Income", Money::from_units(500))
            .with_spent(Money::from_units(100));
        let id = line.id;
        repo.upsert(line).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(temp.path().join("budgets.json"));
        reloaded.load().unwrap();
        let entry = reloaded.get(id).unwrap().unwrap();
        assert_eq!(entry.kind, EntryKind::Expense);
        assert_eq!(entry.expense_amount, Money::from_units(500));
        assert_eq!(entry.amount_spent, Money::from_units(100));
        assert_eq!(entry.income, Money::zero());
    }

    #[test]
    fn test_get_by_category_ignores_case() {
        let (_temp, repo) = repo();
        repo.upsert(BudgetEntry::expense("Groceries", Money::from_units(500)))
            .unwrap();
        assert_eq!(repo.get_by_category(" groceries ").unwrap().len(), 1);
    }
}
