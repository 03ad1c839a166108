//! Category service
//!
//! Categories are the names budget lines and goals are filed under. Names are
//! unique ignoring case.

use crate::audit::EntityType;
use crate::error::{MoneyMapError, MoneyMapResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

use super::resolve_one;

/// Colour given to categories created without one
pub const DEFAULT_COLOR: &str = "#808080";

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str, color: Option<&str>) -> MoneyMapResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MoneyMapError::Validation("Category name cannot be empty".into()));
        }

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(MoneyMapError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let color = color.map(str::trim).unwrap_or(DEFAULT_COLOR);
        if !is_hex_color(color) {
            return Err(MoneyMapError::Validation(format!(
                "'{}' is not a colour of the form #RRGGBB",
                color
            )));
        }

        let category = Category::new(name, color.to_uppercase());
        category
            .validate()
            .map_err(|e| MoneyMapError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;
        tracing::info!(name = %category.name, "category created");

        Ok(category)
    }

    pub fn list(&self) -> MoneyMapResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Find a category by name or ID reference
    pub fn find(&self, reference: &str) -> MoneyMapResult<Category> {
        if let Some(category) = self.storage.categories.get_by_name(reference)? {
            return Ok(category);
        }

        let matches = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .filter(|c| c.id.matches_reference(reference))
            .collect();
        resolve_one(matches, reference, MoneyMapError::category_not_found)
    }

    /// Number of budget lines and goals filed under a category name
    pub fn usage_count(&self, name: &str) -> MoneyMapResult<usize> {
        let budgets = self.storage.budgets.get_by_category(name)?.len();
        let goals = self
            .storage
            .goals
            .get_all()?
            .iter()
            .filter(|g| g.category.trim().eq_ignore_ascii_case(name.trim()))
            .count();
        Ok(budgets + goals)
    }

    /// Delete a category
    ///
    /// Categories still referenced by budget lines or goals are kept unless
    /// `force` is set; the referencing records are never touched.
    pub fn delete(&self, id: CategoryId, force: bool) -> MoneyMapResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| MoneyMapError::category_not_found(id.to_string()))?;

        let in_use = self.usage_count(&category.name)?;
        if in_use > 0 && !force {
            return Err(MoneyMapError::Validation(format!(
                "Category '{}' is used by {} budget line(s) or goal(s). Use --force to delete it anyway.",
                category.name, in_use
            )));
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;
        tracing::info!(name = %category.name, "category deleted");

        Ok(category)
    }
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MoneyMapPaths;
    use crate::models::{BudgetEntry, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyMapPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_category() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("Pets", Some("#00aa00")).unwrap();
        assert_eq!(category.color, "#00AA00");
        assert_eq!(service.create("Hobbies", None).unwrap().color, DEFAULT_COLOR);
    }

    #[test]
    fn test_duplicate_and_invalid() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create("Food", None).unwrap();
        assert!(matches!(
            service.create("FOOD", None),
            Err(MoneyMapError::Duplicate { .. })
        ));
        assert!(service.create("  ", None).unwrap_err().is_validation());
        assert!(service.create("Pets", Some("green")).unwrap_err().is_validation());
    }

    #[test]
    fn test_delete_in_use_requires_force() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let category = service.create("Groceries", None).unwrap();
        storage
            .budgets
            .upsert(BudgetEntry::expense("groceries", Money::from_units(500)))
            .unwrap();

        assert!(service.delete(category.id, false).unwrap_err().is_validation());
        service.delete(category.id, true).unwrap();
        assert!(service.find("Groceries").unwrap_err().is_not_found());
        assert_eq!(storage.budgets.count().unwrap(), 1);
    }
}
