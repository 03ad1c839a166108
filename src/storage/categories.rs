//! Category repository backed by `categories.json`

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyMapResult;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct CategoryData {
    pub categories: Vec<Category>,
}

pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> MoneyMapResult<()> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }
        Ok(())
    }

    pub fn save(&self) -> MoneyMapResult<()> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> MoneyMapResult<Option<Category>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    pub fn get_all(&self) -> MoneyMapResult<Vec<Category>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    /// Look a category up by name, ignoring case
    pub fn get_by_name(&self, name: &str) -> MoneyMapResult<Option<Category>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().find(|c| c.has_name(name)).cloned())
    }

    pub fn upsert(&self, category: Category) -> MoneyMapResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> MoneyMapResult<Option<Category>> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }
}
