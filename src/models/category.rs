//! Spending category model
//!
//! Categories are identified by name within a budget; the colour is a display
//! hint for charts and is never used in calculations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    "#808080".to_string()
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The starter categories created by `moneymap init`
pub fn default_categories() -> Vec<Category> {
    [
        ("Rent", "#FF6347"),
        ("Food", "#1E90FF"),
        ("Groceries", "#FFD700"),
        ("Utilities", "#8A2BE2"),
        ("Entertainment", "#FF4500"),
        ("Others", "#FF1493"),
    ]
    .into_iter()
    .map(|(name, color)| Category::new(name, color))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_name_ignores_case() {
        let category = Category::new("Groceries", "#FFD700");
        assert!(category.has_name("groceries"));
        assert!(category.has_name(" GROCERIES "));
        assert!(!category.has_name("Food"));
    }

    #[test]
    fn test_validation() {
        assert!(Category::new("Rent", "#FF6347").validate().is_ok());
        assert_eq!(
            Category::new("", "#000").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            Category::new("x".repeat(51), "#000").validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_default_categories_are_unique() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 6);
        for (i, a) in defaults.iter().enumerate() {
            for b in defaults.iter().skip(i + 1) {
                assert!(!a.has_name(&b.name));
            }
        }
    }
}
