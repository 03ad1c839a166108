//! First-run setup

use crate::config::paths::MoneyMapPaths;
use crate::error::MoneyMapResult;
use crate::models::default_categories;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Create the data directory and seed the default categories
///
/// Existing category files are left alone, so running it twice is harmless.
pub fn initialize_storage(paths: &MoneyMapPaths) -> MoneyMapResult<()> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        let data = CategoryData {
            categories: default_categories(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
        tracing::info!(count = data.categories.len(), "created default categories");
    }

    Ok(())
}
