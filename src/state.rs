//! Application state handed to every command handler

use chrono::{Local, NaiveDate};

use crate::config::{MoneyMapPaths, Settings};
use crate::error::MoneyMapResult;
use crate::storage::Storage;

/// Paths, settings and loaded storage for one run of the program
pub struct AppState {
    pub paths: MoneyMapPaths,
    pub settings: Settings,
    pub storage: Storage,
}

impl AppState {
    /// Read settings and load every repository from `paths`
    pub fn load(paths: MoneyMapPaths) -> MoneyMapResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let mut storage = Storage::new(paths.clone())?;
        storage.load_all()?;

        tracing::debug!(base_dir = %paths.base_dir().display(), "state loaded");
        Ok(Self {
            paths,
            settings,
            storage,
        })
    }

    /// The date reports are computed as of
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}
