//! Path management for MoneyMap
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYMAP_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/moneymap` on Linux,
//!    `~/Library/Application Support/moneymap` on macOS,
//!    `%APPDATA%\moneymap\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{MoneyMapError, MoneyMapResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MONEYMAP_DATA_DIR";

/// Every path MoneyMap reads or writes
#[derive(Debug, Clone)]
pub struct MoneyMapPaths {
    base_dir: PathBuf,
}

impl MoneyMapPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if no home directory can be determined.
    pub fn new() -> MoneyMapResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "moneymap")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    MoneyMapError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> MoneyMapResult<()> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MoneyMapError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// MoneyMap counts as initialized once `config.json` exists
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
