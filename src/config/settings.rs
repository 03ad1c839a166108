//! User settings stored in `config.json`

use serde::{Deserialize, Serialize};

use super::paths::MoneyMapPaths;
use crate::engine::ENCOURAGEMENT_THRESHOLD;
use crate::error::{MoneyMapError, MoneyMapResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format used when printing dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Goals below this percentage are flagged "at risk" in reports
    #[serde(default = "default_at_risk_threshold")]
    pub at_risk_threshold: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_at_risk_threshold() -> f64 {
    ENCOURAGEMENT_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            at_risk_threshold: default_at_risk_threshold(),
        }
    }
}

impl Settings {
    /// Load `config.json`, or return defaults without writing anything
    pub fn load_or_create(paths: &MoneyMapPaths) -> MoneyMapResult<Self> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| MoneyMapError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| MoneyMapError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, paths: &MoneyMapPaths) -> MoneyMapResult<()> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| MoneyMapError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MoneyMapError::Io(format!("Failed to write settings file: {}", e)))
    }

    pub fn validate(&self) -> MoneyMapResult<()> {
        if !(0.0..=100.0).contains(&self.at_risk_threshold) {
            return Err(MoneyMapError::Config(format!(
                "at_risk_threshold must be between 0 and 100, got {}",
                self.at_risk_threshold
            )));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(MoneyMapError::Config("currency_symbol cannot be empty".into()));
        }
        Ok(())
    }

    /// Update one setting by key, as used by `moneymap config <key> <value>`
    ///
    /// Leaves `self` untouched when the new value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> MoneyMapResult<()> {
        let mut updated = self.clone();
        match key {
            "currency_symbol" => updated.currency_symbol = value.to_string(),
            "date_format" => updated.date_format = value.to_string(),
            "at_risk_threshold" => {
                updated.at_risk_threshold = value.trim().parse().map_err(|_| {
                    MoneyMapError::Config(format!("'{}' is not a number", value))
                })?;
            }
            other => {
                return Err(MoneyMapError::Config(format!(
                    "Unknown setting '{}'. Known settings: currency_symbol, date_format, at_risk_threshold",
                    other
                )))
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
