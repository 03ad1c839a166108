//! Configuration for MoneyMap
//!
//! Path resolution for the data directory and the user settings stored in
//! `config.json`.

pub mod paths;
pub mod settings;

pub use paths::MoneyMapPaths;
pub use settings::Settings;
