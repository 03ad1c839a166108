//! MoneyMap - personal finance tracking and analysis
//!
//! Records transactions, per-category budget lines and savings goals as JSON
//! files, and runs an analysis engine over them to produce totals,
//! budget-vs-actual comparisons, monthly recurring figures, goal progress and
//! advice.
//!
//! # Architecture
//!
//! - `config`: paths and user settings
//! - `error`: the crate error type
//! - `models`: money, IDs and the stored records
//! - `storage`: JSON file repositories
//! - `audit`: append-only change log
//! - `services`: validated create/update/delete on top of storage
//! - `engine`: pure calculations over a [`engine::Snapshot`]
//! - `display`: text and table rendering
//! - `export`: JSON, YAML and CSV export
//! - `cli`: command handlers for the `moneymap` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use moneymap::config::MoneyMapPaths;
//! use moneymap::engine::analyze;
//! use moneymap::state::AppState;
//!
//! let state = AppState::load(MoneyMapPaths::new()?)?;
//! let analysis = analyze(&state.storage.snapshot()?, state.today())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{MoneyMapError, MoneyMapResult};
