//! Audit logging for MoneyMap
//!
//! Every create, update and delete performed through the service layer is
//! appended to `audit.log` as one JSON object per line, with the record's
//! state before and after the change.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
