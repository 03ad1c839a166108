//! Audit log CLI command

use crate::error::MoneyMapResult;
use crate::state::AppState;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(state: &AppState, limit: usize) -> MoneyMapResult<()> {
    let entries = state.storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
