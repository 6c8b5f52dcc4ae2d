//! Restoring from a backup, in two steps.
//!
//! [`preview`] parses the payload and reports what would change without touching the
//! state. [`run`] applies a parsed restore. Clients confirm with the user in between,
//! since applying replaces every entry.

use tracing::info;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::snapshot::{deserialize, Restore};
use crate::state::AppState;

/// Parses a backup and describes its effect. Fails on malformed payloads.
pub fn preview(state: &AppState, bytes: &[u8]) -> Result<(Restore, CmdResult)> {
    let restore = deserialize(bytes)?;
    let mut result = CmdResult::default();

    result.add_message(CmdMessage::info(format!(
        "Backup contains {} entries",
        restore.entries.len()
    )));
    if !state.entries.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Restoring replaces all {} current entries",
            state.entries.len()
        )));
    }
    if restore.templates.is_none() {
        result.add_message(CmdMessage::info(
            "No templates in backup: current templates are kept",
        ));
    }
    if restore.settings.is_none() {
        result.add_message(CmdMessage::info(
            "No settings in backup: current settings are kept",
        ));
    }
    Ok((restore, result))
}

pub fn run(state: &AppState, restore: &Restore) -> (AppState, CmdResult) {
    let next = restore.apply(state);
    info!(
        entries = next.entries.len(),
        templates = restore.templates.is_some(),
        settings = restore.settings.is_some(),
        "Restored backup"
    );
    let result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Restored {} entries",
        next.entries.len()
    )));
    (next, result)
}
