use chrono::{DateTime, Utc};
use tracing::info;

use crate::commands::{CmdMessage, CmdResult, Payload};
use crate::snapshot::{backup_filename, serialize};
use crate::state::AppState;

/// Packages the full state as a backup file.
pub fn run(state: &AppState, now: DateTime<Utc>) -> CmdResult {
    let bytes = serialize(state, now);
    let filename = backup_filename(now);
    info!(file = %filename, entries = state.entries.len(), "Created backup");

    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Backed up {} entries and {} template keys",
            state.entries.len(),
            state.templates.len()
        )))
        .with_payload(Payload { filename, bytes })
}
