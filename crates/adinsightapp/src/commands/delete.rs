use tracing::info;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayEntry, EntrySelector};
use crate::state::AppState;

use super::helpers::resolve_selectors;

/// Removes entries, pruning them from the selection too.
pub fn run(state: &AppState, selectors: &[EntrySelector]) -> Result<(AppState, CmdResult)> {
    let resolved = resolve_selectors(state, selectors)?;
    let mut next = state.clone();
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let Some(pos) = next.entries.iter().position(|e| e.id == id) else {
            continue;
        };
        let entry = next.entries.remove(pos);
        next.selection.remove(&id);
        info!(id = %id, game = %entry.game_name, "Deleted entry");

        result.add_message(CmdMessage::success(format!(
            "Entry deleted ({}): {}",
            display_index, entry.game_name
        )));
        result.affected_entries.push(DisplayEntry {
            entry,
            index: display_index,
            selected: false,
        });
    }

    Ok((next, result))
}

/// Removes every entry and empties the selection. Templates and settings stay.
pub fn clear_all(state: &AppState) -> (AppState, CmdResult) {
    let count = state.entries.len();
    let mut next = state.clone();
    next.entries.clear();
    next.selection.clear();
    info!(count, "Cleared all entries");

    let message = if count == 0 {
        CmdMessage::info("No entries to clear")
    } else {
        CmdMessage::success(format!("Cleared {} entries", count))
    };
    (next, CmdResult::default().with_message(message))
}
