use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::state::AppState;

use super::helpers::{indexed_entries, resolve_selectors};

/// Toggles each referenced entry in the selection.
pub fn toggle(state: &AppState, selectors: &[EntrySelector]) -> Result<(AppState, CmdResult)> {
    let resolved = resolve_selectors(state, selectors)?;
    let mut next = state.clone();
    for (_, id) in &resolved {
        next.selection.toggle(id);
    }
    let result = summary(&next);
    Ok((next, result))
}

/// Replaces the selection with exactly the referenced entries.
///
/// Every selector is resolved first; on error the selection is left as it was.
pub fn replace(state: &AppState, selectors: &[EntrySelector]) -> Result<(AppState, CmdResult)> {
    let resolved = resolve_selectors(state, selectors)?;
    let mut next = state.clone();
    next.selection.clear();
    for (_, id) in &resolved {
        next.selection.toggle(id);
    }
    let result = summary(&next);
    Ok((next, result))
}

/// The select-all checkbox: selects everything, or clears when all are selected.
pub fn toggle_all(state: &AppState) -> (AppState, CmdResult) {
    let mut next = state.clone();
    next.selection.toggle_all(&state.entries);
    let result = summary(&next);
    (next, result)
}

pub fn select_all(state: &AppState) -> (AppState, CmdResult) {
    let mut next = state.clone();
    next.selection.select_all(state.entries.iter().map(|e| &e.id));
    let result = summary(&next);
    (next, result)
}

pub fn clear(state: &AppState) -> (AppState, CmdResult) {
    let mut next = state.clone();
    next.selection.clear();
    let result = summary(&next);
    (next, result)
}

fn summary(state: &AppState) -> CmdResult {
    let message = if state.selection.is_empty() {
        CmdMessage::info("Nothing selected: exports will include every entry")
    } else {
        CmdMessage::info(format!(
            "{} of {} entries selected",
            state.selection.len(),
            state.entries.len()
        ))
    };
    CmdResult::default()
        .with_listed_entries(indexed_entries(state))
        .with_message(message)
}
