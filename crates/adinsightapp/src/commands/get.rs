use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::EntrySelector;
use crate::state::AppState;

use super::helpers::{indexed_entries, resolve_selectors};

/// Every entry, newest first.
pub fn list(state: &AppState) -> CmdResult {
    CmdResult::default().with_listed_entries(indexed_entries(state))
}

/// The entries the selectors point at, in selector order.
pub fn view(state: &AppState, selectors: &[EntrySelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(state, selectors)?;
    let indexed = indexed_entries(state);
    let listed = resolved
        .iter()
        .filter_map(|(index, _)| indexed.get(index - 1).cloned())
        .collect();
    Ok(CmdResult::default().with_listed_entries(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::state_with;

    #[test]
    fn list_returns_all_with_indexes() {
        let state = state_with(&["A", "B"]);
        let result = list(&state);
        assert_eq!(result.listed_entries.len(), 2);
        assert_eq!(result.listed_entries[1].index, 2);
        assert_eq!(result.listed_entries[1].entry.game_name, "B");
    }

    #[test]
    fn view_follows_selector_order() {
        let state = state_with(&["A", "B", "C"]);
        let result = view(&state, &[EntrySelector::Index(3), EntrySelector::Index(1)]).unwrap();
        let names: Vec<_> = result
            .listed_entries
            .iter()
            .map(|d| d.entry.game_name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn view_missing_index_fails() {
        let state = state_with(&["A"]);
        assert!(view(&state, &[EntrySelector::Index(3)]).is_err());
    }
}
