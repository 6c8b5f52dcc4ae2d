use crate::commands::{CmdMessage, CmdResult};
use crate::draft::EntryDraft;
use crate::error::{AdinsightError, Result};
use crate::index::EntrySelector;
use crate::state::AppState;

use super::helpers::{find_entry, resolve_selectors};

/// Copies one entry into an editable draft with fresh group and attribute ids.
///
/// Nothing is stored: the draft becomes an entry only when it is submitted to `create`.
pub fn run(state: &AppState, selector: EntrySelector) -> Result<CmdResult> {
    let resolved = resolve_selectors(state, &[selector])?;
    let (index, id) = match resolved.as_slice() {
        [single] => single.clone(),
        _ => {
            return Err(AdinsightError::Api(
                "Copy takes exactly one entry".to_string(),
            ))
        }
    };

    let entry = find_entry(state, &id)?;
    let mut result = CmdResult {
        draft: Some(EntryDraft::from_entry(entry)),
        ..Default::default()
    };
    result.add_message(CmdMessage::info(format!(
        "Copied entry {} ({}) into a new draft",
        index, entry.game_name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::state_with;

    #[test]
    fn copy_produces_draft_with_new_ids() {
        let state = state_with(&["A", "B"]);
        let result = run(&state, EntrySelector::Index(2)).unwrap();
        let draft = result.draft.unwrap();

        assert_eq!(draft.game_name, "B");
        assert_ne!(draft.ad_groups[0].id, state.entries[1].ad_groups[0].id);
    }

    #[test]
    fn copy_rejects_ranges() {
        let state = state_with(&["A", "B"]);
        assert!(run(&state, EntrySelector::Range(1, 2)).is_err());
    }
}
