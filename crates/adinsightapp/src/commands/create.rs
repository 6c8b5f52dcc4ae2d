use chrono::{DateTime, Utc};
use tracing::info;

use crate::commands::{CmdMessage, CmdResult};
use crate::draft::EntryDraft;
use crate::error::Result;
use crate::index::DisplayEntry;
use crate::model::Entry;
use crate::state::AppState;

/// Creates an entry from a draft and puts it at the top of the collection.
///
/// A blank game name is rejected before anything changes.
pub fn run(state: &AppState, draft: &EntryDraft, now: DateTime<Utc>) -> Result<(AppState, CmdResult)> {
    let entry = Entry::create(draft, now)?;
    info!(id = %entry.id, game = %entry.game_name, groups = entry.ad_groups.len(), "Created entry");

    let mut next = state.clone();
    next.entries.insert(0, entry.clone());

    let result = CmdResult::default()
        .with_message(CmdMessage::success(format!("Entry created: {}", entry.game_name)))
        .with_affected_entries(vec![DisplayEntry {
            entry,
            index: 1,
            selected: false,
        }]);
    Ok((next, result))
}
