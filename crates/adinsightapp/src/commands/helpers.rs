use crate::error::{AdinsightError, Result};
use crate::index::{index_entries, DisplayEntry, EntrySelector};
use crate::model::{Entry, Id};
use crate::state::AppState;

/// Entries with their display indexes and selection flags.
pub fn indexed_entries(state: &AppState) -> Vec<DisplayEntry> {
    index_entries(&state.entries)
        .into_iter()
        .map(|mut de| {
            de.selected = state.selection.contains(&de.entry.id);
            de
        })
        .collect()
}

/// Maps selectors to `(display index, id)` pairs, in selector order.
///
/// Fails on the first index that does not exist. Repeated references resolve once.
pub fn resolve_selectors(
    state: &AppState,
    selectors: &[EntrySelector],
) -> Result<Vec<(usize, Id)>> {
    let total = state.entries.len();
    let mut results: Vec<(usize, Id)> = Vec::new();

    let mut push = |index: usize| -> Result<()> {
        let entry = index
            .checked_sub(1)
            .and_then(|i| state.entries.get(i))
            .ok_or_else(|| {
                AdinsightError::Api(format!("Index {} not found ({} entries)", index, total))
            })?;
        if !results.iter().any(|(_, id)| id == &entry.id) {
            results.push((index, entry.id.clone()));
        }
        Ok(())
    };

    for selector in selectors {
        match *selector {
            EntrySelector::Index(i) => push(i)?,
            EntrySelector::Range(start, end) => {
                if end > total {
                    return Err(AdinsightError::Api(format!(
                        "Range end {} not found ({} entries)",
                        end, total
                    )));
                }
                for i in start..=end {
                    push(i)?;
                }
            }
        }
    }

    Ok(results)
}

pub fn find_entry<'a>(state: &'a AppState, id: &Id) -> Result<&'a Entry> {
    state
        .entry(id)
        .ok_or_else(|| AdinsightError::EntryNotFound(id.clone()))
}
