//! Selection set for scoped export.
//!
//! Exports cover the selected entries, or every entry when nothing is selected. The
//! set only ever holds ids of existing entries: removing an entry must also
//! [`Selection::remove`] it, and restores prune ids that no longer exist.

use std::collections::BTreeSet;

use crate::model::{Entry, Id};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<Id>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &Id) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a Id>) {
        self.0 = ids.into_iter().cloned().collect();
    }

    /// The select-all checkbox: clears when every entry is already selected,
    /// otherwise selects every entry.
    pub fn toggle_all(&mut self, entries: &[Entry]) {
        let all_selected =
            !entries.is_empty() && entries.iter().all(|entry| self.0.contains(&entry.id));
        if all_selected {
            self.clear();
        } else {
            self.select_all(entries.iter().map(|e| &e.id));
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn remove(&mut self, id: &Id) -> bool {
        self.0.remove(id)
    }

    /// Drops ids that are not in `entries`.
    pub fn retain_existing(&mut self, entries: &[Entry]) {
        let existing: BTreeSet<&Id> = entries.iter().map(|e| &e.id).collect();
        self.0.retain(|id| existing.contains(id));
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.0.iter()
    }
}

/// Which part of the collection an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    All,
    Selected(usize),
}

impl ExportScope {
    /// The scope part of an export filename.
    pub fn descriptor(&self) -> String {
        match self {
            ExportScope::All => "全部".to_string(),
            ExportScope::Selected(n) => format!("选中{}条", n),
        }
    }
}

/// Entries an export covers, in collection order.
pub fn resolve_export_scope<'a>(
    entries: &'a [Entry],
    selection: &Selection,
) -> (ExportScope, Vec<&'a Entry>) {
    if selection.is_empty() {
        return (ExportScope::All, entries.iter().collect());
    }
    let chosen: Vec<&Entry> = entries
        .iter()
        .filter(|entry| selection.contains(&entry.id))
        .collect();
    (ExportScope::Selected(chosen.len()), chosen)
}
