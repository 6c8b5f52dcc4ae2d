//! The application state threaded through every command.
//!
//! Commands never mutate a shared global: they take `&AppState` and hand back the next
//! state. The [`api`](crate::api) layer owns the current value and persists it.

use crate::attributes::TemplateMap;
use crate::model::{Entry, Id};
use crate::selection::Selection;
use crate::settings::AppSettings;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Newest first.
    pub entries: Vec<Entry>,
    pub templates: TemplateMap,
    pub settings: AppSettings,
    /// Not persisted.
    pub selection: Selection,
}

impl AppState {
    pub fn entry(&self, id: &Id) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self.selection.retain_existing(&self.entries);
        self
    }
}
