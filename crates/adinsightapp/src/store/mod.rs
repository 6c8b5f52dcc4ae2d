//! # Storage Layer
//!
//! Persistence is three independent keyed slots, each holding one JSON document:
//!
//! | Slot | Key | Content |
//! |------|-----|---------|
//! | [`Slot::Entries`] | `gameAdEntries` | array of entries, newest first |
//! | [`Slot::Templates`] | `adCustomOptions` | attribute template map |
//! | [`Slot::Settings`] | `appSettings` | application settings |
//!
//! The [`DataStore`] trait only moves raw strings in and out of slots. Decoding lives
//! here in [`load_state`], which never fails: a slot that is missing, unreadable or
//! malformed is logged and replaced by its default, independently of the others.
//! Stored settings merge over the defaults, so a settings document missing a field
//! keeps that field's default.
//!
//! [`save_state`] writes all three slots. The API calls it after every operation that
//! changes state.
//!
//! ## Implementations
//!
//! - [`fs::FsStore`]: one file per slot in a data directory, atomic writes.
//! - [`memory::MemStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── entries.json
//! ├── templates.json
//! └── settings.json
//! ```

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::attributes::TemplateMap;
use crate::error::Result;
use crate::model::Entry;
use crate::settings::{AppSettings, SettingsPatch};
use crate::state::AppState;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Entries,
    Templates,
    Settings,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Entries, Slot::Templates, Slot::Settings];

    /// Storage key, shared with backups written by the browser version of the tool.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Entries => "gameAdEntries",
            Slot::Templates => "adCustomOptions",
            Slot::Settings => "appSettings",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::Entries => "entries.json",
            Slot::Templates => "templates.json",
            Slot::Settings => "settings.json",
        }
    }
}

pub trait DataStore {
    /// Raw content of a slot, `None` when it was never written.
    fn load_slot(&self, slot: Slot) -> Result<Option<String>>;

    fn save_slot(&self, slot: Slot, content: &str) -> Result<()>;
}

fn decode_slot<T: DeserializeOwned>(store: &impl DataStore, slot: Slot) -> Option<T> {
    let raw = match store.load_slot(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(slot = slot.key(), error = %e, "Could not read slot, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(slot = slot.key(), error = %e, "Malformed slot, using defaults");
            None
        }
    }
}

/// Loads the persisted state. Never fails; bad slots fall back to defaults.
pub fn load_state(store: &impl DataStore) -> AppState {
    let entries: Vec<Entry> = decode_slot(store, Slot::Entries).unwrap_or_default();
    let templates = decode_slot::<TemplateMap>(store, Slot::Templates)
        .map(TemplateMap::sanitized)
        .unwrap_or_default();
    let settings = decode_slot::<SettingsPatch>(store, Slot::Settings)
        .map(|patch| AppSettings::default().merge(&patch))
        .unwrap_or_default();

    AppState {
        entries,
        templates,
        settings,
        ..Default::default()
    }
}

/// Writes every slot. The selection is not persisted.
pub fn save_state(store: &impl DataStore, state: &AppState) -> Result<()> {
    store.save_slot(Slot::Entries, &serde_json::to_string(&state.entries)?)?;
    store.save_slot(Slot::Templates, &serde_json::to_string(&state.templates)?)?;
    store.save_slot(Slot::Settings, &serde_json::to_string(&state.settings)?)?;
    debug!(entries = state.entries.len(), "Saved state");
    Ok(())
}
