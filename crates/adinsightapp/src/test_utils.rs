use crate::draft::EntryDraft;
use crate::model::{AdGroup, Attribute, Entry};
use crate::state::AppState;
use crate::store::fs::FsStore;
use chrono::{Duration, TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub store: FsStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FsStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}

/// An entry with one group per slice, each group holding the given key/value pairs.
pub fn make_entry(game: &str, groups: &[&[(&str, &str)]]) -> Entry {
    let mut draft = EntryDraft::blank();
    draft.game_name = game.to_string();
    draft.ad_groups = groups
        .iter()
        .enumerate()
        .map(|(i, attrs)| {
            AdGroup::new(format!("g{}", i + 1)).with_attributes(
                attrs
                    .iter()
                    .map(|(k, v)| Attribute::new(*k, *v))
                    .collect(),
            )
        })
        .collect();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Entry::create(&draft, at).expect("valid test entry")
}

/// A state holding entries in display order (first name is newest), one minute apart.
pub fn state_with(names: &[&str]) -> AppState {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let entries: Vec<Entry> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut e = make_entry(name, &[&[("广告类型", "Banner")]]);
            e.timestamp = base - Duration::minutes(i as i64);
            e
        })
        .collect();
    AppState::default().with_entries(entries)
}
