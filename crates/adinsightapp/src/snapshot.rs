//! # Snapshots: Backup and Restore
//!
//! A snapshot is the whole portable state in one JSON object:
//!
//! ```json
//! {
//!   "entries": [ ... ],
//!   "customAttributes": { "广告类型": ["开屏广告"] },
//!   "appSettings": { "enableAutoSave": true, "exportFileName": "游戏广告测评" },
//!   "version": "1.0",
//!   "timestamp": 1714564800000
//! }
//! ```
//!
//! [`serialize`] never fails. [`deserialize`] is strict only about `entries`: the
//! payload must be a JSON object whose `entries` field is an array of valid entries,
//! otherwise the result is [`AdinsightError::MalformedSnapshot`]. The other sections are
//! optional. A missing section leaves the current value alone when the restore is
//! applied; a section of the wrong shape is logged and treated as missing.
//!
//! Parsing and applying are separate steps so callers can show what a restore would do
//! and ask for confirmation before calling [`Restore::apply`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::attributes::TemplateMap;
use crate::error::{AdinsightError, Result};
use crate::model::{day_string, Entry};
use crate::settings::{AppSettings, SettingsPatch};
use crate::state::AppState;

pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotPayload<'a> {
    entries: &'a [Entry],
    custom_attributes: &'a TemplateMap,
    app_settings: &'a AppSettings,
    version: &'static str,
    timestamp: i64,
}

/// Pretty-printed JSON of the full state. The selection is not included.
pub fn serialize(state: &AppState, now: DateTime<Utc>) -> Vec<u8> {
    let payload = SnapshotPayload {
        entries: &state.entries,
        custom_attributes: &state.templates,
        app_settings: &state.settings,
        version: SNAPSHOT_VERSION,
        timestamp: now.timestamp_millis(),
    };
    // Only string-keyed maps and plain structs: serialization cannot fail.
    serde_json::to_vec_pretty(&payload).expect("snapshot serialization is infallible")
}

pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("GameAdInsight_Backup_{}.json", day_string(now))
}

/// A parsed, not yet applied, snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Restore {
    pub entries: Vec<Entry>,
    pub templates: Option<TemplateMap>,
    pub settings: Option<SettingsPatch>,
    pub version: Option<String>,
}

impl Restore {
    /// The state after the restore: entries replaced, templates replaced when present,
    /// settings merged when present. Selected ids that no longer exist are dropped.
    pub fn apply(&self, current: &AppState) -> AppState {
        let mut next = current.clone().with_entries(self.entries.clone());
        if let Some(templates) = &self.templates {
            next.templates = templates.clone();
        }
        if let Some(patch) = &self.settings {
            next.settings = next.settings.merge(patch);
        }
        next
    }
}

pub fn deserialize(bytes: &[u8]) -> Result<Restore> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AdinsightError::MalformedSnapshot(format!("not valid JSON: {}", e)))?;

    let Value::Object(mut root) = value else {
        return Err(AdinsightError::MalformedSnapshot(
            "top level is not an object".to_string(),
        ));
    };

    let entries = match root.remove("entries") {
        Some(Value::Array(items)) => serde_json::from_value::<Vec<Entry>>(Value::Array(items))
            .map_err(|e| AdinsightError::MalformedSnapshot(format!("invalid entries: {}", e)))?,
        Some(_) => {
            return Err(AdinsightError::MalformedSnapshot(
                "entries is not a list".to_string(),
            ))
        }
        None => {
            return Err(AdinsightError::MalformedSnapshot(
                "entries is missing".to_string(),
            ))
        }
    };

    let templates = optional_section::<TemplateMap>(&mut root, "customAttributes")
        .map(TemplateMap::sanitized);
    let settings = optional_section::<SettingsPatch>(&mut root, "appSettings");
    let version = root
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Restore {
        entries,
        templates,
        settings,
        version,
    })
}

fn optional_section<T: serde::de::DeserializeOwned>(
    root: &mut serde_json::Map<String, Value>,
    name: &str,
) -> Option<T> {
    match root.remove(name) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(section = name, error = %e, "Ignoring malformed snapshot section");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_entry, state_with};
    use chrono::TimeZone;

    fn sample_state() -> AppState {
        let mut state = state_with(&["A", "B"]);
        state.templates.add_value("广告类型", "开屏广告");
        state.templates.add_key("奖励");
        state.settings.export_file_name = "周报".to_string();
        state
    }

    #[test]
    fn round_trip_reproduces_state() {
        let state = sample_state();
        let bytes = serialize(&state, Utc::now());
        let restore = deserialize(&bytes).unwrap();

        let restored = restore.apply(&AppState::default());
        assert_eq!(restored.entries, state.entries);
        assert_eq!(restored.templates, state.templates);
        assert_eq!(restored.settings, state.settings);
        assert_eq!(restore.version.as_deref(), Some(SNAPSHOT_VERSION));
    }

    #[test]
    fn payload_has_expected_top_level_fields() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let bytes = serialize(&sample_state(), now);
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert!(value["entries"].is_array());
        assert!(value["customAttributes"].is_object());
        assert_eq!(value["appSettings"]["exportFileName"], "周报");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["timestamp"], now.timestamp_millis());
    }

    #[test]
    fn rejects_unparseable_payload() {
        let err = deserialize(b"{not json").unwrap_err();
        assert!(matches!(err, AdinsightError::MalformedSnapshot(_)));
    }

    #[test]
    fn rejects_non_object_payload() {
        let err = deserialize(b"[1, 2]").unwrap_err();
        assert!(matches!(err, AdinsightError::MalformedSnapshot(_)));
    }

    #[test]
    fn rejects_missing_or_non_list_entries() {
        assert!(matches!(
            deserialize(br#"{"customAttributes": {}}"#),
            Err(AdinsightError::MalformedSnapshot(_))
        ));
        assert!(matches!(
            deserialize(br#"{"entries": {"a": 1}}"#),
            Err(AdinsightError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn rejects_entries_that_do_not_parse() {
        let err = deserialize(br#"{"entries": [{"gameName": 5}]}"#).unwrap_err();
        assert!(matches!(err, AdinsightError::MalformedSnapshot(_)));
    }

    #[test]
    fn missing_templates_leave_current_untouched() {
        let mut current = sample_state();
        current.templates.add_value("触发条件", "看完视频");

        let incoming = vec![make_entry("New", &[])];
        let payload = serde_json::json!({ "entries": incoming });
        let restore = deserialize(payload.to_string().as_bytes()).unwrap();

        let next = restore.apply(&current);
        assert_eq!(next.entries.len(), 1);
        assert_eq!(next.entries[0].game_name, "New");
        assert_eq!(next.templates, current.templates);
        assert_eq!(next.settings, current.settings);
    }

    #[test]
    fn settings_are_merged_not_replaced() {
        let current = sample_state();
        let payload = br#"{"entries": [], "appSettings": {"enableAutoSave": false}}"#;
        let next = deserialize(payload).unwrap().apply(&current);

        assert!(!next.settings.enable_auto_save);
        assert_eq!(next.settings.export_file_name, "周报");
    }

    #[test]
    fn malformed_optional_section_is_ignored() {
        let current = sample_state();
        let payload = br#"{"entries": [], "customAttributes": [1, 2, 3]}"#;
        let next = deserialize(payload).unwrap().apply(&current);
        assert_eq!(next.templates, current.templates);
    }

    #[test]
    fn restore_prunes_selection() {
        let mut current = sample_state();
        let kept = current.entries[0].clone();
        current.selection.toggle(&kept.id);
        current.selection.toggle(&current.entries[1].id.clone());

        let payload = serde_json::json!({ "entries": [kept] });
        let next = deserialize(payload.to_string().as_bytes())
            .unwrap()
            .apply(&current);
        assert_eq!(next.selection.len(), 1);
    }

    #[test]
    fn backup_filename_uses_day() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(backup_filename(now), "GameAdInsight_Backup_2024-12-31.json");
    }
}
