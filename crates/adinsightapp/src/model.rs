//! # Domain Model: Entries, Ad Groups and Attributes
//!
//! ```text
//! Entry            one recorded play session (root persisted unit)
//! └── AdGroup      one ad-strategy unit observed in that session
//!     └── Attribute   free-form key/value fact about the group
//! ```
//!
//! ## Identity
//!
//! Every level carries an opaque [`Id`]. Ids are generated from random UUIDs, but are
//! stored as plain strings so backups written by other tools (which may use any unique
//! string) restore without loss.
//!
//! ## Immutability
//!
//! Entries are never edited in place after creation. "Editing" an entry means copying it
//! into an [`EntryDraft`](crate::draft::EntryDraft) with
//! [`EntryDraft::from_entry`](crate::draft::EntryDraft::from_entry), then creating a new
//! entry from the draft. Both directions go through the `fresh_copy` functions below, so a
//! stored entry and a form buffer never share group or attribute ids.
//!
//! ## Wire Shape
//!
//! Field names serialize in camelCase (`gameName`, `adGroups`, `gameTime`) and the
//! timestamp is milliseconds since the epoch. This is the shape used in the stored
//! entries slot and in backup files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::EntryDraft;
use crate::error::{AdinsightError, Result};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn fresh_copy(&self) -> Self {
        Self::new(self.key.clone(), self.value.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_time: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl AdGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            game_time: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_game_time(mut self, game_time: impl Into<String>) -> Self {
        self.game_time = Some(game_time.into());
        self
    }

    /// Copies the group and every attribute, assigning fresh ids at each level.
    pub fn fresh_copy(&self) -> Self {
        Self {
            id: Id::new(),
            name: self.name.clone(),
            game_time: self.game_time.clone(),
            attributes: self.attributes.iter().map(Attribute::fresh_copy).collect(),
        }
    }

    /// Value of the first attribute whose trimmed key equals `key`.
    ///
    /// Later attributes with the same key are ignored.
    pub fn attribute_value(&self, key: &str) -> Option<&str> {
        let key = key.trim();
        self.attributes
            .iter()
            .find(|attr| attr.key.trim() == key)
            .map(|attr| attr.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Id,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub date: String,
    pub game_name: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub ad_groups: Vec<AdGroup>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

impl Entry {
    /// Builds a new entry from a form buffer.
    ///
    /// Fails when the game name is blank. The groups are deep-copied with fresh ids, so
    /// the draft can keep being edited without touching the stored entry.
    pub fn create(draft: &EntryDraft, now: DateTime<Utc>) -> Result<Self> {
        if draft.game_name.trim().is_empty() {
            return Err(AdinsightError::Validation(
                "game name must not be empty".to_string(),
            ));
        }

        let duration = Some(draft.duration.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        // Stored timestamps are whole milliseconds; keep memory and disk equal.
        let now = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        Ok(Self {
            id: Id::new(),
            timestamp: now,
            date: day_string(now),
            game_name: draft.game_name.clone(),
            genre: draft.genre.clone(),
            duration,
            ad_groups: draft.ad_groups.iter().map(AdGroup::fresh_copy).collect(),
            notes: draft.notes.clone(),
            ai_analysis: None,
        })
    }

    pub fn attribute_count(&self) -> usize {
        self.ad_groups.iter().map(|g| g.attributes.len()).sum()
    }
}

/// Day-granularity date string (`YYYY-MM-DD`) for a timestamp.
pub fn day_string(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn sample_draft() -> EntryDraft {
        let mut draft = EntryDraft::blank();
        draft.game_name = "Match Town".to_string();
        draft.genre = "三消".to_string();
        draft.duration = "00:12:30".to_string();
        draft.ad_groups = vec![AdGroup::new("g1").with_attributes(vec![
            Attribute::new("广告类型", "Banner"),
            Attribute::new("广告位置", "屏幕底部"),
        ])];
        draft
    }

    #[test]
    fn create_assigns_id_timestamp_and_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 23, 15, 0).unwrap();
        let entry = Entry::create(&sample_draft(), now).unwrap();

        assert_eq!(entry.timestamp, now);
        assert_eq!(entry.date, "2024-03-09");
        assert_eq!(entry.game_name, "Match Town");
        assert_eq!(entry.duration.as_deref(), Some("00:12:30"));
        assert!(!entry.id.as_str().is_empty());
    }

    #[test]
    fn create_rejects_blank_game_name() {
        let mut draft = sample_draft();
        draft.game_name = "   ".to_string();
        let err = Entry::create(&draft, Utc::now()).unwrap_err();
        assert!(matches!(err, AdinsightError::Validation(_)));
    }

    #[test]
    fn create_blank_duration_is_none() {
        let mut draft = sample_draft();
        draft.duration = "  ".to_string();
        let entry = Entry::create(&draft, Utc::now()).unwrap();
        assert_eq!(entry.duration, None);
    }

    #[test]
    fn create_copies_groups_with_fresh_ids() {
        let draft = sample_draft();
        let entry = Entry::create(&draft, Utc::now()).unwrap();

        assert_ne!(entry.ad_groups[0].id, draft.ad_groups[0].id);
        let draft_ids: HashSet<_> = draft.ad_groups[0].attributes.iter().map(|a| &a.id).collect();
        for attr in &entry.ad_groups[0].attributes {
            assert!(!draft_ids.contains(&attr.id));
        }
        assert_eq!(entry.ad_groups[0].attribute_value("广告类型"), Some("Banner"));
    }

    #[test]
    fn attribute_value_uses_first_match_and_trims() {
        let group = AdGroup::new("g").with_attributes(vec![
            Attribute::new(" 时长 ", "15秒"),
            Attribute::new("时长", "30秒"),
        ]);
        assert_eq!(group.attribute_value("时长"), Some("15秒"));
        assert_eq!(group.attribute_value("广告二"), None);
    }

    #[test]
    fn entry_serializes_camel_case_with_millis() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let entry = Entry::create(&sample_draft(), now).unwrap();
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["gameName"], "Match Town");
        assert_eq!(value["timestamp"], now.timestamp_millis());
        assert!(value["adGroups"].is_array());
        assert!(value.get("aiAnalysis").is_none());
    }

    #[test]
    fn entry_accepts_foreign_ids_and_missing_optionals() {
        let json = r#"{
            "id": "1700000000000",
            "timestamp": 1700000000000,
            "date": "2023-11-14",
            "gameName": "Legacy",
            "adGroups": [{"id": "g-1", "name": "默认广告模块",
                          "attributes": [{"id": "a-1", "key": "广告类型", "value": "插屏广告"}]}]
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_str(), "1700000000000");
        assert_eq!(entry.genre, "");
        assert_eq!(entry.notes, "");
        assert_eq!(entry.ad_groups[0].game_time, None);
    }
}
