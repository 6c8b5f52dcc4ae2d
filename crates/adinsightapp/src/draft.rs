//! The editable form buffer an entry is created from.
//!
//! A draft holds the same fields as an [`Entry`] minus the identity and timestamps,
//! which are assigned only by [`Entry::create`]. Group and attribute operations address
//! items by position (0-based) and are no-ops when the position is out of range.
//!
//! Drafts serialize in the same camelCase shape as entries, so a draft written by
//! `copy` can be edited by hand and fed back into `create`.

use serde::{Deserialize, Serialize};

use crate::attributes::presets::{
    numbered_group_name, COPY_SUFFIX, DEFAULT_ATTRIBUTE_KEYS, DEFAULT_GROUP_NAME,
};
use crate::model::{AdGroup, Attribute, Entry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDraft {
    pub game_name: String,
    pub genre: String,
    pub duration: String,
    pub notes: String,
    pub ad_groups: Vec<AdGroup>,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new()
    }
}

fn default_attributes() -> Vec<Attribute> {
    DEFAULT_ATTRIBUTE_KEYS
        .iter()
        .map(|key| Attribute::new(*key, ""))
        .collect()
}

impl EntryDraft {
    /// A fresh form: one default group seeded with the well-known keys.
    pub fn new() -> Self {
        Self {
            ad_groups: vec![AdGroup::new(DEFAULT_GROUP_NAME).with_attributes(default_attributes())],
            ..Self::blank()
        }
    }

    /// A form with no groups at all.
    pub fn blank() -> Self {
        Self {
            game_name: String::new(),
            genre: String::new(),
            duration: String::new(),
            notes: String::new(),
            ad_groups: Vec::new(),
        }
    }

    /// Copies an existing entry into an editable draft.
    ///
    /// Every group and attribute gets a new id. The entry id is not carried: a new one
    /// is assigned when the draft is submitted.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            game_name: entry.game_name.clone(),
            genre: entry.genre.clone(),
            duration: entry.duration.clone().unwrap_or_default(),
            notes: entry.notes.clone(),
            ad_groups: entry.ad_groups.iter().map(AdGroup::fresh_copy).collect(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Appends a group named after its position, seeded with the default keys.
    pub fn add_group(&mut self) -> &AdGroup {
        let name = numbered_group_name(self.ad_groups.len() + 1);
        self.ad_groups
            .push(AdGroup::new(name).with_attributes(default_attributes()));
        &self.ad_groups[self.ad_groups.len() - 1]
    }

    /// Inserts a copy of the group right after it.
    pub fn duplicate_group(&mut self, index: usize) -> bool {
        let Some(source) = self.ad_groups.get(index) else {
            return false;
        };
        let mut copy = source.fresh_copy();
        copy.name = format!("{}{}", source.name, COPY_SUFFIX);
        self.ad_groups.insert(index + 1, copy);
        true
    }

    pub fn remove_group(&mut self, index: usize) -> bool {
        if index >= self.ad_groups.len() {
            return false;
        }
        self.ad_groups.remove(index);
        true
    }

    pub fn move_group(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.ad_groups, from, to)
    }

    pub fn rename_group(&mut self, index: usize, name: &str) -> bool {
        match self.ad_groups.get_mut(index) {
            Some(group) => {
                group.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_game_time(&mut self, index: usize, game_time: Option<String>) -> bool {
        match self.ad_groups.get_mut(index) {
            Some(group) => {
                group.game_time = game_time.filter(|t| !t.trim().is_empty());
                true
            }
            None => false,
        }
    }

    /// Appends an empty attribute row to a group.
    pub fn add_attribute(&mut self, group: usize) -> bool {
        match self.ad_groups.get_mut(group) {
            Some(g) => {
                g.attributes.push(Attribute::new("", ""));
                true
            }
            None => false,
        }
    }

    pub fn remove_attribute(&mut self, group: usize, attr: usize) -> bool {
        match self.ad_groups.get_mut(group) {
            Some(g) if attr < g.attributes.len() => {
                g.attributes.remove(attr);
                true
            }
            _ => false,
        }
    }

    pub fn set_attribute_key(&mut self, group: usize, attr: usize, key: &str) -> bool {
        match self.attribute_mut(group, attr) {
            Some(a) => {
                a.key = key.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_attribute_value(&mut self, group: usize, attr: usize, value: &str) -> bool {
        match self.attribute_mut(group, attr) {
            Some(a) => {
                a.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Reorders attributes inside one group. Attributes never move across groups.
    pub fn move_attribute(&mut self, group: usize, from: usize, to: usize) -> bool {
        match self.ad_groups.get_mut(group) {
            Some(g) => move_item(&mut g.attributes, from, to),
            None => false,
        }
    }

    /// Sets `key` to `value` on a group, updating the first attribute with that key
    /// or appending one.
    pub fn upsert_attribute(&mut self, group: usize, key: &str, value: &str) -> bool {
        let Some(g) = self.ad_groups.get_mut(group) else {
            return false;
        };
        let trimmed = key.trim();
        match g.attributes.iter_mut().find(|a| a.key.trim() == trimmed) {
            Some(existing) => existing.value = value.to_string(),
            None => g.attributes.push(Attribute::new(trimmed, value)),
        }
        true
    }

    fn attribute_mut(&mut self, group: usize, attr: usize) -> Option<&mut Attribute> {
        self.ad_groups.get_mut(group)?.attributes.get_mut(attr)
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    fn keys(group: &AdGroup) -> Vec<&str> {
        group.attributes.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn new_draft_has_default_group() {
        let draft = EntryDraft::new();
        assert_eq!(draft.ad_groups.len(), 1);
        assert_eq!(draft.ad_groups[0].name, DEFAULT_GROUP_NAME);
        assert_eq!(keys(&draft.ad_groups[0]), DEFAULT_ATTRIBUTE_KEYS.to_vec());
        assert!(draft.ad_groups[0].attributes.iter().all(|a| a.value.is_empty()));
    }

    #[test]
    fn add_group_numbers_by_position() {
        let mut draft = EntryDraft::new();
        let name = draft.add_group().name.clone();
        assert_eq!(name, "广告模块 2");
        assert_eq!(draft.ad_groups[1].attributes.len(), DEFAULT_ATTRIBUTE_KEYS.len());
    }

    #[test]
    fn duplicate_group_inserts_after_source() {
        let mut draft = EntryDraft::new();
        draft.add_group();
        draft.set_attribute_value(0, 0, "Banner");

        assert!(draft.duplicate_group(0));
        assert_eq!(draft.ad_groups.len(), 3);
        assert_eq!(draft.ad_groups[1].name, "默认广告模块 (复制)");
        assert_eq!(draft.ad_groups[1].attributes[0].value, "Banner");
        assert_ne!(draft.ad_groups[1].id, draft.ad_groups[0].id);
        assert_eq!(draft.ad_groups[2].name, "广告模块 2");

        assert!(!draft.duplicate_group(9));
    }

    #[test]
    fn remove_and_move_groups() {
        let mut draft = EntryDraft::new();
        draft.add_group();
        draft.add_group();

        assert!(draft.move_group(2, 0));
        assert_eq!(draft.ad_groups[0].name, "广告模块 3");
        assert!(!draft.move_group(0, 3));

        assert!(draft.remove_group(0));
        assert_eq!(draft.ad_groups.len(), 2);
        assert!(!draft.remove_group(5));
    }

    #[test]
    fn attribute_editing() {
        let mut draft = EntryDraft::blank();
        draft.ad_groups.push(AdGroup::new("g"));

        assert!(draft.add_attribute(0));
        assert!(draft.set_attribute_key(0, 0, "奖励"));
        assert!(draft.set_attribute_value(0, 0, "金币"));
        assert!(draft.add_attribute(0));
        assert!(draft.set_attribute_key(0, 1, "时长"));

        assert!(draft.move_attribute(0, 1, 0));
        assert_eq!(keys(&draft.ad_groups[0]), vec!["时长", "奖励"]);

        assert!(draft.remove_attribute(0, 0));
        assert_eq!(keys(&draft.ad_groups[0]), vec!["奖励"]);
        assert!(!draft.remove_attribute(0, 4));
        assert!(!draft.add_attribute(3));
    }

    #[test]
    fn upsert_updates_first_match_or_appends() {
        let mut draft = EntryDraft::new();
        assert!(draft.upsert_attribute(0, "广告类型", "激励视频"));
        assert!(draft.upsert_attribute(0, "奖励内容", "钻石"));

        let group = &draft.ad_groups[0];
        assert_eq!(group.attribute_value("广告类型"), Some("激励视频"));
        assert_eq!(group.attributes.last().map(|a| a.key.as_str()), Some("奖励内容"));
    }

    #[test]
    fn set_game_time_blank_clears() {
        let mut draft = EntryDraft::new();
        draft.set_game_time(0, Some("10-30分钟".to_string()));
        assert_eq!(draft.ad_groups[0].game_time.as_deref(), Some("10-30分钟"));
        draft.set_game_time(0, Some(" ".to_string()));
        assert_eq!(draft.ad_groups[0].game_time, None);
    }

    #[test]
    fn from_entry_has_disjoint_ids() {
        let mut draft = EntryDraft::new();
        draft.game_name = "Tower".to_string();
        draft.add_group();
        let entry = Entry::create(&draft, Utc::now()).unwrap();

        let copy = EntryDraft::from_entry(&entry);
        assert_eq!(copy.game_name, "Tower");

        let original: HashSet<_> = entry
            .ad_groups
            .iter()
            .flat_map(|g| std::iter::once(&g.id).chain(g.attributes.iter().map(|a| &a.id)))
            .collect();
        for g in &copy.ad_groups {
            assert!(!original.contains(&g.id));
            for a in &g.attributes {
                assert!(!original.contains(&a.id));
            }
        }
    }

    #[test]
    fn reset_restores_default_form() {
        let mut draft = EntryDraft::new();
        draft.game_name = "x".to_string();
        draft.add_group();
        draft.reset();
        assert_eq!(draft.game_name, "");
        assert_eq!(draft.ad_groups.len(), 1);
    }

    #[test]
    fn draft_json_fills_missing_fields() {
        let draft: EntryDraft = serde_json::from_str(r#"{"gameName": "Hand Edited"}"#).unwrap();
        assert_eq!(draft.game_name, "Hand Edited");
        assert_eq!(draft.ad_groups.len(), 1);
    }
}
