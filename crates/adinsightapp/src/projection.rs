//! # Export Projection: Nested Entries to a Flat Table
//!
//! Spreadsheets want rectangles. Entries are trees (entry → groups → attributes) with
//! open-ended attribute keys. This module flattens one into the other.
//!
//! ## Pipeline
//!
//! 1. **Discover** ([`discover_keys`]): collect every distinct trimmed, non-blank
//!    attribute key that actually carries data in the input. Template keys that no
//!    attribute uses never become columns.
//! 2. **Order** ([`order_keys`]): keys in the preferred list come first, by their
//!    position in it; every other key follows in lexicographic (byte-wise) order.
//!    The result depends only on the key set, never on scan order.
//! 3. **Label**: four fixed leading columns, one column per key (renamed through the
//!    label map if it has an entry), then the trailing notes column.
//! 4. **Expand** ([`project`]): one row per ad group.
//!
//! ## Row Expansion
//!
//! ```text
//! Entry "A" (2 groups)          游戏名称 游戏类型 试玩时长 游戏时间 广告位置 … 试玩反馈
//!   group 1  ───────────────►   A        SLG      00:10   0-10分钟  顶部       good
//!   group 2  ───────────────►                             10-30分钟 底部
//! Entry "B" (0 groups)  ─────►  B        RPG      00:05                         ok
//! ```
//!
//! The entry-level cells are left blank on every row after an entry's first, which
//! reads as a merged cell without real merging. The in-game-time and attribute
//! columns belong to the group and are filled on every row.
//!
//! ## Duplicate Keys
//!
//! When a group has several attributes with the same key, the first one fills the
//! column and the rest are ignored.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::model::{AdGroup, Entry};

/// Fixed leading headers: game name, genre, play duration, in-game time.
pub const LEADING_HEADERS: [&str; 4] = ["游戏名称", "游戏类型", "试玩时长", "游戏时间/节点"];
/// Fixed trailing header: tester feedback.
pub const TRAILING_HEADER: &str = "试玩反馈";

pub const DEFAULT_PREFERRED_ORDER: [&str; 11] = [
    "广告位置",
    "出现频率",
    "出现次数",
    "广告一",
    "广告类型一",
    "时长",
    "广告二",
    "广告类型二",
    "时长二",
    "触发关卡",
    "触发事件",
];

pub const DEFAULT_HEADER_LABELS: [(&str, &str); 2] = [("时长", "广告一时长"), ("时长二", "广告二时长")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub preferred_order: Vec<String>,
    pub header_labels: HashMap<String, String>,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            preferred_order: DEFAULT_PREFERRED_ORDER
                .iter()
                .map(|k| k.to_string())
                .collect(),
            header_labels: DEFAULT_HEADER_LABELS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ProjectionOptions {
    /// No preferred keys and no renames: columns sort purely lexicographically.
    pub fn plain() -> Self {
        Self {
            preferred_order: Vec::new(),
            header_labels: HashMap::new(),
        }
    }

    fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.header_labels
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub headers: Vec<String>,
    /// Ordered attribute keys backing the dynamic columns.
    pub dynamic_keys: Vec<String>,
    /// Every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Distinct trimmed, non-blank attribute keys found in the entries.
pub fn discover_keys<'a, I>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .flat_map(|entry| entry.ad_groups.iter())
        .flat_map(|group| group.attributes.iter())
        .map(|attr| attr.key.trim())
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sorts keys: preferred keys by list position, then the rest lexicographically.
pub fn order_keys<S: AsRef<str>>(keys: impl IntoIterator<Item = String>, preferred: &[S]) -> Vec<String> {
    let rank: HashMap<&str, usize> = preferred
        .iter()
        .enumerate()
        .rev()
        .map(|(i, k)| (k.as_ref(), i))
        .collect();

    let mut keys: Vec<String> = keys.into_iter().collect();
    keys.sort_by(|a, b| match (rank.get(a.as_str()), rank.get(b.as_str())) {
        (Some(ra), Some(rb)) => ra.cmp(rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    keys
}

/// Flattens entries into a table, one row per ad group.
pub fn project<'a, I>(entries: I, options: &ProjectionOptions) -> Projection
where
    I: IntoIterator<Item = &'a Entry>,
    I::IntoIter: Clone,
{
    let entries = entries.into_iter();
    let dynamic_keys = order_keys(discover_keys(entries.clone()), &options.preferred_order);

    let headers: Vec<String> = LEADING_HEADERS
        .iter()
        .map(|h| h.to_string())
        .chain(dynamic_keys.iter().map(|k| options.label(k).to_string()))
        .chain(std::iter::once(TRAILING_HEADER.to_string()))
        .collect();

    let mut rows = Vec::new();
    for entry in entries {
        if entry.ad_groups.is_empty() {
            rows.push(build_row(entry, None, true, &dynamic_keys));
            continue;
        }
        for (i, group) in entry.ad_groups.iter().enumerate() {
            rows.push(build_row(entry, Some(group), i == 0, &dynamic_keys));
        }
    }

    Projection {
        headers,
        dynamic_keys,
        rows,
    }
}

fn build_row(
    entry: &Entry,
    group: Option<&AdGroup>,
    first: bool,
    dynamic_keys: &[String],
) -> Vec<String> {
    let shared = |value: &str| {
        if first {
            value.to_string()
        } else {
            String::new()
        }
    };

    let mut row = Vec::with_capacity(LEADING_HEADERS.len() + dynamic_keys.len() + 1);
    row.push(shared(&entry.game_name));
    row.push(shared(&entry.genre));
    row.push(shared(entry.duration.as_deref().unwrap_or("")));
    row.push(
        group
            .and_then(|g| g.game_time.clone())
            .unwrap_or_default(),
    );
    for key in dynamic_keys {
        let cell = group
            .and_then(|g| g.attribute_value(key))
            .unwrap_or("")
            .to_string();
        row.push(cell);
    }
    row.push(shared(&entry.notes));
    row
}
