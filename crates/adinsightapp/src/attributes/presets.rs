//! Built-in attribute keys and suggested values.
//!
//! A handful of keys are so common in ad-strategy notes that every new ad group starts
//! with them, and the form offers a fixed list of suggested values for each. Users can
//! extend the suggestions per key through the [`TemplateMap`](super::TemplateMap).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::TemplateMap;

pub const KEY_AD_TYPE: &str = "广告类型";
pub const KEY_POSITION: &str = "广告位置";
pub const KEY_FREQUENCY: &str = "出现频率";
pub const KEY_COUNT: &str = "出现次数";
pub const KEY_CONTENT: &str = "广告内容";
pub const KEY_AD_ONE: &str = "广告一";
pub const KEY_DURATION: &str = "时长";
pub const KEY_AD_TWO: &str = "广告二";
pub const KEY_DURATION_TWO: &str = "时长二";
pub const KEY_TRIGGER: &str = "触发条件";

/// Keys every new ad group is seeded with, in display order.
pub const DEFAULT_ATTRIBUTE_KEYS: [&str; 9] = [
    KEY_AD_TYPE,
    KEY_POSITION,
    KEY_FREQUENCY,
    KEY_COUNT,
    KEY_AD_ONE,
    KEY_DURATION,
    KEY_AD_TWO,
    KEY_DURATION_TWO,
    KEY_TRIGGER,
];

pub const DEFAULT_GROUP_NAME: &str = "默认广告模块";
pub const COPY_SUFFIX: &str = " (复制)";

/// Name given to the n-th group (1-based) added to a draft.
pub fn numbered_group_name(n: usize) -> String {
    format!("广告模块 {}", n)
}

pub const GAME_TIME_OPTIONS: [&str; 4] = ["0-10分钟，新手引导", "10-30分钟", "30-60分钟", "60分钟后"];

const AD_TYPE_OPTIONS: &[&str] = &["插屏广告", "激励视频", "视频+插屏广告", "可互动广告", "Banner"];
const POSITION_OPTIONS: &[&str] = &[
    "屏幕顶部",
    "屏幕底部",
    "屏幕左侧",
    "屏幕右侧",
    "屏幕中心",
    "全屏幕",
];
const FREQUENCY_OPTIONS: &[&str] = &["极高", "高", "中", "低"];
const COUNT_OPTIONS: &[&str] = &[
    "1次",
    "2次",
    "3次",
    "5次",
    "10次",
    "无限/循环",
    "每关1次",
    "每日限制",
];
const DURATION_OPTIONS: &[&str] = &["5秒", "15秒", "30秒", "45秒", "60秒", "大于60秒"];
const TRIGGER_OPTIONS: &[&str] = &[
    "主动点击",
    "被动弹出",
    "通关失败",
    "通关成功",
    "资源不足",
    "时间间隔",
];

static PRESETS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (KEY_AD_TYPE, AD_TYPE_OPTIONS),
        (KEY_POSITION, POSITION_OPTIONS),
        (KEY_FREQUENCY, FREQUENCY_OPTIONS),
        (KEY_COUNT, COUNT_OPTIONS),
        (KEY_CONTENT, &[] as &[&str]),
        (KEY_AD_ONE, &[] as &[&str]),
        (KEY_AD_TWO, &[] as &[&str]),
        (KEY_DURATION, DURATION_OPTIONS),
        (KEY_DURATION_TWO, DURATION_OPTIONS),
        (KEY_TRIGGER, TRIGGER_OPTIONS),
    ])
});

/// Built-in suggestions for a key, empty for unknown keys.
pub fn preset_options(key: &str) -> &'static [&'static str] {
    PRESETS.get(key.trim()).copied().unwrap_or(&[])
}

/// Built-in suggestions followed by the user's saved values, without repeats.
pub fn suggestions(key: &str, templates: &TemplateMap) -> Vec<String> {
    let mut out: Vec<String> = preset_options(key).iter().map(|s| s.to_string()).collect();
    for value in templates.values(key) {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Whether a value for `key` is picked from a list rather than typed.
///
/// The count key is excluded: it is edited with a stepper (see [`adjust_count`]).
pub fn uses_dropdown(key: &str, templates: &TemplateMap) -> bool {
    let key = key.trim();
    if key.is_empty() || key == KEY_COUNT {
        return false;
    }
    PRESETS.contains_key(key) || templates.contains_key(key)
}

/// Steps the number inside a count value ("3次" + 1 → "4次"), clamped at zero.
///
/// The first run of ASCII digits is taken as the current number; values without one
/// count as zero. The result always carries the "次" unit.
pub fn adjust_count(current: &str, delta: i64) -> String {
    let digits: String = current
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let base: i64 = digits.parse().unwrap_or(0);
    let next = base.saturating_add(delta).max(0);
    format!("{}次", next)
}
