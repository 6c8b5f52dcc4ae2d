//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function returns a
//! `String` so layout can be tested without a terminal; styling comes from
//! [`PALETTE`] and is dropped automatically when stdout is not a tty.
//!
//! Layout calculations (width, truncation, padding) use display width rather than
//! char counts, since game names and attribute values are often CJK.

use super::styles::PALETTE;
use adinsightapp::attributes::TemplateMap;
use adinsightapp::commands::{CmdMessage, MessageLevel};
use adinsightapp::index::DisplayEntry;
use adinsightapp::settings::AppSettings;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const GENRE_WIDTH: usize = 12;
const GROUPS_WIDTH: usize = 10;
const SELECTED_MARKER: &str = "●";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &PALETTE.muted,
            MessageLevel::Success => &PALETTE.success,
            MessageLevel::Warning => &PALETTE.warning,
            MessageLevel::Error => &PALETTE.error,
        };
        println!("{}", style.apply_to(&message.content));
    }
}

pub fn render_entry_list(entries: &[DisplayEntry]) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut out = String::new();
    for de in entries {
        let idx_str = format!("{:>3}. ", de.index);
        let marker = if de.selected {
            format!("{} ", SELECTED_MARKER)
        } else {
            "  ".to_string()
        };

        let fixed = idx_str.width() + 2 + GENRE_WIDTH + GROUPS_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&de.entry.game_name, available);
        let genre = truncate_to_width(&de.entry.genre, GENRE_WIDTH);
        let groups = format!("{} 模块", de.entry.ad_groups.len());

        let _ = writeln!(
            out,
            "{}{}{}{}{}{}",
            PALETTE.index.apply_to(&idx_str),
            PALETTE.selected.apply_to(marker),
            pad_to_width(&name, available),
            PALETTE.muted.apply_to(pad_to_width(&genre, GENRE_WIDTH)),
            pad_to_width(&groups, GROUPS_WIDTH),
            PALETTE.time.apply_to(format_time_ago(de.entry.timestamp, Utc::now())),
        );
    }
    out
}

pub fn render_full_entries(entries: &[DisplayEntry]) -> String {
    let mut out = String::new();
    for (i, de) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        let entry = &de.entry;
        let _ = writeln!(
            out,
            "{} {}",
            PALETTE.index.apply_to(format!("{}.", de.index)),
            PALETTE.title.apply_to(&entry.game_name)
        );
        let _ = writeln!(
            out,
            "{} {}   {} {}   {} {}",
            PALETTE.label.apply_to("日期:"),
            entry.date,
            PALETTE.label.apply_to("类型:"),
            or_dash(&entry.genre),
            PALETTE.label.apply_to("时长:"),
            entry.duration.as_deref().unwrap_or("-"),
        );

        for group in &entry.ad_groups {
            out.push_str("--------------------------------\n");
            match &group.game_time {
                Some(time) => {
                    let _ = writeln!(out, "{} ({})", PALETTE.title.apply_to(&group.name), time);
                }
                None => {
                    let _ = writeln!(out, "{}", PALETTE.title.apply_to(&group.name));
                }
            }
            for attr in group.attributes.iter().filter(|a| !a.value.trim().is_empty()) {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    PALETTE.label.apply_to(format!("{}:", attr.key)),
                    attr.value
                );
            }
        }

        if !entry.notes.trim().is_empty() {
            out.push_str("--------------------------------\n");
            let _ = writeln!(out, "{}\n{}", PALETTE.label.apply_to("试玩反馈:"), entry.notes);
        }
        if let Some(analysis) = &entry.ai_analysis {
            let _ = writeln!(out, "{}\n{}", PALETTE.label.apply_to("AI 分析:"), analysis);
        }
    }
    out
}

pub fn render_templates(templates: &TemplateMap) -> String {
    if templates.is_empty() {
        return "No saved templates.\n".to_string();
    }
    let mut out = String::new();
    for (key, values) in templates.iter() {
        let shown = if values.is_empty() {
            PALETTE.muted.apply_to("(no values)".to_string()).to_string()
        } else {
            values.join(", ")
        };
        let _ = writeln!(out, "{} {}", PALETTE.label.apply_to(format!("{}:", key)), shown);
    }
    out
}

pub fn render_options(key: &str, options: &[String]) -> String {
    if options.is_empty() {
        return format!("No options for {}: values are typed freely.\n", key);
    }
    let mut out = format!("{}\n", PALETTE.title.apply_to(key));
    for (i, option) in options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, option);
    }
    out
}

pub fn render_settings(settings: &AppSettings) -> String {
    format!(
        "auto-save = {}\nfile-name = {}\n",
        if settings.enable_auto_save { "on" } else { "off" },
        settings.export_prefix()
    )
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
