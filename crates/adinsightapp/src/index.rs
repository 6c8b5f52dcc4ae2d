//! # Entry Identifiers: Id vs Display Index
//!
//! Entries carry opaque ids, which nobody wants to type. Clients address them by a
//! 1-based display index instead, derived from the canonical ordering of the
//! collection: newest first, so `1` is always the most recently created entry.
//!
//! - [`index_entries`]: pairs every entry with its display index
//! - [`DisplayEntry`]: an entry plus its index
//! - [`parse_index_or_range`]: parses user input like `"3"` or `"1-3"`
//!
//! Mapping indexes back to ids happens in [`crate::commands::helpers`].

use crate::model::Entry;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub entry: Entry,
    pub index: usize,
    pub selected: bool,
}

/// Assigns display indexes in collection order (which is newest first).
pub fn index_entries(entries: &[Entry]) -> Vec<DisplayEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| DisplayEntry {
            entry: entry.clone(),
            index: i + 1,
            selected: false,
        })
        .collect()
}

/// A user-supplied reference to one or more entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySelector {
    Index(usize),
    /// Inclusive on both ends.
    Range(usize, usize),
}

impl std::fmt::Display for EntrySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySelector::Index(i) => write!(f, "{}", i),
            EntrySelector::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("Indexes start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid index format: {}", s)),
    }
}

/// Parses `"3"` or `"1-3"`.
pub fn parse_index_or_range(s: &str) -> Result<EntrySelector, String> {
    if let Some((start, end)) = s.split_once('-') {
        let start = parse_index(start)?;
        let end = parse_index(end)?;
        if start > end {
            return Err(format!("Invalid range: {} is after {}", start, end));
        }
        return Ok(EntrySelector::Range(start, end));
    }
    parse_index(s).map(EntrySelector::Index)
}
