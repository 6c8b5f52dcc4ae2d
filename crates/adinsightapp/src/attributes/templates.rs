//! The attribute template store.
//!
//! Maps an attribute key to the values a user has chosen to keep for reuse. The map
//! lives independently of entries: deleting an entry never removes a template, and a
//! template key with no values left stays in the map until it is removed explicitly.
//!
//! Every operation is an idempotent no-op on invalid input. The boolean each one returns
//! only tells the caller whether anything changed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateMap(BTreeMap<String, Vec<String>>);

impl TemplateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `value` under `key`, creating the key if needed.
    ///
    /// Both sides are trimmed. Blank keys, blank values and values already saved under
    /// the key are ignored.
    pub fn add_value(&mut self, key: &str, value: &str) -> bool {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return false;
        }
        let values = self.0.entry(key.to_string()).or_default();
        if values.iter().any(|v| v == value) {
            return false;
        }
        values.push(value.to_string());
        true
    }

    /// Removes `value` from `key`. The key stays even when its last value goes.
    ///
    /// Both sides are trimmed, matching what [`TemplateMap::add_value`] stores.
    pub fn remove_value(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        match self.0.get_mut(key.trim()) {
            Some(values) => {
                let before = values.len();
                values.retain(|v| v != value);
                values.len() != before
            }
            None => false,
        }
    }

    pub fn add_key(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() || self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), Vec::new());
        true
    }

    pub fn remove_key(&mut self, key: &str) -> bool {
        self.0.remove(key.trim()).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key.trim())
    }

    pub fn values(&self, key: &str) -> &[String] {
        self.0.get(key.trim()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rebuilds the map through the public operations.
    ///
    /// Used on data coming from outside (stored slots, restored backups): blank keys
    /// are dropped, values are trimmed, and repeated values collapse.
    pub fn sanitized(self) -> Self {
        let mut clean = Self::new();
        for (key, values) in self.0 {
            clean.add_key(&key);
            for value in values {
                clean.add_value(&key, &value);
            }
        }
        clean
    }
}

impl FromIterator<(String, Vec<String>)> for TemplateMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
