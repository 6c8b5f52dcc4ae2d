//! Application settings carried inside the persisted snapshot.
//!
//! Not to be confused with [`crate::config`], which configures the tool itself (where
//! data lives, which analyzer to call). Settings travel with backups; config does not.

use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "游戏广告测评";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub enable_auto_save: bool,
    pub export_file_name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enable_auto_save: true,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl AppSettings {
    /// Prefix for spreadsheet filenames. Blank names fall back to the default.
    pub fn export_prefix(&self) -> &str {
        let trimmed = self.export_file_name.trim();
        if trimmed.is_empty() {
            DEFAULT_EXPORT_FILE_NAME
        } else {
            trimmed
        }
    }

    /// Returns a copy with the fields present in `patch` overwritten.
    pub fn merge(&self, patch: &SettingsPatch) -> Self {
        Self {
            enable_auto_save: patch.enable_auto_save.unwrap_or(self.enable_auto_save),
            export_file_name: patch
                .export_file_name
                .clone()
                .unwrap_or_else(|| self.export_file_name.clone()),
        }
    }
}

/// A partial settings object, as found in stored slots and backups.
///
/// Fields that are absent leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_auto_save: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_file_name: Option<String>,
}
