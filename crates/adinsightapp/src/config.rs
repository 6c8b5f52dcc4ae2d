//! # Configuration
//!
//! Tool configuration is loaded with [`confique`] in priority order:
//!
//! 1. **Environment variables**: `ADINSIGHT_DATA_DIR`, `ADINSIGHT_ANALYZER_ENDPOINT`,
//!    `ADINSIGHT_ANALYZER_MODEL`, `ADINSIGHT_ANALYZER_API_KEY`.
//! 2. **Config file**: `adinsight.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where the entry/template/settings slots live |
//! | `preferred_order` | built-in list | Attribute keys that lead the export columns |
//! | `header_labels` | 时长 → 广告一时长, 时长二 → 广告二时长 | Export header renames |
//! | `analyzer_endpoint` | `https://api.openai.com/v1` | OpenAI-compatible base URL |
//! | `analyzer_model` | `gpt-4o-mini` | Model name sent with each request |
//! | `analyzer_api_key` | unset | Without it, analysis is disabled |
//!
//! Application settings (auto-save, export file name) are a different thing: they live
//! in the data slots and travel with backups. See [`crate::settings`].

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::analyzer::AnalyzerConfig;
use crate::error::{AdinsightError, Result};
use crate::projection::ProjectionOptions;

pub const CONFIG_FILE_NAME: &str = "adinsight.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdinsightConfig {
    /// Directory holding the persisted slots.
    #[config(env = "ADINSIGHT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Attribute keys that sort first in exports, in this order.
    pub preferred_order: Option<Vec<String>>,

    /// Export header renames, attribute key to label.
    pub header_labels: Option<HashMap<String, String>>,

    #[config(env = "ADINSIGHT_ANALYZER_ENDPOINT", default = "https://api.openai.com/v1")]
    pub analyzer_endpoint: String,

    #[config(env = "ADINSIGHT_ANALYZER_MODEL", default = "gpt-4o-mini")]
    pub analyzer_model: String,

    #[config(env = "ADINSIGHT_ANALYZER_API_KEY")]
    pub analyzer_api_key: Option<String>,
}

impl Default for AdinsightConfig {
    fn default() -> Self {
        let analyzer = AnalyzerConfig::default();
        Self {
            data_dir: None,
            preferred_order: None,
            header_labels: None,
            analyzer_endpoint: analyzer.endpoint,
            analyzer_model: analyzer.model,
            analyzer_api_key: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "adinsight")
}

impl AdinsightConfig {
    /// Loads env, then the config file when it exists, then defaults.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::builder()
                .env()
                .load()
                .map_err(|e| AdinsightError::Config(e.to_string())),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| AdinsightError::Config(e.to_string()))
    }

    /// Configured data directory, or the OS data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".adinsight"))
    }

    /// Projection options, with unset fields taken from the built-in defaults.
    pub fn projection_options(&self) -> ProjectionOptions {
        let defaults = ProjectionOptions::default();
        ProjectionOptions {
            preferred_order: self
                .preferred_order
                .clone()
                .unwrap_or(defaults.preferred_order),
            header_labels: self
                .header_labels
                .clone()
                .unwrap_or(defaults.header_labels),
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            endpoint: self.analyzer_endpoint.clone(),
            model: self.analyzer_model.clone(),
            api_key: self.analyzer_api_key.clone(),
        }
    }
}

/// `adinsight.toml` in the OS config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
