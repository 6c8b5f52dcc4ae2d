//! # Command Layer
//!
//! This module contains the **core business logic** of adinsight. Each command lives in
//! its own submodule and is a plain function over [`AppState`].
//!
//! ## State Transitions
//!
//! Commands that change data take `&AppState` and return the next state alongside the
//! result:
//!
//! ```text
//! fn run(state: &AppState, ...) -> Result<(AppState, CmdResult)>
//! ```
//!
//! Queries take `&AppState` and return only a [`CmdResult`]. No command touches storage:
//! persisting the new state is the [`api`](crate::api) layer's job. This keeps every
//! command testable with a literal state value.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, files, or network (the analyzer collaborator is
//!   passed in)
//! - **Argument parsing**: That's the CLI layer's job
//! - **User interaction**: No prompts. Destructive restores are split into a parse step
//!   and an apply step so the caller can confirm in between.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_entries`: Entries created or removed (with their display index)
//! - `listed_entries`: Entries to display
//! - `draft`: An editable copy, for `copy`
//! - `templates` / `settings`: Current values, for the commands that show them
//! - `payload`: A produced file (spreadsheet or backup) with its suggested filename
//! - `analysis`: Text from the strategy analyzer
//! - `messages`: Structured messages with levels (info, success, warning, error)
//!
//! ## Command Modules
//!
//! - [`create`]: Create an entry from a draft
//! - [`copy`]: Copy an entry into a draft ("use as template")
//! - [`delete`]: Delete entries, or clear everything
//! - [`get`]: List and view entries
//! - [`select`]: Selection set for scoped export
//! - [`templates`]: Attribute template store
//! - [`export`]: Spreadsheet export
//! - [`backup`]: Snapshot payload
//! - [`restore`]: Snapshot restore
//! - [`settings`]: Application settings
//! - [`analyze`]: Strategy analysis
//! - [`helpers`]: Shared utilities (index resolution)

use serde::Serialize;

use crate::attributes::TemplateMap;
use crate::draft::EntryDraft;
use crate::index::DisplayEntry;
use crate::settings::AppSettings;

pub mod analyze;
pub mod backup;
pub mod copy;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod helpers;
pub mod restore;
pub mod select;
pub mod settings;
pub mod templates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A produced file: suggested name plus content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<DisplayEntry>,
    pub listed_entries: Vec<DisplayEntry>,
    pub draft: Option<EntryDraft>,
    pub templates: Option<TemplateMap>,
    pub settings: Option<AppSettings>,
    pub payload: Option<Payload>,
    pub analysis: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
