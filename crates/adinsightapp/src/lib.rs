//! # Adinsight Architecture
//!
//! Adinsight records mobile-game ad monetization test sessions and exports them to
//! spreadsheets. It is a **UI-agnostic library**: the bundled CLI is one client, but the
//! same core could sit behind a desktop shell or a browser front-end.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (the `adinsight` binary, or any other client)     │
//! │  - Parses input, renders output, asks for confirmation      │
//! │  - Writes produced payloads (xlsx, backups) to disk         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Holds the current AppState, resolves display indexes     │
//! │  - Persists the state after every mutating operation        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - State transitions: take `&AppState`, return a new one    │
//! │  - Structured `CmdResult` values, no I/O                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Three keyed slots: entries, templates, settings          │
//! │  - FsStore (production), MemStore (testing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Data
//!
//! An [`model::Entry`] is one recorded play session. It owns an ordered list of
//! [`model::AdGroup`]s, and each group owns free-form key/value [`model::Attribute`]s.
//! Attribute keys are open-ended: nothing in the export path hardcodes them. The
//! [`projection`] module discovers the keys present in the data and flattens
//! entries into a rectangular table, one row per ad group.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the process and
//! never prompts. Destructive operations that need a confirmation (restore, clear) are
//! split so the caller can preview first and decide.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade every client talks to
//! - [`commands`]: State transitions and queries
//! - [`model`]: `Entry`, `AdGroup`, `Attribute`, identifiers
//! - [`state`]: The in-memory `AppState` every command transforms
//! - [`index`]: 1-based display indexes and range selectors
//! - [`draft`]: The editable form buffer an entry is created from
//! - [`attributes`]: Template store and built-in value presets
//! - [`projection`]: Key discovery, column ordering and row flattening
//! - [`selection`]: Scoped-export selection set
//! - [`snapshot`]: Backup payload serialization and restore validation
//! - [`sheet`]: Spreadsheet writer collaborator (xlsx)
//! - [`analyzer`]: Text-generation collaborator for strategy summaries
//! - [`store`]: Persistence slots
//! - [`config`]: Tool configuration
//! - [`timer`]: Session stopwatch

pub mod analyzer;
pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod index;
pub mod model;
pub mod projection;
pub mod selection;
pub mod settings;
pub mod sheet;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_utils;
