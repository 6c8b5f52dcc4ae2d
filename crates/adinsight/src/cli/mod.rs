//! # CLI Layer
//!
//! This module is **one possible UI client** for adinsight. It is not the application
//! itself: everything it does goes through [`adinsightapp::api::AdinsightApi`].
//!
//! The CLI layer is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Writes produced payloads (spreadsheets, backups) to disk
//! - Asks for confirmation before destructive operations
//! - Uses `std::process::exit`
//!
//! ## Structure
//!
//! - `setup`: clap argument definitions
//! - `commands`: `run()` dispatch and the per-command `handle_*` functions
//! - `render`: `CmdResult` pieces to terminal strings
//! - `styles`: the color palette

pub mod commands;
pub mod render;
pub mod setup;
pub mod styles;
