//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every client.
//!
//! ## Role and Responsibilities
//!
//! - **Owns the current state**: loaded from the store once at construction.
//! - **Dispatches** to the command functions and swaps in the state they return.
//! - **Persists** after every operation that changes entries, templates or settings.
//!   A failed save never undoes the operation: it is logged and reported as a warning
//!   message on the result.
//! - **Normalizes inputs**: user index strings (`"3"`, `"1-3"`) become selectors.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O beyond the store**: Produced files come back as payloads for the client to
//!   write
//! - **Confirmation**: Restore is split into [`AdinsightApi::preview_restore`] and
//!   [`AdinsightApi::restore`]; the client decides whether to go on
//!
//! ## Selection
//!
//! The selection lives in memory only. Selection operations update the state without
//! touching storage.
//!
//! ## Generic Over DataStore
//!
//! - Production: `AdinsightApi<FsStore>`
//! - Testing: `AdinsightApi<MemStore>`

use chrono::Utc;
use tracing::warn;

use crate::analyzer::StrategyAnalyzer;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::commands::settings::SettingsAction;
use crate::commands::templates::TemplateAction;
use crate::draft::EntryDraft;
use crate::error::{AdinsightError, Result};
use crate::index::{parse_index_or_range, EntrySelector};
use crate::projection::ProjectionOptions;
use crate::sheet::xlsx::XlsxWriter;
use crate::sheet::SheetWriter;
use crate::snapshot::Restore;
use crate::state::AppState;
use crate::store::{load_state, save_state, DataStore};

pub struct AdinsightApi<S: DataStore> {
    store: S,
    state: AppState,
    options: ProjectionOptions,
    writer: Box<dyn SheetWriter>,
}

impl<S: DataStore> AdinsightApi<S> {
    pub fn new(store: S, options: ProjectionOptions) -> Self {
        let state = load_state(&store);
        Self {
            store,
            state,
            options,
            writer: Box::new(XlsxWriter::new()),
        }
    }

    pub fn with_writer(mut self, writer: Box<dyn SheetWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Installs the next state and writes it to the store.
    fn commit(&mut self, next: AppState, mut result: CmdResult) -> CmdResult {
        self.state = next;
        if let Err(e) = save_state(&self.store, &self.state) {
            warn!(error = %e, "Failed to save state");
            result.add_message(CmdMessage::warning(format!("Changes not saved: {}", e)));
        }
        result
    }

    pub fn create_entry(&mut self, draft: &EntryDraft) -> Result<CmdResult> {
        let (next, result) = commands::create::run(&self.state, draft, Utc::now())?;
        Ok(self.commit(next, result))
    }

    pub fn list_entries(&self) -> CmdResult {
        commands::get::list(&self.state)
    }

    pub fn view_entries<I: AsRef<str>>(&self, indexes: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::get::view(&self.state, &selectors)
    }

    pub fn copy_entry(&self, index: &str) -> Result<CmdResult> {
        commands::copy::run(&self.state, parse_single(index)?)
    }

    pub fn delete_entries<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(indexes)?;
        let (next, result) = commands::delete::run(&self.state, &selectors)?;
        Ok(self.commit(next, result))
    }

    pub fn clear_entries(&mut self) -> CmdResult {
        let (next, result) = commands::delete::clear_all(&self.state);
        self.commit(next, result)
    }

    pub fn toggle_selection<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(indexes)?;
        let (next, result) = commands::select::toggle(&self.state, &selectors)?;
        self.state = next;
        Ok(result)
    }

    pub fn toggle_select_all(&mut self) -> CmdResult {
        let (next, result) = commands::select::toggle_all(&self.state);
        self.state = next;
        result
    }

    pub fn select_all(&mut self) -> CmdResult {
        let (next, result) = commands::select::select_all(&self.state);
        self.state = next;
        result
    }

    pub fn clear_selection(&mut self) -> CmdResult {
        let (next, result) = commands::select::clear(&self.state);
        self.state = next;
        result
    }

    pub fn list_templates(&self) -> CmdResult {
        commands::templates::list(&self.state)
    }

    pub fn edit_templates(&mut self, action: &TemplateAction) -> CmdResult {
        let (next, result) = commands::templates::run(&self.state, action);
        self.commit(next, result)
    }

    /// Exports the current selection, or everything when nothing is selected.
    pub fn export(&self) -> Result<CmdResult> {
        commands::export::run(&self.state, self.writer.as_ref(), &self.options, Utc::now())
    }

    /// Exports exactly the given entries, replacing the current selection.
    pub fn export_entries<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(indexes)?;
        let (next, _) = commands::select::replace(&self.state, &selectors)?;
        self.state = next;
        self.export()
    }

    pub fn backup(&self) -> CmdResult {
        commands::backup::run(&self.state, Utc::now())
    }

    pub fn preview_restore(&self, bytes: &[u8]) -> Result<(Restore, CmdResult)> {
        commands::restore::preview(&self.state, bytes)
    }

    pub fn restore(&mut self, restore: &Restore) -> CmdResult {
        let (next, result) = commands::restore::run(&self.state, restore);
        self.commit(next, result)
    }

    pub fn settings(&mut self, action: &SettingsAction) -> CmdResult {
        let (next, result) = commands::settings::run(&self.state, action);
        if matches!(action, SettingsAction::Show) {
            return result;
        }
        self.commit(next, result)
    }

    pub fn analyze(&self, index: &str, analyzer: &dyn StrategyAnalyzer) -> Result<CmdResult> {
        commands::analyze::run(&self.state, parse_single(index)?, analyzer)
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<EntrySelector>> {
    if inputs.is_empty() {
        return Err(AdinsightError::Api("No entry index given".to_string()));
    }
    let mut selectors: Vec<EntrySelector> = Vec::new();
    for input in inputs {
        let selector = parse_index_or_range(input.as_ref()).map_err(AdinsightError::Api)?;
        if !selectors.contains(&selector) {
            selectors.push(selector);
        }
    }
    Ok(selectors)
}

fn parse_single(input: &str) -> Result<EntrySelector> {
    match parse_index_or_range(input).map_err(AdinsightError::Api)? {
        EntrySelector::Index(i) => Ok(EntrySelector::Index(i)),
        EntrySelector::Range(..) => Err(AdinsightError::Api(format!(
            "Expected a single index, got range {}",
            input
        ))),
    }
}
