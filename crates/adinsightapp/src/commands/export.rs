use chrono::{DateTime, Utc};
use tracing::info;

use crate::commands::{CmdMessage, CmdResult, Payload};
use crate::error::Result;
use crate::projection::{project, ProjectionOptions};
use crate::selection::resolve_export_scope;
use crate::sheet::{export_filename, SheetLayout, SheetWriter};
use crate::state::AppState;

/// Exports the selected entries, or every entry when nothing is selected.
///
/// With nothing to export, the result carries a notice and no payload.
pub fn run(
    state: &AppState,
    writer: &dyn SheetWriter,
    options: &ProjectionOptions,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let (scope, entries) = resolve_export_scope(&state.entries, &state.selection);
    if entries.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No entries to export")));
    }

    let projection = project(entries.iter().copied(), options);
    let layout = SheetLayout::for_projection(&projection);
    let bytes = writer.write(&projection, &layout)?;
    let filename = export_filename(state.settings.export_prefix(), scope, now);

    info!(
        file = %filename,
        entries = entries.len(),
        rows = projection.rows.len(),
        columns = projection.headers.len(),
        "Exported spreadsheet"
    );

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Exported {} entries ({} rows) to {}",
            entries.len(),
            projection.rows.len(),
            filename
        )))
        .with_payload(Payload { filename, bytes }))
}
