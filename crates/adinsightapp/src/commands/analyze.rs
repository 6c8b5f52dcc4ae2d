use crate::analyzer::StrategyAnalyzer;
use crate::commands::CmdResult;
use crate::error::{AdinsightError, Result};
use crate::index::EntrySelector;
use crate::state::AppState;

use super::helpers::{find_entry, resolve_selectors};

/// Asks the analyzer for a strategy summary of one entry.
///
/// Analyzer failures come back as displayable text in `analysis`, never as errors.
/// The entry itself is not modified.
pub fn run(
    state: &AppState,
    selector: EntrySelector,
    analyzer: &dyn StrategyAnalyzer,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(state, &[selector])?;
    let [(_, id)] = resolved.as_slice() else {
        return Err(AdinsightError::Api(
            "Analyze takes exactly one entry".to_string(),
        ));
    };
    let entry = find_entry(state, id)?;

    Ok(CmdResult {
        analysis: Some(analyzer.analyze(entry)),
        ..Default::default()
    })
}
