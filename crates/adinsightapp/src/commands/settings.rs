use crate::commands::{CmdMessage, CmdResult};
use crate::settings::DEFAULT_EXPORT_FILE_NAME;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    AutoSave(bool),
    FileName(String),
}

pub fn run(state: &AppState, action: &SettingsAction) -> (AppState, CmdResult) {
    let mut next = state.clone();
    let message = match action {
        SettingsAction::Show => None,
        SettingsAction::AutoSave(enabled) => {
            next.settings.enable_auto_save = *enabled;
            Some(CmdMessage::success(format!(
                "Auto-save {}",
                if *enabled { "enabled" } else { "disabled" }
            )))
        }
        SettingsAction::FileName(name) => {
            next.settings.export_file_name = name.clone();
            if name.trim().is_empty() {
                Some(CmdMessage::info(format!(
                    "Export file name cleared, using {}",
                    DEFAULT_EXPORT_FILE_NAME
                )))
            } else {
                Some(CmdMessage::success(format!(
                    "Export file name set to {}",
                    name.trim()
                )))
            }
        }
    };

    let mut result = CmdResult {
        settings: Some(next.settings.clone()),
        ..Default::default()
    };
    if let Some(message) = message {
        result.add_message(message);
    }
    (next, result)
}
