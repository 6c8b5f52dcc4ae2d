//! Attribute template commands.
//!
//! Every edit is a no-op on invalid input (blank key or value, duplicate value, missing
//! key). No-ops are reported as info messages, not errors.

use crate::commands::{CmdMessage, CmdResult};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateAction {
    AddKey(String),
    RemoveKey(String),
    AddValue { key: String, value: String },
    RemoveValue { key: String, value: String },
}

pub fn list(state: &AppState) -> CmdResult {
    CmdResult {
        templates: Some(state.templates.clone()),
        ..Default::default()
    }
}

pub fn run(state: &AppState, action: &TemplateAction) -> (AppState, CmdResult) {
    let mut next = state.clone();
    let templates = &mut next.templates;

    let (changed, done, unchanged) = match action {
        TemplateAction::AddKey(key) => (
            templates.add_key(key),
            format!("Template key added: {}", key.trim()),
            format!("Template key not added: {:?} is blank or exists", key),
        ),
        TemplateAction::RemoveKey(key) => (
            templates.remove_key(key),
            format!("Template key removed: {}", key.trim()),
            format!("No template key {:?}", key),
        ),
        TemplateAction::AddValue { key, value } => (
            templates.add_value(key, value),
            format!("Template value saved: {} = {}", key.trim(), value.trim()),
            format!("Template value not saved: {:?} is blank or already saved", value),
        ),
        TemplateAction::RemoveValue { key, value } => (
            templates.remove_value(key, value),
            format!("Template value removed: {} = {}", key.trim(), value),
            format!("No template value {:?} under {:?}", value, key),
        ),
    };

    let message = if changed {
        CmdMessage::success(done)
    } else {
        CmdMessage::info(unchanged)
    };
    let result = CmdResult {
        templates: Some(next.templates.clone()),
        ..Default::default()
    }
    .with_message(message);
    (next, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::test_utils::state_with;

    fn add_value(key: &str, value: &str) -> TemplateAction {
        TemplateAction::AddValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn add_value_creates_key() {
        let state = AppState::default();
        let (next, result) = run(&state, &add_value("广告类型", "开屏广告"));
        assert_eq!(next.templates.values("广告类型"), &["开屏广告"]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn duplicate_value_is_reported_as_info() {
        let (state, _) = run(&AppState::default(), &add_value("k", "v"));
        let (next, result) = run(&state, &add_value("k", "v"));
        assert_eq!(next.templates, state.templates);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn removing_last_value_keeps_key() {
        let (state, _) = run(&AppState::default(), &add_value("k", "v"));
        let (next, _) = run(
            &state,
            &TemplateAction::RemoveValue {
                key: "k".to_string(),
                value: "v".to_string(),
            },
        );
        assert!(next.templates.contains_key("k"));
        assert!(next.templates.values("k").is_empty());
    }

    #[test]
    fn removing_key_does_not_touch_entries() {
        let state = state_with(&["A"]);
        let (state, _) = run(&state, &TemplateAction::AddKey("广告类型".to_string()));
        let (next, _) = run(&state, &TemplateAction::RemoveKey("广告类型".to_string()));
        assert!(!next.templates.contains_key("广告类型"));
        assert_eq!(next.entries, state.entries);
    }

    #[test]
    fn list_returns_current_map() {
        let (state, _) = run(&AppState::default(), &add_value("k", "v"));
        assert_eq!(list(&state).templates, Some(state.templates.clone()));
    }
}
