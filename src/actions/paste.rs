use crate::actions::{Action, ActionPlugin};
use crate::config::ConfigGroup;

/// Pastes the primary selection at the event position. Stateless; the
/// shell performs the actual paste when it executes the triggered action.
pub struct PastePlugin;

impl PastePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PastePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPlugin for PastePlugin {
    fn plugin_name(&self) -> &str {
        "paste"
    }

    fn display_name(&self) -> &str {
        "Paste"
    }

    fn icon(&self) -> &str {
        "edit-paste"
    }

    fn restore(&mut self, _config: &ConfigGroup) {}

    fn save(&self, _config: &mut ConfigGroup) {}

    fn triggerable_action(&self) -> Option<Action> {
        Some(Action::new("paste:primary", "Paste").with_icon("edit-paste"))
    }
}
