use tracing::debug;

use crate::actions::{Action, ActionPlugin, ConfigField, ConfigFieldKind, ConfigInterface};
use crate::config::ConfigGroup;

/// Entries the hosting shell knows how to execute, in the order they are
/// offered in the configuration surface. `(id, text, icon)`.
const AVAILABLE_ENTRIES: &[(&str, &str, &str)] = &[
    ("add-widgets", "Add Widgets…", "list-add"),
    ("configure-shell", "Configure Shell…", "configure"),
    ("lock-widgets", "Lock Widgets", "object-locked"),
    ("run-command", "Run Command…", "system-run"),
    ("lock-screen", "Lock Screen", "system-lock-screen"),
    ("leave", "Leave…", "system-log-out"),
];

/// Separator marker inside the persisted entry list.
const SEPARATOR_ENTRY: &str = "-";

/// Populates the containment's context menu from a configurable, ordered
/// list of shell entries. Has no immediate trigger action, so dispatching
/// it always ends in menu population.
pub struct ContextMenuPlugin {
    entries: Vec<String>,
}

impl ContextMenuPlugin {
    pub fn new() -> Self {
        Self {
            entries: Self::default_entries(),
        }
    }

    fn default_entries() -> Vec<String> {
        vec![
            "add-widgets".to_string(),
            "configure-shell".to_string(),
            "lock-widgets".to_string(),
            SEPARATOR_ENTRY.to_string(),
            "lock-screen".to_string(),
            "leave".to_string(),
        ]
    }

    fn lookup(id: &str) -> Option<(&'static str, &'static str, &'static str)> {
        AVAILABLE_ENTRIES.iter().copied().find(|(e, _, _)| *e == id)
    }

    fn available_ids() -> Vec<String> {
        AVAILABLE_ENTRIES
            .iter()
            .map(|(id, _, _)| id.to_string())
            .collect()
    }
}

impl Default for ContextMenuPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPlugin for ContextMenuPlugin {
    fn plugin_name(&self) -> &str {
        "contextmenu"
    }

    fn display_name(&self) -> &str {
        "Standard Menu"
    }

    fn icon(&self) -> &str {
        "application-menu"
    }

    fn restore(&mut self, config: &ConfigGroup) {
        let entries = config.get_str_array("entries");
        if !entries.is_empty() {
            self.entries = entries;
        } else {
            self.entries = Self::default_entries();
        }
    }

    fn save(&self, config: &mut ConfigGroup) {
        let entries: Vec<toml::Value> = self
            .entries
            .iter()
            .map(|e| toml::Value::String(e.clone()))
            .collect();
        config.set("entries", entries);
    }

    fn contextual_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for entry in &self.entries {
            if entry == SEPARATOR_ENTRY {
                actions.push(Action::separator());
                continue;
            }
            match Self::lookup(entry) {
                Some((id, text, icon)) => {
                    actions.push(Action::new(format!("shell:{id}"), text).with_icon(icon));
                }
                None => debug!("Skipping unknown menu entry '{}'", entry),
            }
        }
        actions
    }

    fn create_configuration_interface(&mut self) -> Option<ConfigInterface> {
        Some(ConfigInterface {
            title: "Configure Standard Menu".to_string(),
            fields: vec![ConfigField {
                key: "entries".to_string(),
                label: "Menu entries".to_string(),
                kind: ConfigFieldKind::List {
                    values: self.entries.clone(),
                    options: Self::available_ids(),
                },
            }],
        })
    }

    fn configuration_accepted(&mut self, values: &ConfigGroup) {
        let entries = values.get_str_array("entries");
        if !entries.is_empty() {
            self.entries = entries;
        }
    }
}
