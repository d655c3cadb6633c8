use crate::actions::{Action, ActionPlugin, ConfigField, ConfigFieldKind, ConfigInterface};
use crate::config::ConfigGroup;

/// Runs a user-configured command line. Until a command is set the plugin
/// reports `configuration_required` and dispatch refuses to trigger it.
pub struct RunCommandPlugin {
    command: String,
}

impl RunCommandPlugin {
    pub fn new() -> Self {
        Self {
            command: String::new(),
        }
    }

    fn configured(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

impl Default for RunCommandPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPlugin for RunCommandPlugin {
    fn plugin_name(&self) -> &str {
        "runcommand"
    }

    fn display_name(&self) -> &str {
        "Run Command"
    }

    fn icon(&self) -> &str {
        "system-run"
    }

    fn restore(&mut self, config: &ConfigGroup) {
        self.command = config.get_str_or("command", "").to_string();
    }

    fn save(&self, config: &mut ConfigGroup) {
        config.set("command", self.command.as_str());
    }

    fn configuration_required(&self) -> bool {
        !self.configured()
    }

    fn triggerable_action(&self) -> Option<Action> {
        if !self.configured() {
            return None;
        }
        Some(
            Action::new(
                format!("runcommand:{}", self.command),
                format!("Run {}", self.command),
            )
            .with_icon("system-run"),
        )
    }

    fn create_configuration_interface(&mut self) -> Option<ConfigInterface> {
        Some(ConfigInterface {
            title: "Configure Run Command".to_string(),
            fields: vec![ConfigField {
                key: "command".to_string(),
                label: "Command".to_string(),
                kind: ConfigFieldKind::Text {
                    value: self.command.clone(),
                },
            }],
        })
    }

    fn configuration_accepted(&mut self, values: &ConfigGroup) {
        self.command = values.get_str_or("command", &self.command).to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_configured_plugin(command: &str) -> RunCommandPlugin {
        let mut plugin = RunCommandPlugin::new();
        let mut config = ConfigGroup::new();
        config.set("command", command);
        plugin.restore(&config);
        plugin
    }

    #[test]
    fn test_requires_configuration_until_command_set() {
        let mut plugin = RunCommandPlugin::new();
        assert!(plugin.configuration_required());
        assert!(plugin.triggerable_action().is_none());

        let mut values = ConfigGroup::new();
        values.set("command", "foot");
        plugin.configuration_accepted(&values);

        assert!(!plugin.configuration_required());
        let action = plugin.triggerable_action().expect("configured plugin triggers");
        assert_eq!(action.id, "runcommand:foot");
        assert_eq!(action.text, "Run foot");
    }

    #[test]
    fn test_whitespace_command_still_requires_configuration() {
        let plugin = create_configured_plugin("   ");
        assert!(plugin.configuration_required());
    }

    #[test]
    fn test_save_restore_round_trip() {
        let plugin = create_configured_plugin("wofi --show drun");
        let mut saved = ConfigGroup::new();
        plugin.save(&mut saved);

        let mut second = RunCommandPlugin::new();
        second.restore(&saved);
        let mut resaved = ConfigGroup::new();
        second.save(&mut resaved);

        assert_eq!(saved, resaved);
        assert!(!second.configuration_required());
    }

    #[test]
    fn test_configuration_interface_reflects_state() {
        let mut plugin = create_configured_plugin("kitty");
        let interface = plugin.create_configuration_interface().expect("configurable");
        assert_eq!(interface.fields.len(), 1);
        match &interface.fields[0].kind {
            ConfigFieldKind::Text { value } => assert_eq!(value, "kitty"),
            other => panic!("unexpected field kind: {other:?}"),
        }
    }
}
