use crate::actions::{Action, ActionPlugin, ConfigField, ConfigFieldKind, ConfigInterface};
use crate::config::ConfigGroup;

const DEFAULT_DESKTOPS: i64 = 4;
const MAX_DESKTOPS: i64 = 20;

/// Cycles through virtual desktops on wheel scroll and lists them as
/// contextual actions. The triggered action id (`switchdesktop:<n>`, 1-based)
/// tells the shell which desktop to activate.
pub struct SwitchDesktopPlugin {
    count: usize,
    /// Custom desktop names; generated "Desktop N" labels when shorter than
    /// `count`.
    names: Vec<String>,
    current: usize,
}

impl SwitchDesktopPlugin {
    pub fn new() -> Self {
        Self {
            count: DEFAULT_DESKTOPS as usize,
            names: Vec::new(),
            current: 0,
        }
    }

    fn label(&self, index: usize) -> String {
        self.names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Desktop {}", index + 1))
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

impl Default for SwitchDesktopPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPlugin for SwitchDesktopPlugin {
    fn plugin_name(&self) -> &str {
        "switchdesktop"
    }

    fn display_name(&self) -> &str {
        "Switch Desktop"
    }

    fn icon(&self) -> &str {
        "user-desktop"
    }

    fn restore(&mut self, config: &ConfigGroup) {
        self.count = config
            .get_i64_or("desktops", DEFAULT_DESKTOPS)
            .clamp(1, MAX_DESKTOPS) as usize;
        self.names = config.get_str_array("names");
        if self.current >= self.count {
            self.current = 0;
        }
    }

    fn save(&self, config: &mut ConfigGroup) {
        config.set("desktops", self.count as i64);
        if !self.names.is_empty() {
            let names: Vec<toml::Value> = self
                .names
                .iter()
                .map(|n| toml::Value::String(n.clone()))
                .collect();
            config.set("names", names);
        }
    }

    fn contextual_actions(&self) -> Vec<Action> {
        (0..self.count)
            .map(|i| {
                let action = Action::new(format!("switchdesktop:{}", i + 1), self.label(i))
                    .with_icon("user-desktop");
                if i == self.current {
                    action.disabled()
                } else {
                    action
                }
            })
            .collect()
    }

    fn perform_next(&mut self) {
        self.current = (self.current + 1) % self.count;
    }

    fn perform_previous(&mut self) {
        self.current = (self.current + self.count - 1) % self.count;
    }

    fn create_configuration_interface(&mut self) -> Option<ConfigInterface> {
        Some(ConfigInterface {
            title: "Configure Desktop Switching".to_string(),
            fields: vec![ConfigField {
                key: "desktops".to_string(),
                label: "Number of desktops".to_string(),
                kind: ConfigFieldKind::Number {
                    value: self.count as i64,
                    min: 1,
                    max: MAX_DESKTOPS,
                },
            }],
        })
    }

    fn configuration_accepted(&mut self, values: &ConfigGroup) {
        self.count = values
            .get_i64_or("desktops", self.count as i64)
            .clamp(1, MAX_DESKTOPS) as usize;
        if self.current >= self.count {
            self.current = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_plugin(count: i64) -> SwitchDesktopPlugin {
        let mut plugin = SwitchDesktopPlugin::new();
        let mut config = ConfigGroup::new();
        config.set("desktops", count);
        plugin.restore(&config);
        plugin
    }

    #[test]
    fn test_stepping_wraps_around() {
        let mut plugin = create_test_plugin(3);
        assert_eq!(plugin.current(), 0);

        plugin.perform_next();
        plugin.perform_next();
        assert_eq!(plugin.current(), 2);
        plugin.perform_next();
        assert_eq!(plugin.current(), 0);

        plugin.perform_previous();
        assert_eq!(plugin.current(), 2);
    }

    #[test]
    fn test_contextual_actions_mark_current_disabled() {
        let mut plugin = create_test_plugin(3);
        plugin.perform_next();

        let actions = plugin.contextual_actions();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[1].id, "switchdesktop:2");
        assert!(!actions[1].enabled);
        assert!(actions[0].enabled);
        assert_eq!(actions[0].text, "Desktop 1");
    }

    #[test]
    fn test_no_trigger_action() {
        let plugin = create_test_plugin(4);
        assert!(plugin.triggerable_action().is_none());
    }

    #[test]
    fn test_restore_clamps_and_defaults() {
        let mut plugin = SwitchDesktopPlugin::new();
        let mut config = ConfigGroup::new();
        config.set("desktops", 500_i64);
        plugin.restore(&config);
        assert_eq!(plugin.contextual_actions().len(), MAX_DESKTOPS as usize);

        // missing key falls back to the default
        plugin.restore(&ConfigGroup::new());
        assert_eq!(plugin.contextual_actions().len(), DEFAULT_DESKTOPS as usize);
    }

    #[test]
    fn test_save_restore_round_trip_is_idempotent() {
        let mut plugin = SwitchDesktopPlugin::new();
        let mut config = ConfigGroup::new();
        config.set("desktops", 6_i64);
        config.set(
            "names",
            vec![
                toml::Value::String("Mail".to_string()),
                toml::Value::String("Web".to_string()),
            ],
        );
        plugin.restore(&config);

        let mut saved = ConfigGroup::new();
        plugin.save(&mut saved);

        let mut second = SwitchDesktopPlugin::new();
        second.restore(&saved);
        let mut resaved = ConfigGroup::new();
        second.save(&mut resaved);

        assert_eq!(saved, resaved);
        assert_eq!(second.contextual_actions()[0].text, "Mail");
        assert_eq!(second.contextual_actions()[2].text, "Desktop 3");
    }

    #[test]
    fn test_configuration_accepted_shrink_resets_current() {
        let mut plugin = create_test_plugin(5);
        for _ in 0..4 {
            plugin.perform_next();
        }
        assert_eq!(plugin.current(), 4);

        let mut values = ConfigGroup::new();
        values.set("desktops", 2_i64);
        plugin.configuration_accepted(&values);
        assert_eq!(plugin.current(), 0);
        assert_eq!(plugin.contextual_actions().len(), 2);
    }
}
