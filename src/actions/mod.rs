use crate::config::ConfigGroup;

pub mod contextmenu;
pub mod paste;
pub mod runcommand;
pub mod switchdesktop;

/// A single menu entry or immediate action, as plain data.
///
/// The hosting shell owns execution and presentation; plugins only describe
/// what should appear. The `id` is namespaced by convention
/// (`"switchdesktop:3"`, `"paste:primary"`) so the host can route it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub text: String,
    pub icon: Option<String>,
    pub enabled: bool,
    pub separator: bool,
}

impl Action {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            icon: None,
            enabled: true,
            separator: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn separator() -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            icon: None,
            enabled: false,
            separator: true,
        }
    }
}

/// Declarative description of a plugin's configuration surface.
///
/// Stands in for a widget: the host renders the fields, collects edited
/// values into a [`ConfigGroup`] keyed by field `key`, and hands them back
/// through `configuration_accepted`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigInterface {
    pub title: String,
    pub fields: Vec<ConfigField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigField {
    pub key: String,
    pub label: String,
    pub kind: ConfigFieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFieldKind {
    Text { value: String },
    Toggle { value: bool },
    Number { value: i64, min: i64, max: i64 },
    Choice { value: String, options: Vec<String> },
    /// Ordered multi-selection from a fixed option set.
    List { values: Vec<String>, options: Vec<String> },
}

/// Behavior bound to one event signature on a containment.
///
/// Implementations are loaded by name through the
/// [`PluginLoader`](crate::core::loader::PluginLoader) and owned by exactly
/// one registry scope. Query methods (`triggerable_action`,
/// `contextual_actions`) take `&self`; plugin state changes only through
/// the explicit `perform_*` and configuration calls.
///
/// `restore` and `save` touch only the group they are given and never fail:
/// unknown or missing keys fall back to defaults, and failure is expressed
/// as empty/absent results, not errors.
pub trait ActionPlugin: Send {
    /// Stable identifier used for loading and persistence.
    fn plugin_name(&self) -> &str;

    /// User-visible name.
    fn display_name(&self) -> &str {
        self.plugin_name()
    }

    /// Icon name, freedesktop style. Empty when the plugin has none.
    fn icon(&self) -> &str {
        ""
    }

    /// False only for the inert placeholder substituted for unknown names.
    fn is_valid(&self) -> bool {
        true
    }

    /// Load state from a configuration group. Idempotent; may flip
    /// `configuration_required`.
    fn restore(&mut self, config: &ConfigGroup);

    /// Serialize state so that `restore` reaches an equivalent plugin.
    fn save(&self, config: &mut ConfigGroup);

    /// When true, dispatch refuses to trigger until the user completes
    /// configuration.
    fn configuration_required(&self) -> bool {
        false
    }

    /// The action fired immediately on a non-menu trigger. `None` means the
    /// plugin only offers contextual actions.
    fn triggerable_action(&self) -> Option<Action> {
        None
    }

    /// Entries for menu population, recomputed on every call.
    fn contextual_actions(&self) -> Vec<Action> {
        Vec::new()
    }

    /// Step forward through whatever the plugin cycles (wheel down/right).
    fn perform_next(&mut self) {}

    /// Step backward (wheel up/left).
    fn perform_previous(&mut self) {}

    /// Configuration surface description, or `None` when the plugin is not
    /// configurable beyond its defaults.
    fn create_configuration_interface(&mut self) -> Option<ConfigInterface> {
        None
    }

    /// Commit edited field values after the user accepts the configuration
    /// surface.
    fn configuration_accepted(&mut self, _values: &ConfigGroup) {}
}

pub type PluginBox = Box<dyn ActionPlugin>;

/// Placeholder bound in place of an unresolvable plugin name.
///
/// Inert by contract: no trigger action, no contextual actions, no
/// configuration requirement. It remembers the requested name so the
/// binding round-trips through save/load without losing what the user
/// configured, in case the implementation shows up again later.
pub struct InertAction {
    requested: String,
}

impl InertAction {
    pub fn new(requested: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
        }
    }
}

impl ActionPlugin for InertAction {
    fn plugin_name(&self) -> &str {
        &self.requested
    }

    fn is_valid(&self) -> bool {
        false
    }

    fn restore(&mut self, _config: &ConfigGroup) {}

    fn save(&self, _config: &mut ConfigGroup) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_builder() {
        let action = Action::new("paste:primary", "Paste").with_icon("edit-paste");
        assert_eq!(action.id, "paste:primary");
        assert_eq!(action.text, "Paste");
        assert_eq!(action.icon.as_deref(), Some("edit-paste"));
        assert!(action.enabled);
        assert!(!action.separator);

        let sep = Action::separator();
        assert!(sep.separator);
        assert!(!sep.enabled);
    }

    #[test]
    fn test_inert_action_is_inert() {
        let mut inert = InertAction::new("no-such-plugin");
        assert_eq!(inert.plugin_name(), "no-such-plugin");
        assert!(!inert.is_valid());
        assert!(!inert.configuration_required());
        assert!(inert.triggerable_action().is_none());
        assert!(inert.contextual_actions().is_empty());
        assert!(inert.create_configuration_interface().is_none());

        // save writes nothing of its own
        let mut group = ConfigGroup::new();
        inert.save(&mut group);
        assert!(group.is_empty());
    }
}
