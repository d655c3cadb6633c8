use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::containment::{ActionsSource, Containment, ContainmentId, ContainmentKind};

/// Name of the per-scope group that holds event-to-plugin bindings.
pub const ACTION_PLUGINS_GROUP: &str = "ActionPlugins";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory not found")]
    NoConfigDir,

    #[error("failed to read config file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A named tree of configuration entries.
///
/// Entries are scalar toml values, subgroups are nested `ConfigGroup`s.
/// Plugins read and write only the group handed to them; the file layout
/// around the groups is owned by [`ShellConfig`]. Both maps are ordered so
/// serialization is stable across save/load cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigGroup {
    entries: BTreeMap<String, toml::Value>,
    groups: BTreeMap<String, ConfigGroup>,
}

impl ConfigGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_str())
    }

    /// Missing or mistyped entries fall back to the default; readers must
    /// tolerate groups written by other plugin versions.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    pub fn get_i64_or(&self, key: &str, default: i64) -> i64 {
        self.entries
            .get(key)
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.entries
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.entries
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<toml::Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove_entry(&mut self, key: &str) -> Option<toml::Value> {
        self.entries.remove(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &toml::Value)> {
        self.entries.iter()
    }

    pub fn group(&self, name: &str) -> Option<&ConfigGroup> {
        self.groups.get(name)
    }

    /// Returns the named subgroup, creating it if absent.
    pub fn group_mut(&mut self, name: &str) -> &mut ConfigGroup {
        self.groups.entry(name.to_string()).or_default()
    }

    pub fn delete_group(&mut self, name: &str) -> bool {
        self.groups.remove(name).is_some()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &ConfigGroup)> {
        self.groups.iter()
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.groups.clear();
    }

    /// Build a group from a toml table: scalar values become entries,
    /// nested tables become subgroups.
    pub fn from_table(table: &toml::map::Map<String, toml::Value>) -> Self {
        let mut group = ConfigGroup::new();
        for (key, value) in table {
            match value {
                toml::Value::Table(sub) => {
                    group
                        .groups
                        .insert(key.clone(), ConfigGroup::from_table(sub));
                }
                other => {
                    group.entries.insert(key.clone(), other.clone());
                }
            }
        }
        group
    }

    pub fn to_table(&self) -> toml::map::Map<String, toml::Value> {
        let mut table = toml::map::Map::new();
        for (key, value) in &self.entries {
            table.insert(key.clone(), value.clone());
        }
        for (name, group) in &self.groups {
            table.insert(name.clone(), toml::Value::Table(group.to_table()));
        }
        table
    }
}

/// Persisted state for one containment: its descriptor attributes plus the
/// local `ActionPlugins` group.
#[derive(Debug, Clone, Default)]
pub struct ContainmentEntry {
    pub activity: String,
    pub kind: ContainmentKind,
    pub source: ActionsSource,
    pub actions: ConfigGroup,
}

impl ContainmentEntry {
    pub fn from_containment(containment: &Containment) -> Self {
        Self {
            activity: containment.activity.clone(),
            kind: containment.kind,
            source: containment.source,
            actions: ConfigGroup::new(),
        }
    }

    pub fn descriptor(&self, id: ContainmentId) -> Containment {
        Containment {
            id,
            activity: self.activity.clone(),
            kind: self.kind,
            source: self.source,
        }
    }
}

/// File-backed root of all action-plugin configuration.
///
/// Layout:
///
/// ```toml
/// [global.ActionPlugins."RightButton;NoModifier"]
/// plugin = "contextmenu"
///
/// [activities."work".ActionPlugins."MiddleButton;NoModifier"]
/// plugin = "paste"
///
/// [containments.7]
/// activity = "work"
/// kind = "desktop"
/// source = "local"
///
/// [containments.7.ActionPlugins."wheel:Vertical;NoModifier"]
/// plugin = "switchdesktop"
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    pub global_actions: ConfigGroup,
    pub activity_actions: BTreeMap<String, ConfigGroup>,
    pub containments: BTreeMap<ContainmentId, ContainmentEntry>,
}

impl ShellConfig {
    pub async fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        info!("📄 Reading action config from: {}", expanded_path);

        let content = fs::read_to_string(expanded_path.as_ref())
            .await
            .map_err(|e| ConfigError::Io {
                path: expanded_path.to_string(),
                source: e,
            })?;

        let config = Self::from_str(&content)?;
        debug!(
            "📋 Config loaded: {} containments, {} activities",
            config.containments.len(),
            config.activity_actions.len()
        );
        Ok(config)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(content).map_err(ConfigError::Parse)?;
        let root = match value.as_table() {
            Some(table) => table,
            None => return Ok(Self::default()),
        };

        let mut config = Self::default();

        if let Some(global) = root.get("global").and_then(|v| v.as_table()) {
            if let Some(actions) = global.get(ACTION_PLUGINS_GROUP).and_then(|v| v.as_table()) {
                config.global_actions = ConfigGroup::from_table(actions);
            }
        }

        if let Some(activities) = root.get("activities").and_then(|v| v.as_table()) {
            for (activity, value) in activities {
                let Some(table) = value.as_table() else {
                    continue;
                };
                if let Some(actions) = table.get(ACTION_PLUGINS_GROUP).and_then(|v| v.as_table()) {
                    config
                        .activity_actions
                        .insert(activity.clone(), ConfigGroup::from_table(actions));
                }
            }
        }

        if let Some(containments) = root.get("containments").and_then(|v| v.as_table()) {
            for (key, value) in containments {
                let Ok(id) = key.parse::<ContainmentId>() else {
                    warn!("⚠️  Ignoring containment with non-numeric id '{}'", key);
                    continue;
                };
                let Some(table) = value.as_table() else {
                    continue;
                };

                let mut entry = ContainmentEntry {
                    activity: table
                        .get("activity")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    kind: table
                        .get("kind")
                        .and_then(|v| v.as_str())
                        .and_then(ContainmentKind::parse)
                        .unwrap_or_default(),
                    source: table
                        .get("source")
                        .and_then(|v| v.as_str())
                        .and_then(ActionsSource::parse)
                        .unwrap_or_default(),
                    actions: ConfigGroup::new(),
                };
                if let Some(actions) = table.get(ACTION_PLUGINS_GROUP).and_then(|v| v.as_table()) {
                    entry.actions = ConfigGroup::from_table(actions);
                }
                config.containments.insert(id, entry);
            }
        }

        Ok(config)
    }

    pub fn to_table(&self) -> toml::map::Map<String, toml::Value> {
        let mut root = toml::map::Map::new();

        if !self.global_actions.is_empty() {
            let mut global = toml::map::Map::new();
            global.insert(
                ACTION_PLUGINS_GROUP.to_string(),
                toml::Value::Table(self.global_actions.to_table()),
            );
            root.insert("global".to_string(), toml::Value::Table(global));
        }

        if !self.activity_actions.is_empty() {
            let mut activities = toml::map::Map::new();
            for (activity, actions) in &self.activity_actions {
                let mut table = toml::map::Map::new();
                table.insert(
                    ACTION_PLUGINS_GROUP.to_string(),
                    toml::Value::Table(actions.to_table()),
                );
                activities.insert(activity.clone(), toml::Value::Table(table));
            }
            root.insert("activities".to_string(), toml::Value::Table(activities));
        }

        if !self.containments.is_empty() {
            let mut containments = toml::map::Map::new();
            for (id, entry) in &self.containments {
                let mut table = toml::map::Map::new();
                table.insert(
                    "activity".to_string(),
                    toml::Value::String(entry.activity.clone()),
                );
                table.insert(
                    "kind".to_string(),
                    toml::Value::String(entry.kind.as_str().to_string()),
                );
                table.insert(
                    "source".to_string(),
                    toml::Value::String(entry.source.as_str().to_string()),
                );
                if !entry.actions.is_empty() {
                    table.insert(
                        ACTION_PLUGINS_GROUP.to_string(),
                        toml::Value::Table(entry.actions.to_table()),
                    );
                }
                containments.insert(id.to_string(), toml::Value::Table(table));
            }
            root.insert("containments".to_string(), toml::Value::Table(containments));
        }

        root
    }

    pub async fn save(&self, path: &str) -> Result<()> {
        let expanded_path = shellexpand::tilde(path);
        let content = toml::to_string_pretty(&toml::Value::Table(self.to_table()))?;

        if let Some(parent) = PathBuf::from(expanded_path.as_ref()).parent() {
            fs::create_dir_all(parent).await.ok();
        }
        fs::write(expanded_path.as_ref(), content)
            .await
            .map_err(|e| ConfigError::Io {
                path: expanded_path.to_string(),
                source: e,
            })?;

        info!("💾 Action config written to: {}", expanded_path);
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("shellactions").join("actions.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the containment's persisted entry, creating it from the
    /// descriptor if this is the first time the containment is seen.
    pub fn containment_mut(&mut self, containment: &Containment) -> &mut ContainmentEntry {
        self.containments
            .entry(containment.id)
            .or_insert_with(|| ContainmentEntry::from_containment(containment))
    }

    pub fn activity_actions_mut(&mut self, activity: &str) -> &mut ConfigGroup {
        self.activity_actions
            .entry(activity.to_string())
            .or_default()
    }
}
