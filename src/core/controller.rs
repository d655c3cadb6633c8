use tracing::{debug, info, warn};

use crate::actions::{ConfigInterface, PluginBox};
use crate::config::ConfigGroup;
use crate::core::containment::Containment;
use crate::core::loader::PluginLoader;
use crate::core::registry::{PluginRegistry, Scope, PLUGIN_KEY};
use crate::event::Signature;

/// One editable row: a signature bound to a plugin instance.
///
/// The instance is private to the controller; edits never touch the live
/// registry until `commit`.
pub struct BindingRow {
    signature: Signature,
    plugin_name: String,
    plugin: PluginBox,
}

impl BindingRow {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn display_name(&self) -> &str {
        self.plugin.display_name()
    }

    pub fn icon(&self) -> &str {
        self.plugin.icon()
    }
}

/// Editable working set of a containment's action bindings.
///
/// Seeded from the persisted `ActionPlugins` group of the containment's
/// authoritative scope; the shell's configuration dialog drives
/// append/update/remove and finally `commit`, which persists the set and
/// swaps it into the live registry in one pass.
pub struct ConfigurationController {
    scope: Scope,
    loader: PluginLoader,
    rows: Vec<BindingRow>,
}

impl ConfigurationController {
    pub fn new(containment: &Containment, loader: &PluginLoader, base: &ConfigGroup) -> Self {
        let scope = Scope::authoritative(containment);
        let mut rows = Vec::new();

        for (signature_key, sub) in base.groups() {
            let plugin_name = sub.get_str_or(PLUGIN_KEY, "").to_string();
            if plugin_name.is_empty() {
                warn!(
                    "⚠️  Binding group '{}' has no plugin entry, skipping",
                    signature_key
                );
                continue;
            }
            let mut plugin = loader.load(&plugin_name);
            plugin.restore(sub);
            rows.push(BindingRow {
                signature: Signature::from_key(signature_key.as_str()),
                plugin_name,
                plugin,
            });
        }

        debug!("🛠️  Editing {} action bindings in {:?}", rows.len(), scope);
        Self {
            scope,
            loader: loader.clone(),
            rows,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &BindingRow> {
        self.rows.iter()
    }

    fn is_duplicate(&self, signature: &Signature, skip: Option<usize>) -> bool {
        self.rows
            .iter()
            .enumerate()
            .any(|(i, row)| Some(i) != skip && row.signature == *signature)
    }

    /// Add a binding at the end of the working set. Returns false (and
    /// mutates nothing) when the signature is already bound here.
    pub fn append(&mut self, signature: Signature, plugin_name: &str) -> bool {
        if self.is_duplicate(&signature, None) {
            debug!("Signature {} already bound, append refused", signature);
            return false;
        }

        let mut plugin = self.loader.load(plugin_name);
        plugin.restore(&ConfigGroup::new());
        self.rows.push(BindingRow {
            signature,
            plugin_name: plugin_name.to_string(),
            plugin,
        });
        true
    }

    /// Replace the signature and/or plugin at `index`. A plugin rename
    /// drops the old instance and starts the new one from its defaults;
    /// settings are never migrated between implementations. Returns false
    /// on an out-of-range index or a signature collision with another row.
    pub fn update(&mut self, index: usize, signature: Signature, plugin_name: &str) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        if self.is_duplicate(&signature, Some(index)) {
            debug!("Signature {} already bound, update refused", signature);
            return false;
        }

        let row = &mut self.rows[index];
        row.signature = signature;
        if row.plugin_name != plugin_name {
            let mut plugin = self.loader.load(plugin_name);
            plugin.restore(&ConfigGroup::new());
            row.plugin = plugin;
            row.plugin_name = plugin_name.to_string();
        }
        true
    }

    /// Remove the row and drop its plugin instance.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// The configuration surface for the row's plugin, or `None` when it is
    /// not configurable. Presentation is the shell's job.
    pub fn show_configuration(&mut self, index: usize) -> Option<ConfigInterface> {
        self.rows
            .get_mut(index)?
            .plugin
            .create_configuration_interface()
    }

    /// Commit edited configuration values into the row's plugin.
    pub fn configuration_accepted(&mut self, index: usize, values: &ConfigGroup) {
        if let Some(row) = self.rows.get_mut(index) {
            row.plugin.configuration_accepted(values);
        }
    }

    /// Persist the working set into `base` and swap it into the live
    /// registry. `base` is cleared first so groups for removed bindings
    /// don't leak forward; the registry scope is rebuilt to match exactly
    /// what was written.
    pub fn commit(&mut self, registry: &mut PluginRegistry, base: &mut ConfigGroup) {
        base.clear();
        registry.clear_scope(&self.scope);

        for row in &self.rows {
            let sub = base.group_mut(row.signature.as_str());
            sub.set(PLUGIN_KEY, row.plugin_name.as_str());
            row.plugin.save(sub);

            let live = registry.bind(self.scope.clone(), row.signature.clone(), &row.plugin_name);
            live.restore(sub);
        }

        info!(
            "💾 Committed {} action bindings for {:?}",
            self.rows.len(),
            self.scope
        );
    }
}
