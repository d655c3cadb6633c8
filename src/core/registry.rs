use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::actions::{ActionPlugin, PluginBox};
use crate::config::ConfigGroup;
use crate::core::containment::{ActionsSource, Containment, ContainmentId, ContainmentKind};
use crate::core::loader::PluginLoader;
use crate::event::Signature;

/// Entry name that records which implementation a binding group belongs to.
pub const PLUGIN_KEY: &str = "plugin";

/// The level at which a binding is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Activity(String),
    Local(ContainmentId),
}

impl Scope {
    /// The scope a containment's bindings are edited and persisted in,
    /// per its `source` selection.
    pub fn authoritative(containment: &Containment) -> Scope {
        match containment.source {
            ActionsSource::Global => Scope::Global,
            ActionsSource::Activity => Scope::Activity(containment.activity.clone()),
            ActionsSource::Local => Scope::Local(containment.id),
        }
    }
}

type BindingMap = HashMap<Signature, PluginBox>;

/// Owns every event-to-plugin binding, per scope.
///
/// Global bindings are process-wide and shared by all containments that
/// select the global source; activity and local maps are created on first
/// bind. All mutation happens on the shell's event thread, and containments
/// never hold plugin references across dispatches, so replacing or removing
/// a binding is immediately and consistently visible to the next resolve.
pub struct PluginRegistry {
    loader: PluginLoader,
    global: BindingMap,
    activities: HashMap<String, BindingMap>,
    locals: HashMap<ContainmentId, BindingMap>,
}

impl PluginRegistry {
    pub fn new(loader: PluginLoader) -> Self {
        Self {
            loader,
            global: BindingMap::new(),
            activities: HashMap::new(),
            locals: HashMap::new(),
        }
    }

    pub fn loader(&self) -> &PluginLoader {
        &self.loader
    }

    fn scope_map(&self, scope: &Scope) -> Option<&BindingMap> {
        match scope {
            Scope::Global => Some(&self.global),
            Scope::Activity(activity) => self.activities.get(activity),
            Scope::Local(id) => self.locals.get(id),
        }
    }

    fn scope_map_mut(&mut self, scope: &Scope) -> &mut BindingMap {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Activity(activity) => self.activities.entry(activity.clone()).or_default(),
            Scope::Local(id) => self.locals.entry(*id).or_default(),
        }
    }

    /// Instantiate `plugin_name` and bind it to `signature` in `scope`,
    /// replacing (and dropping) any previous instance. The new plugin is
    /// fully constructed before it becomes visible to lookups. There is no
    /// implicit save of the outgoing instance.
    pub fn bind(
        &mut self,
        scope: Scope,
        signature: Signature,
        plugin_name: &str,
    ) -> &mut dyn ActionPlugin {
        let plugin = self.loader.load(plugin_name);
        debug!("🔗 Binding {} -> '{}' in {:?}", signature, plugin_name, scope);

        let map = self.scope_map_mut(&scope);
        let slot = match map.entry(signature) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(plugin);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(plugin),
        };
        slot.as_mut()
    }

    /// Remove and drop the binding. Returns false when nothing was bound.
    pub fn unbind(&mut self, scope: &Scope, signature: &Signature) -> bool {
        let removed = match scope {
            Scope::Global => self.global.remove(signature).is_some(),
            Scope::Activity(activity) => self
                .activities
                .get_mut(activity)
                .is_some_and(|map| map.remove(signature).is_some()),
            Scope::Local(id) => self
                .locals
                .get_mut(id)
                .is_some_and(|map| map.remove(signature).is_some()),
        };
        if removed {
            debug!("✂️  Unbound {} in {:?}", signature, scope);
        }
        removed
    }

    /// Drop every binding in a scope. Used when a containment or activity
    /// is torn down, and by the configuration controller before rewriting
    /// a scope's bindings.
    pub fn clear_scope(&mut self, scope: &Scope) {
        match scope {
            Scope::Global => self.global.clear(),
            Scope::Activity(activity) => {
                self.activities.remove(activity);
            }
            Scope::Local(id) => {
                self.locals.remove(id);
            }
        }
    }

    pub fn binding(&self, scope: &Scope, signature: &Signature) -> Option<&dyn ActionPlugin> {
        self.scope_map(scope)
            .and_then(|map| map.get(signature))
            .map(|plugin| plugin.as_ref())
    }

    /// Bindings in a scope, sorted by signature for stable presentation.
    pub fn bindings(&self, scope: &Scope) -> Vec<(&Signature, &dyn ActionPlugin)> {
        let mut bindings: Vec<_> = self
            .scope_map(scope)
            .map(|map| {
                map.iter()
                    .map(|(sig, plugin)| (sig, plugin.as_ref()))
                    .collect()
            })
            .unwrap_or_default();
        bindings.sort_by_key(|(sig, _)| *sig);
        bindings
    }

    fn resolution_order(containment: &Containment) -> Vec<Scope> {
        match containment.source {
            ActionsSource::Local => vec![
                Scope::Local(containment.id),
                Scope::Activity(containment.activity.clone()),
                Scope::Global,
            ],
            ActionsSource::Activity => vec![
                Scope::Activity(containment.activity.clone()),
                Scope::Global,
            ],
            ActionsSource::Global => vec![Scope::Global],
        }
    }

    /// The scope whose binding answers `signature` for this containment,
    /// walking from the containment's source scope down to Global.
    pub fn resolve_scope(
        &self,
        containment: &Containment,
        signature: &Signature,
    ) -> Option<Scope> {
        Self::resolution_order(containment)
            .into_iter()
            .find(|scope| {
                self.scope_map(scope)
                    .is_some_and(|map| map.contains_key(signature))
            })
    }

    pub fn resolve(
        &self,
        containment: &Containment,
        signature: &Signature,
    ) -> Option<&dyn ActionPlugin> {
        let scope = self.resolve_scope(containment, signature)?;
        self.binding(&scope, signature)
    }

    pub fn resolve_mut(
        &mut self,
        containment: &Containment,
        signature: &Signature,
    ) -> Option<&mut (dyn ActionPlugin + 'static)> {
        let scope = self.resolve_scope(containment, signature)?;
        self.scope_map_mut(&scope)
            .get_mut(signature)
            .map(|plugin| plugin.as_mut())
    }

    /// Bind and restore every persisted group in `scope`. One subgroup per
    /// signature; the `plugin` entry names the implementation.
    pub fn load_from_config(&mut self, scope: Scope, group: &ConfigGroup) {
        for (signature_key, sub) in group.groups() {
            let plugin_name = sub.get_str_or(PLUGIN_KEY, "").to_string();
            if plugin_name.is_empty() {
                warn!(
                    "⚠️  Binding group '{}' has no plugin entry, skipping",
                    signature_key
                );
                continue;
            }
            let signature = Signature::from_key(signature_key.as_str());
            let plugin = self.bind(scope.clone(), signature, &plugin_name);
            plugin.restore(sub);
        }
        info!(
            "🔌 Loaded {} action bindings for {:?}",
            group.groups().count(),
            scope
        );
    }

    /// Rewrite `group` from the live bindings in `scope`. The group is
    /// cleared first so bindings removed since the last save don't leak
    /// forward.
    pub fn save_to_config(&self, scope: &Scope, group: &mut ConfigGroup) {
        group.clear();
        let Some(map) = self.scope_map(scope) else {
            return;
        };
        for (signature, plugin) in map {
            let sub = group.group_mut(signature.as_str());
            sub.set(PLUGIN_KEY, plugin.plugin_name());
            plugin.save(sub);
        }
    }

    /// Stock bindings for a containment whose local scope has nothing
    /// configured yet. Desktops get the full set, panels only the menu.
    /// Already-bound signatures are left alone.
    pub fn apply_default_bindings(&mut self, containment: &Containment) {
        let defaults: &[(&str, &str)] = match containment.kind {
            ContainmentKind::Desktop => &[
                ("RightButton;NoModifier", "contextmenu"),
                ("MiddleButton;NoModifier", "paste"),
                ("wheel:Vertical;NoModifier", "switchdesktop"),
            ],
            ContainmentKind::Panel => &[("RightButton;NoModifier", "contextmenu")],
        };

        let scope = Scope::Local(containment.id);
        for (key, plugin_name) in defaults {
            let signature = Signature::from_key(*key);
            if self
                .scope_map(&scope)
                .is_some_and(|map| map.contains_key(&signature))
            {
                continue;
            }
            let plugin = self.bind(scope.clone(), signature, plugin_name);
            plugin.restore(&ConfigGroup::new());
        }
        info!(
            "🧩 Applied default action bindings for {} containment {}",
            containment.kind.as_str(),
            containment.id
        );
    }

    /// Load every scope recorded in a [`ShellConfig`](crate::config::ShellConfig).
    pub fn load_all(&mut self, config: &crate::config::ShellConfig) {
        self.load_from_config(Scope::Global, &config.global_actions);
        for (activity, group) in &config.activity_actions {
            self.load_from_config(Scope::Activity(activity.clone()), group);
        }
        for (id, entry) in &config.containments {
            self.load_from_config(Scope::Local(*id), &entry.actions);
        }
    }

    /// Write every known scope back into `config`. Local bindings for a
    /// containment `config` has no entry for are skipped; register the
    /// containment (`ShellConfig::containment_mut`) before saving.
    pub fn save_all(&self, config: &mut crate::config::ShellConfig) {
        self.save_to_config(&Scope::Global, &mut config.global_actions);
        for (activity, map) in &self.activities {
            if map.is_empty() {
                continue;
            }
            let group = config.activity_actions_mut(activity);
            self.save_to_config(&Scope::Activity(activity.clone()), group);
        }
        for (id, map) in &self.locals {
            if map.is_empty() {
                continue;
            }
            if let Some(entry) = config.containments.get_mut(id) {
                self.save_to_config(&Scope::Local(*id), &mut entry.actions);
            }
        }
    }
}
