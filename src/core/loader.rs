use std::collections::HashMap;
use tracing::{debug, warn};

use crate::actions::contextmenu::ContextMenuPlugin;
use crate::actions::paste::PastePlugin;
use crate::actions::runcommand::RunCommandPlugin;
use crate::actions::switchdesktop::SwitchDesktopPlugin;
use crate::actions::{InertAction, PluginBox};

pub type PluginFactory = fn() -> PluginBox;

/// Maps plugin names to factory functions.
///
/// Populated with the built-in set at process start; hosts register
/// additional factories before any containment loads its bindings. An
/// unknown name never fails a load; it yields an [`InertAction`]
/// placeholder so a binding written by a setup with more plugins installed
/// survives untouched.
#[derive(Clone, Default)]
pub struct PluginLoader {
    factories: HashMap<String, PluginFactory>,
}

impl PluginLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut loader = Self::new();
        loader.register("contextmenu", || Box::new(ContextMenuPlugin::new()));
        loader.register("switchdesktop", || Box::new(SwitchDesktopPlugin::new()));
        loader.register("paste", || Box::new(PastePlugin::new()));
        loader.register("runcommand", || Box::new(RunCommandPlugin::new()));
        loader
    }

    /// Register a factory. Re-registering a name replaces the previous
    /// factory.
    pub fn register(&mut self, name: &str, factory: PluginFactory) {
        if self.factories.insert(name.to_string(), factory).is_some() {
            debug!("Replacing action plugin factory '{}'", name);
        }
    }

    pub fn load(&self, name: &str) -> PluginBox {
        match self.factories.get(name) {
            Some(factory) => {
                debug!("📦 Loading action plugin: {}", name);
                factory()
            }
            None => {
                warn!("⚠️  Unknown action plugin '{}', substituting inert placeholder", name);
                Box::new(InertAction::new(name))
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered plugin names, sorted for stable presentation.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}
