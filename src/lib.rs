#![allow(dead_code, unused_imports)]

//! Shellactions - a pluggable mouse-action framework for Wayland desktop shells
//!
//! This crate maps pointer events on shell surfaces (desktops, panels) to
//! configurable action plugins: canonicalize the event into a signature,
//! resolve it through per-containment, per-activity and global binding
//! scopes, and hand the hosting shell a trigger action or a populated menu.

pub mod actions;
pub mod config;
pub mod core;
pub mod event;
pub mod runner;

// Re-export commonly used types
pub use config::{ConfigGroup, ShellConfig, ACTION_PLUGINS_GROUP};
pub use core::containment::{ActionsSource, Containment, ContainmentId, ContainmentKind};
pub use core::controller::ConfigurationController;
pub use core::dispatcher::{ActionDispatcher, DispatchMode, DispatchOutcome, IgnoreReason};
pub use core::loader::{PluginFactory, PluginLoader};
pub use core::registry::{PluginRegistry, Scope};

// Re-export the plugin contract for third-party implementations
pub use actions::{Action, ActionPlugin, ConfigField, ConfigFieldKind, ConfigInterface, PluginBox};
pub use event::{
    InputEvent, Modifiers, MouseButton, Signature, WheelDirection, WheelOrientation,
};
pub use runner::{QueryMatches, Runner, RunnerBox, RunnerManager};
