use tracing::{debug, trace, warn};

use crate::actions::Action;
use crate::core::containment::Containment;
use crate::core::registry::PluginRegistry;
use crate::event::{InputEvent, Signature};

/// What the shell wants from a dispatch: fire the bound plugin's immediate
/// action, or collect entries for a context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Trigger,
    Menu,
}

/// Terminal outcome of one dispatch. The shell executes the action, shows
/// the menu, or surfaces the ignore reason (a "configure me" affordance for
/// `NeedsConfiguration`); nothing here presents UI.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The plugin acted. `action` is `None` for wheel steps, which happen
    /// inside the plugin rather than through a discrete action.
    Triggered { action: Option<Action> },
    MenuPopulated { actions: Vec<Action> },
    Ignored { reason: IgnoreReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No binding resolved for the event's signature.
    NoBinding,
    /// The bound plugin refuses to run until it is configured.
    NeedsConfiguration,
}

/// Converts raw events into plugin behavior. Stateless: every binding
/// lives in the registry, so dispatching never races live reconfiguration.
pub struct ActionDispatcher;

impl ActionDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn dispatch(
        &self,
        registry: &mut PluginRegistry,
        containment: &Containment,
        event: &InputEvent,
        mode: DispatchMode,
    ) -> DispatchOutcome {
        let signature = Signature::from_event(event);
        trace!(
            "📨 Dispatching {} on containment {} ({:?})",
            signature,
            containment.id,
            mode
        );

        let Some(plugin) = registry.resolve_mut(containment, &signature) else {
            debug!("No action bound for {}", signature);
            return DispatchOutcome::Ignored {
                reason: IgnoreReason::NoBinding,
            };
        };

        if plugin.configuration_required() && mode == DispatchMode::Trigger {
            warn!(
                "⚠️  Action plugin '{}' needs configuration before it can run",
                plugin.plugin_name()
            );
            return DispatchOutcome::Ignored {
                reason: IgnoreReason::NeedsConfiguration,
            };
        }

        if mode == DispatchMode::Menu {
            return DispatchOutcome::MenuPopulated {
                actions: plugin.contextual_actions(),
            };
        }

        // Wheel events step through whatever the plugin cycles instead of
        // taking the generic trigger path.
        if let Some(direction) = event.wheel_direction() {
            if direction.is_forward() {
                plugin.perform_next();
            } else {
                plugin.perform_previous();
            }
            debug!("🎡 Stepped '{}' {:?}", plugin.plugin_name(), direction);
            return DispatchOutcome::Triggered { action: None };
        }

        match plugin.triggerable_action() {
            Some(action) => {
                debug!("🎯 Triggering '{}' for {}", action.id, signature);
                DispatchOutcome::Triggered {
                    action: Some(action),
                }
            }
            None => DispatchOutcome::MenuPopulated {
                actions: plugin.contextual_actions(),
            },
        }
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::containment::ContainmentKind;
    use crate::core::loader::PluginLoader;
    use crate::core::registry::Scope;
    use crate::event::{Modifiers, MouseButton, WheelOrientation};

    fn create_test_setup() -> (PluginRegistry, Containment, ActionDispatcher) {
        let registry = PluginRegistry::new(PluginLoader::with_builtins());
        let containment = Containment::new(1, "main", ContainmentKind::Desktop);
        (registry, containment, ActionDispatcher::new())
    }

    fn left_click() -> InputEvent {
        InputEvent::Mouse {
            button: MouseButton::Left,
            modifiers: Modifiers::empty(),
        }
    }

    #[test]
    fn test_unbound_event_is_ignored() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &left_click(),
            DispatchMode::Trigger,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::Ignored {
                reason: IgnoreReason::NoBinding
            }
        );
    }

    #[test]
    fn test_trigger_fires_triggerable_action() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        registry.bind(
            Scope::Global,
            Signature::from_mouse(MouseButton::Left, Modifiers::empty()),
            "paste",
        );

        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &left_click(),
            DispatchMode::Trigger,
        );
        match outcome {
            DispatchOutcome::Triggered { action: Some(action) } => {
                assert_eq!(action.id, "paste:primary");
            }
            other => panic!("expected trigger, got {other:?}"),
        }
    }

    #[test]
    fn test_trigger_without_action_falls_back_to_menu() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        registry.bind(
            Scope::Global,
            Signature::from_mouse(MouseButton::Left, Modifiers::empty()),
            "contextmenu",
        );

        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &left_click(),
            DispatchMode::Trigger,
        );
        match outcome {
            DispatchOutcome::MenuPopulated { actions } => assert!(!actions.is_empty()),
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn test_menu_mode_populates_from_contextual_actions() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        registry.bind(
            Scope::Global,
            Signature::from_mouse(MouseButton::Left, Modifiers::empty()),
            "switchdesktop",
        );

        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &left_click(),
            DispatchMode::Menu,
        );
        match outcome {
            DispatchOutcome::MenuPopulated { actions } => assert_eq!(actions.len(), 4),
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn test_unconfigured_plugin_is_never_triggered() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        registry.bind(
            Scope::Global,
            Signature::from_mouse(MouseButton::Left, Modifiers::empty()),
            "runcommand",
        );

        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &left_click(),
            DispatchMode::Trigger,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::Ignored {
                reason: IgnoreReason::NeedsConfiguration
            }
        );

        // menu mode still works on an unconfigured plugin
        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &left_click(),
            DispatchMode::Menu,
        );
        assert!(matches!(outcome, DispatchOutcome::MenuPopulated { .. }));
    }

    #[test]
    fn test_wheel_routes_to_stepping() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        registry.bind(
            Scope::Global,
            Signature::from_wheel(WheelOrientation::Vertical, Modifiers::empty()),
            "switchdesktop",
        );

        let scroll_down = InputEvent::Wheel {
            delta: -120,
            orientation: WheelOrientation::Vertical,
            modifiers: Modifiers::empty(),
        };
        let outcome = dispatcher.dispatch(
            &mut registry,
            &containment,
            &scroll_down,
            DispatchMode::Trigger,
        );
        assert_eq!(outcome, DispatchOutcome::Triggered { action: None });

        // the plugin stepped from desktop 1 to desktop 2
        let menu = dispatcher.dispatch(
            &mut registry,
            &containment,
            &scroll_down,
            DispatchMode::Menu,
        );
        match menu {
            DispatchOutcome::MenuPopulated { actions } => {
                assert!(actions[0].enabled);
                assert!(!actions[1].enabled);
            }
            other => panic!("expected menu, got {other:?}"),
        }
    }

    #[test]
    fn test_wheel_up_steps_backward() {
        let (mut registry, containment, dispatcher) = create_test_setup();
        registry.bind(
            Scope::Global,
            Signature::from_wheel(WheelOrientation::Vertical, Modifiers::empty()),
            "switchdesktop",
        );

        let scroll_up = InputEvent::Wheel {
            delta: 120,
            orientation: WheelOrientation::Vertical,
            modifiers: Modifiers::empty(),
        };
        dispatcher.dispatch(&mut registry, &containment, &scroll_up, DispatchMode::Trigger);

        let menu = dispatcher.dispatch(&mut registry, &containment, &scroll_up, DispatchMode::Menu);
        match menu {
            DispatchOutcome::MenuPopulated { actions } => {
                // wrapped backward from desktop 1 to the last desktop
                assert!(!actions[3].enabled);
            }
            other => panic!("expected menu, got {other:?}"),
        }
    }
}
