use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Keyboard modifiers held while a pointer event is delivered.
    ///
    /// The bit order is also the canonical token order, so two modifier
    /// sets built in different call orders always render identically.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT   = 1;
        const CONTROL = 1 << 1;
        const ALT     = 1 << 2;
        const META    = 1 << 3;
    }
}

const MODIFIER_TOKENS: &[(Modifiers, &str)] = &[
    (Modifiers::SHIFT, "ShiftModifier"),
    (Modifiers::CONTROL, "ControlModifier"),
    (Modifiers::ALT, "AltModifier"),
    (Modifiers::META, "MetaModifier"),
];

impl Modifiers {
    /// Canonical token string, e.g. `ControlModifier|ShiftModifier` is never
    /// produced; tokens always come out in Shift, Control, Alt, Meta order.
    /// The empty set renders as `NoModifier`.
    pub fn canonical_tokens(self) -> String {
        if self.is_empty() {
            return "NoModifier".to_string();
        }

        let mut tokens = Vec::new();
        for (flag, token) in MODIFIER_TOKENS {
            if self.contains(*flag) {
                tokens.push(*token);
            }
        }
        tokens.join("|")
    }

    /// Parse a token string produced by `canonical_tokens`. Unknown tokens
    /// are ignored so configs written by newer versions still load.
    pub fn from_tokens(tokens: &str) -> Self {
        let mut modifiers = Modifiers::empty();
        for token in tokens.split('|') {
            for (flag, name) in MODIFIER_TOKENS {
                if token == *name {
                    modifiers |= *flag;
                }
            }
        }
        modifiers
    }
}

/// Physical mouse buttons the shell reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
    Task,
    /// Any additional button, by hardware index.
    Extra(u8),
}

impl MouseButton {
    pub fn token(&self) -> String {
        match self {
            MouseButton::Left => "LeftButton".to_string(),
            MouseButton::Middle => "MiddleButton".to_string(),
            MouseButton::Right => "RightButton".to_string(),
            MouseButton::Back => "BackButton".to_string(),
            MouseButton::Forward => "ForwardButton".to_string(),
            MouseButton::Task => "TaskButton".to_string(),
            MouseButton::Extra(n) => format!("ExtraButton{n}"),
        }
    }
}

/// Scroll axis as reported by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelOrientation {
    Vertical,
    Horizontal,
}

impl WheelOrientation {
    pub fn token(&self) -> &'static str {
        match self {
            WheelOrientation::Vertical => "Vertical",
            WheelOrientation::Horizontal => "Horizontal",
        }
    }
}

/// Scroll direction, derived from the delta sign and the axis.
///
/// The canonical signature key folds the direction back to its axis: a
/// binding covers both directions and the dispatcher uses the sign to pick
/// between `perform_next` and `perform_previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
    Left,
    Right,
}

impl WheelDirection {
    pub fn from_delta(delta: i32, orientation: WheelOrientation) -> Self {
        match orientation {
            WheelOrientation::Vertical => {
                if delta > 0 {
                    WheelDirection::Up
                } else {
                    WheelDirection::Down
                }
            }
            WheelOrientation::Horizontal => {
                if delta > 0 {
                    WheelDirection::Left
                } else {
                    WheelDirection::Right
                }
            }
        }
    }

    pub fn axis(&self) -> WheelOrientation {
        match self {
            WheelDirection::Up | WheelDirection::Down => WheelOrientation::Vertical,
            WheelDirection::Left | WheelDirection::Right => WheelOrientation::Horizontal,
        }
    }

    /// Forward scrolling (down/right) steps to the next item, backward
    /// scrolling (up/left) to the previous one.
    pub fn is_forward(&self) -> bool {
        matches!(self, WheelDirection::Down | WheelDirection::Right)
    }
}

/// A raw pointer event as delivered by the hosting shell.
///
/// The shell owns event delivery; this type only exists to be canonicalized
/// into a [`Signature`] and, for wheel events, to carry the delta sign into
/// the dispatch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Mouse {
        button: MouseButton,
        modifiers: Modifiers,
    },
    Wheel {
        delta: i32,
        orientation: WheelOrientation,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn modifiers(&self) -> Modifiers {
        match self {
            InputEvent::Mouse { modifiers, .. } => *modifiers,
            InputEvent::Wheel { modifiers, .. } => *modifiers,
        }
    }

    pub fn wheel_direction(&self) -> Option<WheelDirection> {
        match self {
            InputEvent::Wheel {
                delta, orientation, ..
            } => Some(WheelDirection::from_delta(*delta, *orientation)),
            InputEvent::Mouse { .. } => None,
        }
    }
}

/// Canonical string key for an input event.
///
/// Format: `<ButtonToken>;<ModifierTokens>` for mouse buttons and
/// `wheel:<Axis>;<ModifierTokens>` for scrolls, e.g. `LeftButton;NoModifier`
/// or `wheel:Vertical;ControlModifier`. Semantically identical events always
/// produce identical keys regardless of how they were constructed, so the
/// signature can be used directly as a lookup and persistence key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

impl Signature {
    /// Canonicalize a raw event. Pure and total; every event has a key.
    pub fn from_event(event: &InputEvent) -> Self {
        match event {
            InputEvent::Mouse { button, modifiers } => {
                Signature(format!("{};{}", button.token(), modifiers.canonical_tokens()))
            }
            InputEvent::Wheel {
                orientation,
                modifiers,
                ..
            } => Signature(format!(
                "wheel:{};{}",
                orientation.token(),
                modifiers.canonical_tokens()
            )),
        }
    }

    pub fn from_mouse(button: MouseButton, modifiers: Modifiers) -> Self {
        Signature::from_event(&InputEvent::Mouse { button, modifiers })
    }

    pub fn from_wheel(orientation: WheelOrientation, modifiers: Modifiers) -> Self {
        Signature::from_event(&InputEvent::Wheel {
            delta: 0,
            orientation,
            modifiers,
        })
    }

    /// Wrap a persisted key as-is. Used when walking configuration groups,
    /// where the group names are signatures written by `from_event`.
    pub fn from_key(key: impl Into<String>) -> Self {
        Signature(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wheel(&self) -> bool {
        self.0.starts_with("wheel:")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
