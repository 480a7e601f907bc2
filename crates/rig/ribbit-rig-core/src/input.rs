//! Input contracts for the rig.
//!
//! Hosts forward discrete key press/release notifications; the key map turns
//! host key codes into logical controls and [`InputState`] keeps one held flag
//! per control. The blend engine only reads the flags.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveForward,
    MoveBack,
    TurnLeft,
    TurnRight,
    StrafeLeft,
    StrafeRight,
    RotateModifier,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::MoveForward,
        Control::MoveBack,
        Control::TurnLeft,
        Control::TurnRight,
        Control::StrafeLeft,
        Control::StrafeRight,
        Control::RotateModifier,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// A press or release of a host key, identified by its code
/// (DOM `KeyboardEvent.code`, e.g. "KeyW").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum KeyEvent {
    Down { code: String },
    Up { code: String },
}

impl KeyEvent {
    pub fn down(code: impl Into<String>) -> Self {
        KeyEvent::Down { code: code.into() }
    }

    pub fn up(code: impl Into<String>) -> Self {
        KeyEvent::Up { code: code.into() }
    }

    pub fn code(&self) -> &str {
        match self {
            KeyEvent::Down { code } | KeyEvent::Up { code } => code,
        }
    }
}

/// Host key code -> control.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyMap {
    pub bindings: HashMap<String, Control>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let pairs = [
            ("KeyW", Control::MoveForward),
            ("ArrowUp", Control::MoveForward),
            ("KeyS", Control::MoveBack),
            ("ArrowDown", Control::MoveBack),
            ("KeyA", Control::TurnLeft),
            ("ArrowLeft", Control::TurnLeft),
            ("KeyD", Control::TurnRight),
            ("ArrowRight", Control::TurnRight),
            ("KeyQ", Control::StrafeLeft),
            ("KeyE", Control::StrafeRight),
            ("ShiftLeft", Control::RotateModifier),
            ("ShiftRight", Control::RotateModifier),
        ];
        let mut map = Self {
            bindings: HashMap::with_capacity(pairs.len()),
        };
        for (code, control) in pairs {
            map.bind(code, control);
        }
        map
    }
}

impl KeyMap {
    #[inline]
    pub fn control(&self, code: &str) -> Option<Control> {
        self.bindings.get(code).copied()
    }

    pub fn bind(&mut self, code: impl Into<String>, control: Control) {
        self.bindings.insert(code.into(), control);
    }
}

/// Held flag per control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 7],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn press(&mut self, control: Control) {
        self.held[control.slot()] = true;
    }

    #[inline]
    pub fn release(&mut self, control: Control) {
        self.held[control.slot()] = false;
    }

    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.slot()]
    }

    /// Apply a key event through `map`. Returns false for unmapped keys.
    pub fn apply(&mut self, event: &KeyEvent, map: &KeyMap) -> bool {
        let Some(control) = map.control(event.code()) else {
            return false;
        };
        match event {
            KeyEvent::Down { .. } => self.press(control),
            KeyEvent::Up { .. } => self.release(control),
        }
        true
    }

    pub fn clear(&mut self) {
        self.held = [false; 7];
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|h| *h)
    }

    /// `+1` if only `positive` is held, `-1` if only `negative`, else `0`.
    #[inline]
    pub fn axis(&self, positive: Control, negative: Control) -> f32 {
        let p = if self.is_held(positive) { 1.0 } else { 0.0 };
        let n = if self.is_held(negative) { 1.0 } else { 0.0 };
        p - n
    }
}
