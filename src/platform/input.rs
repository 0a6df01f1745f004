//! Input events delivered by the host window

use serde::{Deserialize, Serialize};

/// Direction keys reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// A single discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Absolute pointer position in screen pixels
    MouseMove { x: f32, y: f32 },
    MouseDown(MouseButton),
    MouseUp(MouseButton),
}
