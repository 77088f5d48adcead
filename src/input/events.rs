//! Normalized window events

use glam::Vec2;

use super::keys::{KeyAction, KeyCode, Modifiers, MouseButton, ScanCode};

/// One normalized input event, as drained from a window's queue.
///
/// Every payload is a self-contained value; events never borrow window or
/// registry state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Key press/release/repeat from the backend, or a synthesized hold
    Key {
        code: KeyCode,
        scancode: ScanCode,
        modifiers: Modifiers,
        action: KeyAction,
    },

    /// Translated character input
    Text { character: char },

    /// Cursor moved; `delta` is relative to the previous reported position,
    /// zero for the first move a window sees
    MouseMove { position: Vec2, delta: Vec2 },

    /// Mouse button press/release at an absolute cursor position
    MouseButton {
        button: MouseButton,
        modifiers: Modifiers,
        action: KeyAction,
        position: Vec2,
    },

    /// Scroll wheel delta in pixels
    MouseScroll { delta: Vec2 },

    /// Window gained or lost keyboard focus
    Focus { focused: bool },
}
