//! Portable key/button codes and translation from native winit codes

use std::collections::HashMap;
use std::sync::LazyLock;

use bitflags::bitflags;
use winit::keyboard::KeyCode as NativeKey;
use winit::keyboard::{ModifiersState, PhysicalKey};

/// Native scan code, passed through untranslated (layout-dependent)
pub type ScanCode = u32;

/// What happened to a key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down this pump
    Press,
    /// Key came up this pump
    Release,
    /// OS-generated key repeat while held
    Repeat,
    /// Synthesized once per poll while the key stays down
    Hold,
}

/// Portable key code, independent of the backend's numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Native code with no table entry
    Unknown,

    Space,
    Escape,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Modifier keys (left and right variants are distinct codes)
    LCtrl,
    RCtrl,
    LShift,
    RShift,
    LAlt,
    RAlt,
    LMeta,
    RMeta,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Punctuation
    Comma,
    Period,
    Semicolon,
    Quote,
    Slash,
    Backslash,
    LBracket,
    RBracket,
    Minus,
    Equals,

    // Editing
    Backspace,
    Enter,
    Tab,
    CapsLock,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

bitflags! {
    /// Keyboard modifier bitmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut out = Modifiers::empty();
        if state.control_key() {
            out |= Modifiers::CTRL;
        }
        if state.shift_key() {
            out |= Modifiers::SHIFT;
        }
        if state.alt_key() {
            out |= Modifiers::ALT;
        }
        if state.super_key() {
            out |= Modifiers::META;
        }
        out
    }
}

/// The static native→portable key table.
///
/// Also drives hold synthesis, which walks the native column and asks the
/// backend which of these keys are currently down.
pub(crate) const KEY_TABLE: &[(NativeKey, KeyCode)] = &[
    (NativeKey::Space, KeyCode::Space),
    (NativeKey::Escape, KeyCode::Escape),
    (NativeKey::KeyA, KeyCode::A),
    (NativeKey::KeyB, KeyCode::B),
    (NativeKey::KeyC, KeyCode::C),
    (NativeKey::KeyD, KeyCode::D),
    (NativeKey::KeyE, KeyCode::E),
    (NativeKey::KeyF, KeyCode::F),
    (NativeKey::KeyG, KeyCode::G),
    (NativeKey::KeyH, KeyCode::H),
    (NativeKey::KeyI, KeyCode::I),
    (NativeKey::KeyJ, KeyCode::J),
    (NativeKey::KeyK, KeyCode::K),
    (NativeKey::KeyL, KeyCode::L),
    (NativeKey::KeyM, KeyCode::M),
    (NativeKey::KeyN, KeyCode::N),
    (NativeKey::KeyO, KeyCode::O),
    (NativeKey::KeyP, KeyCode::P),
    (NativeKey::KeyQ, KeyCode::Q),
    (NativeKey::KeyR, KeyCode::R),
    (NativeKey::KeyS, KeyCode::S),
    (NativeKey::KeyT, KeyCode::T),
    (NativeKey::KeyU, KeyCode::U),
    (NativeKey::KeyV, KeyCode::V),
    (NativeKey::KeyW, KeyCode::W),
    (NativeKey::KeyX, KeyCode::X),
    (NativeKey::KeyY, KeyCode::Y),
    (NativeKey::KeyZ, KeyCode::Z),
    (NativeKey::Digit0, KeyCode::Num0),
    (NativeKey::Digit1, KeyCode::Num1),
    (NativeKey::Digit2, KeyCode::Num2),
    (NativeKey::Digit3, KeyCode::Num3),
    (NativeKey::Digit4, KeyCode::Num4),
    (NativeKey::Digit5, KeyCode::Num5),
    (NativeKey::Digit6, KeyCode::Num6),
    (NativeKey::Digit7, KeyCode::Num7),
    (NativeKey::Digit8, KeyCode::Num8),
    (NativeKey::Digit9, KeyCode::Num9),
    (NativeKey::ControlLeft, KeyCode::LCtrl),
    (NativeKey::ControlRight, KeyCode::RCtrl),
    (NativeKey::ShiftLeft, KeyCode::LShift),
    (NativeKey::ShiftRight, KeyCode::RShift),
    (NativeKey::AltLeft, KeyCode::LAlt),
    (NativeKey::AltRight, KeyCode::RAlt),
    (NativeKey::SuperLeft, KeyCode::LMeta),
    (NativeKey::SuperRight, KeyCode::RMeta),
    (NativeKey::ArrowLeft, KeyCode::Left),
    (NativeKey::ArrowRight, KeyCode::Right),
    (NativeKey::ArrowUp, KeyCode::Up),
    (NativeKey::ArrowDown, KeyCode::Down),
    (NativeKey::Comma, KeyCode::Comma),
    (NativeKey::Period, KeyCode::Period),
    (NativeKey::Semicolon, KeyCode::Semicolon),
    (NativeKey::Quote, KeyCode::Quote),
    (NativeKey::Slash, KeyCode::Slash),
    (NativeKey::Backslash, KeyCode::Backslash),
    (NativeKey::BracketLeft, KeyCode::LBracket),
    (NativeKey::BracketRight, KeyCode::RBracket),
    (NativeKey::Minus, KeyCode::Minus),
    (NativeKey::Equal, KeyCode::Equals),
    (NativeKey::Backspace, KeyCode::Backspace),
    (NativeKey::Enter, KeyCode::Enter),
    (NativeKey::Tab, KeyCode::Tab),
    (NativeKey::CapsLock, KeyCode::CapsLock),
    (NativeKey::F1, KeyCode::F1),
    (NativeKey::F2, KeyCode::F2),
    (NativeKey::F3, KeyCode::F3),
    (NativeKey::F4, KeyCode::F4),
    (NativeKey::F5, KeyCode::F5),
    (NativeKey::F6, KeyCode::F6),
    (NativeKey::F7, KeyCode::F7),
    (NativeKey::F8, KeyCode::F8),
    (NativeKey::F9, KeyCode::F9),
    (NativeKey::F10, KeyCode::F10),
    (NativeKey::F11, KeyCode::F11),
    (NativeKey::F12, KeyCode::F12),
    (NativeKey::F13, KeyCode::F13),
    (NativeKey::F14, KeyCode::F14),
    (NativeKey::F15, KeyCode::F15),
    (NativeKey::F16, KeyCode::F16),
    (NativeKey::F17, KeyCode::F17),
    (NativeKey::F18, KeyCode::F18),
    (NativeKey::F19, KeyCode::F19),
    (NativeKey::F20, KeyCode::F20),
];

static KEY_LOOKUP: LazyLock<HashMap<NativeKey, KeyCode>> =
    LazyLock::new(|| KEY_TABLE.iter().copied().collect());

/// Translate a native physical key to its portable code.
///
/// Returns `None` for unidentified keys and for native codes the table does
/// not cover; callers substitute [`KeyCode::Unknown`] where an event must
/// still be delivered.
pub fn translate_key(key: PhysicalKey) -> Option<KeyCode> {
    match key {
        PhysicalKey::Code(code) => KEY_LOOKUP.get(&code).copied(),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Translate a native mouse button to its portable identifier.
///
/// Back/forward/extra buttons have no portable equivalent and yield `None`.
pub fn translate_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}
