//! The windowing backend seam.
//!
//! Everything the event funnel consumes from the platform layer is behind
//! [`Backend`]: window creation/destruction, the event pump, live key-state
//! queries, and a handful of per-window setters. The crate ships a
//! [`headless::HeadlessBackend`] for tests and CI; a production backend wraps
//! a real windowing event loop and feeds [`RawWindowEvent`]s through
//! [`Backend::pump_events`].

use glam::{UVec2, Vec2};
use thiserror::Error;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode as NativeKey, ModifiersState, PhysicalKey};

use crate::config::WindowConfig;
use crate::input::ScanCode;

pub mod headless;

/// Opaque identifier the backend issues for an open native window.
///
/// Only valid between `create_window` and `destroy_window`; queries on a
/// destroyed handle return inert defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(u64);

impl WindowHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn into_raw(self) -> u64 {
        self.0
    }
}

/// One notification as delivered by the backend's pump.
///
/// Each notification is self-contained: key and button notifications include
/// the modifier state at the time of the event, button notifications include
/// the cursor position. The backend resolves those at delivery time so
/// dispatch never re-enters the platform layer mid-pump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawWindowEvent {
    Key {
        key: PhysicalKey,
        scancode: ScanCode,
        state: ElementState,
        repeat: bool,
        modifiers: ModifiersState,
    },
    Text {
        character: char,
    },
    CursorMoved {
        position: PhysicalPosition<f64>,
    },
    MouseButton {
        button: winit::event::MouseButton,
        state: ElementState,
        modifiers: ModifiersState,
        position: PhysicalPosition<f64>,
    },
    Scroll {
        delta: MouseScrollDelta,
    },
    Focus {
        focused: bool,
    },
}

/// Failures originating inside the platform layer
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("window creation failed: {0}")]
    WindowCreation(String),
}

/// One connected monitor, as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Current video-mode resolution in pixels
    pub resolution: UVec2,
    /// Physical size of the display area in millimetres
    pub physical_size_mm: UVec2,
}

impl MonitorInfo {
    /// Dots per inch, derived from resolution over physical size
    pub fn dpi(&self) -> Vec2 {
        let size_in_inches = self.physical_size_mm.as_vec2() / 25.4;
        self.resolution.as_vec2() / size_in_inches
    }
}

/// The consumed windowing interface.
///
/// Implementations must tolerate queries on handles that were already
/// destroyed and answer `false`/zero: destruction and deregistration are two
/// steps, and a poll may observe the gap.
pub trait Backend: Send {
    /// Open a native window and return its handle. Callers register the
    /// handle before the next pump can run, so implementations must not
    /// deliver notifications from inside this call.
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowHandle, BackendError>;

    /// Destroy the native window. The handle is invalid afterwards.
    fn destroy_window(&mut self, handle: WindowHandle);

    /// Drain pending native notifications, invoking `sink` once per event in
    /// delivery order. Must not block.
    fn pump_events(&mut self, sink: &mut dyn FnMut(WindowHandle, RawWindowEvent));

    /// Whether the backend currently reports `key` held down for `handle`
    fn key_pressed(&self, handle: WindowHandle, key: NativeKey) -> bool;

    /// The platform scan code for a native key, if the current layout has one
    fn scancode_of(&self, key: NativeKey) -> Option<ScanCode>;

    /// Whether the user asked the window to close
    fn close_requested(&self, handle: WindowHandle) -> bool;

    fn set_title(&mut self, handle: WindowHandle, title: &str);

    /// Current framebuffer size in pixels; zero for destroyed handles
    fn window_size(&self, handle: WindowHandle) -> UVec2;

    /// Install a window icon from tightly packed RGBA8 pixels
    fn set_icon(&mut self, handle: WindowHandle, width: u32, height: u32, rgba: Vec<u8>);

    fn set_cursor_visible(&mut self, handle: WindowHandle, visible: bool);

    /// Connected monitors; may be empty on headless systems
    fn monitors(&self) -> Vec<MonitorInfo>;
}
