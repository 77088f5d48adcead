//! In-process scriptable backend.
//!
//! Stands in for a real windowing library: tests (and integrators' CI) feed
//! raw notifications and live key state through a [`HeadlessDriver`], then
//! drive the funnel exactly as they would against a platform backend.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use glam::UVec2;
use winit::event::ElementState;
use winit::keyboard::{KeyCode as NativeKey, ModifiersState, PhysicalKey};

use super::{Backend, BackendError, MonitorInfo, RawWindowEvent, WindowHandle};
use crate::config::WindowConfig;
use crate::input::{KEY_TABLE, ScanCode};

#[derive(Debug, Default)]
struct HeadlessWindow {
    title: String,
    size: UVec2,
    close_requested: bool,
    cursor_visible: bool,
    pressed: HashSet<NativeKey>,
    icon_size: Option<(u32, u32)>,
}

#[derive(Debug, Default)]
struct HeadlessShared {
    next_handle: u64,
    windows: HashMap<WindowHandle, HeadlessWindow>,
    pending: VecDeque<(WindowHandle, RawWindowEvent)>,
}

/// Backend half: hand this to [`WindowSystem::new`](crate::WindowSystem::new)
pub struct HeadlessBackend {
    shared: Arc<Mutex<HeadlessShared>>,
}

/// Script half: injects notifications and inspects native-side state
#[derive(Clone)]
pub struct HeadlessDriver {
    shared: Arc<Mutex<HeadlessShared>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(HeadlessShared::default())),
        }
    }

    /// The driver stays valid after the backend moves into a `WindowSystem`
    pub fn driver(&self) -> HeadlessDriver {
        HeadlessDriver {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthetic scan codes: position in the key table, offset so that zero
/// never appears as a valid code.
fn synthetic_scancode(key: NativeKey) -> Option<ScanCode> {
    KEY_TABLE
        .iter()
        .position(|(native, _)| *native == key)
        .map(|index| index as ScanCode + 1)
}

impl Backend for HeadlessBackend {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowHandle, BackendError> {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        shared.next_handle += 1;
        let handle = WindowHandle::from_raw(shared.next_handle);
        shared.windows.insert(
            handle,
            HeadlessWindow {
                title: config.title.clone(),
                size: UVec2::new(config.width, config.height),
                close_requested: false,
                cursor_visible: true,
                pressed: HashSet::new(),
                icon_size: None,
            },
        );
        Ok(handle)
    }

    fn destroy_window(&mut self, handle: WindowHandle) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        shared.windows.remove(&handle);
        // A destroyed window's undelivered notifications die with it
        shared.pending.retain(|(owner, _)| *owner != handle);
    }

    fn pump_events(&mut self, sink: &mut dyn FnMut(WindowHandle, RawWindowEvent)) {
        let pending = {
            let mut shared = self.shared.lock().expect("headless state lock poisoned");
            std::mem::take(&mut shared.pending)
        };
        for (handle, event) in pending {
            sink(handle, event);
        }
    }

    fn key_pressed(&self, handle: WindowHandle, key: NativeKey) -> bool {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared
            .windows
            .get(&handle)
            .is_some_and(|window| window.pressed.contains(&key))
    }

    fn scancode_of(&self, key: NativeKey) -> Option<ScanCode> {
        synthetic_scancode(key)
    }

    fn close_requested(&self, handle: WindowHandle) -> bool {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared
            .windows
            .get(&handle)
            .is_some_and(|window| window.close_requested)
    }

    fn set_title(&mut self, handle: WindowHandle, title: &str) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            window.title = title.to_string();
        }
    }

    fn window_size(&self, handle: WindowHandle) -> UVec2 {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared
            .windows
            .get(&handle)
            .map(|window| window.size)
            .unwrap_or(UVec2::ZERO)
    }

    fn set_icon(&mut self, handle: WindowHandle, width: u32, height: u32, _rgba: Vec<u8>) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            window.icon_size = Some((width, height));
        }
    }

    fn set_cursor_visible(&mut self, handle: WindowHandle, visible: bool) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            window.cursor_visible = visible;
        }
    }

    fn monitors(&self) -> Vec<MonitorInfo> {
        vec![MonitorInfo {
            resolution: UVec2::new(1920, 1080),
            physical_size_mm: UVec2::new(527, 296),
        }]
    }
}

impl HeadlessDriver {
    /// Queue a raw notification for the next pump
    pub fn send(&self, handle: WindowHandle, event: RawWindowEvent) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        shared.pending.push_back((handle, event));
    }

    /// Press a key: marks it live-pressed and queues the discrete notification
    pub fn press_key(&self, handle: WindowHandle, key: NativeKey, modifiers: ModifiersState) {
        let scancode = synthetic_scancode(key).unwrap_or(0);
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            window.pressed.insert(key);
        }
        shared.pending.push_back((
            handle,
            RawWindowEvent::Key {
                key: PhysicalKey::Code(key),
                scancode,
                state: ElementState::Pressed,
                repeat: false,
                modifiers,
            },
        ));
    }

    /// Release a key: clears the live state and queues the notification
    pub fn release_key(&self, handle: WindowHandle, key: NativeKey, modifiers: ModifiersState) {
        let scancode = synthetic_scancode(key).unwrap_or(0);
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            window.pressed.remove(&key);
        }
        shared.pending.push_back((
            handle,
            RawWindowEvent::Key {
                key: PhysicalKey::Code(key),
                scancode,
                state: ElementState::Released,
                repeat: false,
                modifiers,
            },
        ));
    }

    /// Flip live key state without a discrete notification
    pub fn set_key_pressed(&self, handle: WindowHandle, key: NativeKey, pressed: bool) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            if pressed {
                window.pressed.insert(key);
            } else {
                window.pressed.remove(&key);
            }
        }
    }

    /// Queue a cursor move notification
    pub fn move_cursor(&self, handle: WindowHandle, x: f64, y: f64) {
        self.send(
            handle,
            RawWindowEvent::CursorMoved {
                position: winit::dpi::PhysicalPosition::new(x, y),
            },
        );
    }

    /// Simulate the user hitting the close button
    pub fn request_close(&self, handle: WindowHandle) {
        let mut shared = self.shared.lock().expect("headless state lock poisoned");
        if let Some(window) = shared.windows.get_mut(&handle) {
            window.close_requested = true;
        }
    }

    /// Whether the native window still exists
    pub fn is_open(&self, handle: WindowHandle) -> bool {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared.windows.contains_key(&handle)
    }

    /// Native-side title, for asserting that setters reached the backend
    pub fn title(&self, handle: WindowHandle) -> Option<String> {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared.windows.get(&handle).map(|window| window.title.clone())
    }

    /// Dimensions of the installed icon, if any
    pub fn icon_size(&self, handle: WindowHandle) -> Option<(u32, u32)> {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared.windows.get(&handle).and_then(|window| window.icon_size)
    }

    /// Native-side cursor visibility flag
    pub fn cursor_visible(&self, handle: WindowHandle) -> bool {
        let shared = self.shared.lock().expect("headless state lock poisoned");
        shared
            .windows
            .get(&handle)
            .is_none_or(|window| window.cursor_visible)
    }
}
