//! The per-frame driver: owns the backend, pumps it, synthesizes holds

use std::sync::{Arc, Mutex};

use glam::UVec2;
use tracing::{debug, info, warn};
use winit::keyboard::KeyCode as NativeKey;

use crate::backend::{Backend, MonitorInfo, WindowHandle};
use crate::config::WindowConfig;
use crate::input::{Event, KEY_TABLE, KeyAction, Modifiers};

use super::dispatch::dispatch;
use super::registry::Registry;
use super::window::{Window, WindowError, WindowState};

/// Backend and registry, shared by the system and every live window.
///
/// Lock order is backend → registry → window state; the registry lock is
/// never held across a backend call. The `Arc` clone count doubles as the
/// backend's lifetime refcount: the last window (or the system itself)
/// dropping tears the backend down.
pub(crate) struct Shared {
    pub backend: Mutex<Box<dyn Backend>>,
    pub registry: Registry,
}

/// Owns the windowing backend and drives input for every registered window.
pub struct WindowSystem {
    shared: Arc<Shared>,
}

impl WindowSystem {
    pub fn new(backend: impl Backend + 'static) -> Self {
        debug!("window system initialized");
        Self {
            shared: Arc::new(Shared {
                backend: Mutex::new(Box::new(backend)),
                registry: Registry::new(),
            }),
        }
    }

    /// Open a window with the given title and pixel size.
    ///
    /// Fails with [`WindowError::InvalidSize`] when either dimension is zero.
    pub fn create_window(
        &self,
        title: impl Into<String>,
        size: UVec2,
    ) -> Result<Window, WindowError> {
        let config = WindowConfig {
            title: title.into(),
            width: size.x,
            height: size.y,
            ..WindowConfig::default()
        };
        self.create_window_with_config(&config)
    }

    /// Open a window described by a full [`WindowConfig`]
    pub fn create_window_with_config(&self, config: &WindowConfig) -> Result<Window, WindowError> {
        if config.width == 0 || config.height == 0 {
            return Err(WindowError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        // Register under the backend lock: no pump can run between the
        // native window appearing and its registry entry existing.
        let mut backend = self.shared.backend.lock().expect("backend lock poisoned");
        let handle = backend.create_window(config).inspect_err(|error| {
            warn!(%error, title = %config.title, "backend failed to create window");
        })?;
        let state = Arc::new(Mutex::new(WindowState::new(config.title.clone())));
        self.shared.registry.register(handle, Arc::clone(&state));
        drop(backend);

        info!(
            handle = handle.into_raw(),
            title = %config.title,
            width = config.width,
            height = config.height,
            "window created"
        );
        Ok(Window::new(handle, state, Arc::clone(&self.shared)))
    }

    /// Advance input for every registered window by one frame.
    ///
    /// Pumps the backend once (dispatching any pending notifications), then
    /// appends one `Hold` key event per currently pressed table key to each
    /// window, carrying the modifier bitmask read live at this poll.
    pub fn poll_input(&self) {
        let mut backend = self.shared.backend.lock().expect("backend lock poisoned");
        backend.pump_events(&mut |handle, raw| dispatch(&self.shared.registry, handle, raw));

        for (handle, window) in self.shared.registry.snapshot() {
            let modifiers = live_modifiers(backend.as_ref(), handle);

            let mut held = Vec::new();
            for (native, code) in KEY_TABLE {
                let Some(scancode) = backend.scancode_of(*native) else {
                    continue;
                };
                if backend.key_pressed(handle, *native) {
                    held.push(Event::Key {
                        code: *code,
                        scancode,
                        modifiers,
                        action: KeyAction::Hold,
                    });
                }
            }

            if !held.is_empty() {
                let mut state = window.lock().expect("window state lock poisoned");
                for event in held {
                    state.push_event(event);
                }
            }
        }
    }

    /// Monitors currently connected, as reported by the backend
    pub fn monitors(&self) -> Vec<MonitorInfo> {
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .monitors()
    }
}

/// Modifier bitmask at this instant, from live key state rather than the
/// event stream. Both left and right variants count for every flag.
fn live_modifiers(backend: &dyn Backend, handle: WindowHandle) -> Modifiers {
    const FLAGS: [(Modifiers, NativeKey, NativeKey); 4] = [
        (Modifiers::CTRL, NativeKey::ControlLeft, NativeKey::ControlRight),
        (Modifiers::SHIFT, NativeKey::ShiftLeft, NativeKey::ShiftRight),
        (Modifiers::ALT, NativeKey::AltLeft, NativeKey::AltRight),
        (Modifiers::META, NativeKey::SuperLeft, NativeKey::SuperRight),
    ];

    let mut modifiers = Modifiers::empty();
    for (flag, left, right) in FLAGS {
        if backend.key_pressed(handle, left) || backend.key_pressed(handle, right) {
            modifiers |= flag;
        }
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessBackend;
    use crate::input::KeyCode;
    use winit::keyboard::ModifiersState;

    fn held_keys(window: &mut Window) -> Vec<(KeyCode, Modifiers)> {
        std::iter::from_fn(|| window.next_event())
            .filter_map(|event| match event {
                Event::Key {
                    code,
                    modifiers,
                    action: KeyAction::Hold,
                    ..
                } => Some((code, modifiers)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_hold_emitted_once_per_poll() {
        let backend = HeadlessBackend::new();
        let driver = backend.driver();
        let system = WindowSystem::new(backend);
        let mut window = system.create_window("hold", UVec2::new(640, 480)).unwrap();

        driver.set_key_pressed(window.handle(), NativeKey::KeyW, true);

        system.poll_input();
        assert_eq!(
            held_keys(&mut window),
            vec![(KeyCode::W, Modifiers::empty())]
        );

        system.poll_input();
        system.poll_input();
        assert_eq!(held_keys(&mut window).len(), 2);

        driver.set_key_pressed(window.handle(), NativeKey::KeyW, false);
        system.poll_input();
        assert!(held_keys(&mut window).is_empty());
    }

    #[test]
    fn test_hold_modifiers_are_read_at_poll_time() {
        let backend = HeadlessBackend::new();
        let driver = backend.driver();
        let system = WindowSystem::new(backend);
        let mut window = system.create_window("mods", UVec2::new(640, 480)).unwrap();
        let handle = window.handle();

        // Discrete press arrives with no modifiers...
        driver.press_key(handle, NativeKey::KeyW, ModifiersState::empty());
        // ...but by the time the poll runs, shift is down
        driver.set_key_pressed(handle, NativeKey::ShiftLeft, true);

        system.poll_input();

        let events: Vec<Event> = std::iter::from_fn(|| window.next_event()).collect();
        assert!(matches!(
            events[0],
            Event::Key {
                code: KeyCode::W,
                action: KeyAction::Press,
                modifiers,
                ..
            } if modifiers == Modifiers::empty()
        ));

        // Holds for both W and LShift, each carrying the live SHIFT flag
        let holds: Vec<(KeyCode, Modifiers)> = events
            .iter()
            .filter_map(|event| match event {
                Event::Key {
                    code,
                    modifiers,
                    action: KeyAction::Hold,
                    ..
                } => Some((*code, *modifiers)),
                _ => None,
            })
            .collect();
        assert_eq!(
            holds,
            vec![
                (KeyCode::W, Modifiers::SHIFT),
                (KeyCode::LShift, Modifiers::SHIFT),
            ]
        );
    }

    #[test]
    fn test_right_super_counts_as_meta() {
        let backend = HeadlessBackend::new();
        let driver = backend.driver();
        let system = WindowSystem::new(backend);
        let mut window = system.create_window("meta", UVec2::new(640, 480)).unwrap();
        let handle = window.handle();

        driver.set_key_pressed(handle, NativeKey::SuperRight, true);
        system.poll_input();

        assert_eq!(
            held_keys(&mut window),
            vec![(KeyCode::RMeta, Modifiers::META)]
        );
    }

    #[test]
    fn test_zero_area_window_is_rejected() {
        let system = WindowSystem::new(HeadlessBackend::new());
        let result = system.create_window("bad", UVec2::new(0, 600));
        assert!(matches!(
            result,
            Err(WindowError::InvalidSize {
                width: 0,
                height: 600
            })
        ));
        let result = system.create_window("bad", UVec2::new(800, 0));
        assert!(matches!(result, Err(WindowError::InvalidSize { .. })));
    }

    #[test]
    fn test_holds_fan_out_to_every_window() {
        let backend = HeadlessBackend::new();
        let driver = backend.driver();
        let system = WindowSystem::new(backend);
        let mut first = system.create_window("first", UVec2::new(320, 240)).unwrap();
        let mut second = system.create_window("second", UVec2::new(320, 240)).unwrap();

        // Only the first window's key is down
        driver.set_key_pressed(first.handle(), NativeKey::KeyA, true);
        system.poll_input();

        assert_eq!(held_keys(&mut first).len(), 1);
        assert!(held_keys(&mut second).is_empty());
    }
}
