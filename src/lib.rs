//! Casement
//!
//! A per-window input event funnel. Raw notifications from a windowing
//! backend are translated into a normalized event stream, queued per window,
//! and drained by the window's owner; keys that stay down produce synthetic
//! `Hold` events once per poll.
//!
//! # Architecture
//!
//! ```text
//! Backend (winit vocabulary) → WindowSystem::poll_input
//!                                    ↓ pump
//!                              dispatch: registry lookup → translation
//!                                    ↓
//!                              per-window event queue
//!                                    ↓
//!                              Window::next_event()
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let backend = /* a Backend impl wrapping the platform event loop */;
//! let system = WindowSystem::new(backend);
//! let mut window = system.create_window("Main", UVec2::new(800, 600))?;
//!
//! loop {
//!     system.poll_input();
//!     while let Some(event) = window.next_event() {
//!         // react
//!     }
//!     if window.close_requested() {
//!         break;
//!     }
//! }
//! ```

/// The consumed windowing interface and the in-process headless backend
pub mod backend;

/// Window configuration profiles
pub mod config;

/// Portable codes, modifier bitmask, and the normalized event model
pub mod input;

/// Window ownership, handle registry, and the poll driver
pub mod window;

pub use backend::headless::{HeadlessBackend, HeadlessDriver};
pub use backend::{Backend, BackendError, MonitorInfo, RawWindowEvent, WindowHandle};
pub use config::WindowConfig;
pub use input::{Event, KeyAction, KeyCode, Modifiers, MouseButton, ScanCode};
pub use window::{Window, WindowError, WindowSystem};
