//! One open native window and its event queue

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use glam::{UVec2, Vec2};
use thiserror::Error;
use tracing::debug;

use crate::backend::{BackendError, WindowHandle};
use crate::input::Event;

use super::registry::SharedWindowState;
use super::system::Shared;

/// Errors surfaced by window construction and setters
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window size must have positive area, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("failed to load window icon: {0}")]
    Icon(#[from] image::ImageError),
}

/// Mutable per-window state shared between the owning [`Window`] and the
/// dispatch path. Mutated under its own lock; the queue is append-at-tail
/// from dispatch and consume-at-head from [`Window::next_event`], never
/// reordered, never dropped.
pub(crate) struct WindowState {
    pub title: String,
    pub focused: bool,
    pub events: VecDeque<Event>,
    pub last_cursor: Option<Vec2>,
}

impl WindowState {
    pub fn new(title: String) -> Self {
        Self {
            title,
            focused: false,
            events: VecDeque::new(),
            last_cursor: None,
        }
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

/// One open native window.
///
/// Move-only: the registry keeps exactly one entry per native handle, and
/// dropping the `Window` destroys the native window and removes the entry.
/// Events accumulate while [`WindowSystem::poll_input`](super::WindowSystem::poll_input)
/// runs and are drained with [`next_event`](Self::next_event).
pub struct Window {
    handle: WindowHandle,
    state: SharedWindowState,
    shared: Arc<Shared>,
}

impl Window {
    pub(crate) fn new(handle: WindowHandle, state: SharedWindowState, shared: Arc<Shared>) -> Self {
        Self {
            handle,
            state,
            shared,
        }
    }

    /// The backend handle this window owns
    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// Pop the oldest unconsumed event, or `None` when the queue is empty.
    ///
    /// An empty queue is the normal idle case, not an error.
    pub fn next_event(&mut self) -> Option<Event> {
        self.state
            .lock()
            .expect("window state lock poisoned")
            .pop_event()
    }

    /// Whether this window currently has keyboard focus
    pub fn has_focus(&self) -> bool {
        self.state
            .lock()
            .expect("window state lock poisoned")
            .focused
    }

    pub fn title(&self) -> String {
        self.state
            .lock()
            .expect("window state lock poisoned")
            .title
            .clone()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .set_title(self.handle, &title);
        self.state
            .lock()
            .expect("window state lock poisoned")
            .title = title;
    }

    /// Current framebuffer size in pixels
    pub fn size(&self) -> UVec2 {
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .window_size(self.handle)
    }

    /// Whether the user asked this window to close
    pub fn close_requested(&self) -> bool {
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .close_requested(self.handle)
    }

    /// Decode an image file and install it as the window icon
    pub fn set_icon(&mut self, path: impl AsRef<Path>) -> Result<(), WindowError> {
        let icon = image::open(path)?.to_rgba8();
        let (width, height) = icon.dimensions();
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .set_icon(self.handle, width, height, icon.into_raw());
        Ok(())
    }

    /// Show or hide the cursor while it is over this window
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .set_cursor_visible(self.handle, visible);
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        // Destroy first so the backend stops producing notifications for the
        // handle, then remove the mapping. The locks are taken one at a time.
        self.shared
            .backend
            .lock()
            .expect("backend lock poisoned")
            .destroy_window(self.handle);
        self.shared.registry.deregister(self.handle);
        debug!(handle = self.handle.into_raw(), "window destroyed");
    }
}
