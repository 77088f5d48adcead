//! Process-level handle→window lookup

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex};

use crate::backend::WindowHandle;

use super::window::WindowState;

pub(crate) type SharedWindowState = Arc<Mutex<WindowState>>;

/// Maps backend handles to the owning window's shared state.
///
/// The backend delivers notifications keyed only by handle, so this is the
/// one piece of state dispatch must reach from pump context. A single lock
/// guards the map; it is held only for the lookup itself, never across a
/// backend call.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Mutex<HashMap<WindowHandle, SharedWindowState>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping. A collision means two live windows claimed one
    /// native handle, which is a lifecycle bug.
    pub fn register(&self, handle: WindowHandle, state: SharedWindowState) {
        let mut entries = self.entries.lock().expect("window registry lock poisoned");
        match entries.entry(handle) {
            Entry::Vacant(slot) => {
                slot.insert(state);
            }
            Entry::Occupied(_) => {
                panic!("window handle {handle:?} registered twice");
            }
        }
    }

    /// Resolve a handle delivered by the backend. A miss means the backend
    /// and registry have desynchronized.
    pub fn lookup(&self, handle: WindowHandle) -> SharedWindowState {
        let entries = self.entries.lock().expect("window registry lock poisoned");
        entries
            .get(&handle)
            .cloned()
            .unwrap_or_else(|| panic!("notification for unregistered window handle {handle:?}"))
    }

    /// Remove a mapping; called exactly once per handle, at destruction
    pub fn deregister(&self, handle: WindowHandle) {
        let mut entries = self.entries.lock().expect("window registry lock poisoned");
        if entries.remove(&handle).is_none() {
            panic!("deregistered window handle {handle:?} that was never registered");
        }
    }

    /// Clone the current entry list. Polling iterates the snapshot so the
    /// registry lock is not held across backend calls.
    pub fn snapshot(&self) -> Vec<(WindowHandle, SharedWindowState)> {
        let entries = self.entries.lock().expect("window registry lock poisoned");
        entries
            .iter()
            .map(|(handle, state)| (*handle, Arc::clone(state)))
            .collect()
    }
}
