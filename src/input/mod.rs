//! Input model: portable codes, modifier bitmask, and the normalized event
//! stream delivered through per-window queues.
//!
//! ```text
//! Raw notification (backend) → dispatch → translation (this module)
//!                                              ↓
//!                                      per-window Event queue
//!                                              ↓
//!                                      Window::next_event()
//! ```

mod events;
mod keys;

pub use events::Event;
pub use keys::{KeyAction, KeyCode, Modifiers, MouseButton, ScanCode, translate_button, translate_key};

pub(crate) use keys::KEY_TABLE;
