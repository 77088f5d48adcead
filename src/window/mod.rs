//! Window ownership, the handle registry, and the poll driver.
//!
//! ```text
//! backend pump → dispatch (registry lookup + translation) → window queue
//!                                                               ↓
//! WindowSystem::poll_input (hold synthesis)          Window::next_event()
//! ```

mod dispatch;
mod registry;
mod system;
mod window;

pub use system::WindowSystem;
pub use window::{Window, WindowError};
