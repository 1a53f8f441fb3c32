//! Input handlers for the TUI.

pub mod actions;
pub mod keyboard;
pub mod mouse;

// Re-export handler functions
pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;
