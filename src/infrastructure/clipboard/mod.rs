//! Destination clipboard infrastructure module
//!
//! Writes to the Wayland clipboard through wl-copy.

mod wayland;

pub use wayland::WaylandClipboard;
