//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! wrapping xclip, wl-copy and clipnotify.

pub mod clipboard;
pub mod config;
pub mod notifier;
pub mod selection;
pub mod tools;

// Re-export adapters
pub use clipboard::WaylandClipboard;
pub use config::XdgConfigStore;
pub use notifier::{ClipnotifyWatcher, SHUTDOWN_TIMEOUT};
pub use selection::XclipSource;
pub use tools::{first_missing_tool, is_tool_available};
