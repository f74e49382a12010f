//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod notifier;
pub mod reporter;
pub mod selection;

// Re-export common types
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use notifier::{ChangeNotifier, NotifierError, SelectionEvents};
pub use reporter::Reporter;
pub use selection::{SelectionError, SelectionSource};
