//! Selection change notification infrastructure module

mod clipnotify;

pub use clipnotify::{ClipnotifyWatcher, SHUTDOWN_TIMEOUT, TERMINATE_GRACE};
