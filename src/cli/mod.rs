//! CLI layer - Command-line interface
//!
//! Contains argument parsing, log output, signal handling,
//! wrapped command supervision and the main runner.

pub mod app;
pub mod args;
pub mod child;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{
    load_merged_config, resolve_options, run_sync, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{Cli, SelectionArg, SyncOptions};
pub use presenter::Presenter;
