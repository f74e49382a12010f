//! clipsync - mirror X11 selections into the Wayland clipboard
//!
//! Watches the CLIPBOARD and PRIMARY selections of an X display (usually a
//! virtual one such as Xvfb), picks the richest representation each offers,
//! and pushes it to the host Wayland clipboard. Optionally supervises a
//! wrapped command and exits with its status.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Target classification, fingerprints, mirror state, config values
//! - **Application**: The mirror use case and port interfaces (traits)
//! - **Infrastructure**: Adapters for xclip, wl-copy, clipnotify and the config file
//! - **CLI**: Argument parsing, log output, signal handling and supervision

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
