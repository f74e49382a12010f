//! Domain layer - Core mirroring logic
//!
//! Contains value objects, the target classifier, content fingerprints,
//! per-selection mirror state and domain errors.
//! This layer has no dependencies on external systems.

pub mod classify;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod interval;
pub mod mirror_state;
pub mod selection;
pub mod sync_mode;

// Re-export common types
pub use classify::{classify, Category, ClassifiedSelection};
pub use config::AppConfig;
pub use error::*;
pub use fingerprint::Fingerprint;
pub use interval::Interval;
pub use mirror_state::{MirrorState, SelectionState};
pub use selection::{Selection, DEFAULT_SELECTIONS};
pub use sync_mode::SyncMode;
