//! Application layer - Use cases and port interfaces
//!
//! Contains the mirror loop and trait definitions
//! for external system interactions.

pub mod mirror;
pub mod ports;
pub mod stop;

// Re-export use cases
pub use mirror::{MirrorConfig, MirrorError, MirrorUseCase, SyncOutcome};
pub use stop::StopSignal;
