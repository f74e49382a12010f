//! Selection source port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::selection::Selection;

/// Selection read errors
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    #[error("xclip not found. Please install xclip.")]
    XclipNotFound,

    #[error("timed out after {seconds}s reading {selection}")]
    Timeout { selection: Selection, seconds: u64 },

    #[error("{0}")]
    ReadFailed(String),
}

/// Port for reading an X selection
#[async_trait]
pub trait SelectionSource: Send + Sync {
    /// List the targets the selection owner currently advertises.
    ///
    /// # Arguments
    /// * `selection` - The selection to query
    ///
    /// # Returns
    /// Target names in the order the owner listed them
    async fn query_targets(&self, selection: Selection) -> Result<Vec<String>, SelectionError>;

    /// Fetch the raw bytes of one target.
    ///
    /// # Arguments
    /// * `selection` - The selection to read
    /// * `target` - One of the advertised targets
    async fn read_target(&self, selection: Selection, target: &str)
        -> Result<Vec<u8>, SelectionError>;
}
