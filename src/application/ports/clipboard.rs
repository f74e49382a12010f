//! Destination clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("wl-copy not found. Please install wl-clipboard.")]
    WlCopyNotFound,

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    CopyFailed(String),
}

/// Port for the destination clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents.
    ///
    /// # Arguments
    /// * `data` - Raw payload bytes
    /// * `mime_type` - Type label offered to clipboard readers
    ///
    /// # Returns
    /// Ok(()) once the clipboard owns the data, error otherwise
    async fn copy(&self, data: &[u8], mime_type: &str) -> Result<(), ClipboardError>;
}

