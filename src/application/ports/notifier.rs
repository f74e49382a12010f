//! Selection change notification port interface

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::application::stop::StopSignal;
use crate::domain::selection::Selection;

/// Producer side of the dispatcher's event queue
pub type SelectionEvents = mpsc::UnboundedSender<Selection>;

/// Notifier errors
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("clipnotify not found. Please install clipnotify.")]
    ClipnotifyNotFound,

    #[error("failed to start clipnotify for {selection}: {message}")]
    SpawnFailed { selection: Selection, message: String },

    #[error("clipnotify for {selection} exited unexpectedly: {detail}")]
    Exited { selection: Selection, detail: String },
}

/// Port for blocking change notifications on one selection
#[async_trait]
pub trait ChangeNotifier: Send + Sync + 'static {
    /// Watch a selection until `stop` is set.
    ///
    /// Sends `selection` on `events` once per observed change. Returns Ok(())
    /// when stopped (or when the queue is gone), and an error when the
    /// underlying watcher dies on its own.
    async fn watch(
        &self,
        selection: Selection,
        events: &SelectionEvents,
        stop: &StopSignal,
    ) -> Result<(), NotifierError>;

    /// Longest time `watch` may take to return once `stop` is set
    fn shutdown_timeout(&self) -> Duration {
        Duration::ZERO
    }
}
