//! One-shot stop signal shared by the dispatcher and notifier workers

use std::sync::Arc;

use tokio::sync::watch;

/// Stop gate observed by every worker.
///
/// Cloning shares the same gate. Once set it stays set.
#[derive(Debug, Clone)]
pub struct StopSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    /// Create a new, unset stop signal
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Set the signal and wake every waiter
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }

    /// Check if stop was requested
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }

    /// Wait until stop is requested
    pub async fn stopped(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns once set.
        let _ = receiver.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
