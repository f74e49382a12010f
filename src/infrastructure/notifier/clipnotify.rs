//! Change notifier adapter using clipnotify

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::time::timeout;

use crate::application::ports::{ChangeNotifier, NotifierError, SelectionEvents};
use crate::application::StopSignal;
use crate::domain::selection::Selection;

const GRACE_MS: u64 = 500;

/// How long clipnotify gets to exit after SIGTERM before it is killed
pub const TERMINATE_GRACE: Duration = Duration::from_millis(GRACE_MS);

/// SIGTERM grace plus the wait after SIGKILL
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(2 * GRACE_MS);

/// Runs `clipnotify -s <selection> -l`, which prints one line per change
pub struct ClipnotifyWatcher {
    display: String,
}

impl ClipnotifyWatcher {
    /// Create a watcher for the given X display
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
        }
    }

    /// Build clipnotify args for one selection in loop mode
    fn build_args(selection: Selection) -> [&'static str; 3] {
        ["-s", selection.as_str(), "-l"]
    }

    fn spawn(&self, selection: Selection) -> Result<Child, NotifierError> {
        Command::new("clipnotify")
            .args(Self::build_args(selection))
            .env("DISPLAY", &self.display)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotifierError::ClipnotifyNotFound
                } else {
                    NotifierError::SpawnFailed {
                        selection,
                        message: e.to_string(),
                    }
                }
            })
    }

    /// Collect whatever clipnotify wrote to stderr before dying
    async fn exit_detail(child: &mut Child) -> String {
        let mut detail = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = timeout(TERMINATE_GRACE, stderr.read_to_string(&mut detail)).await;
        }
        let detail = detail.trim();
        if detail.is_empty() {
            "no details".to_string()
        } else {
            detail.to_string()
        }
    }

    /// SIGTERM, wait out the grace period, then SIGKILL
    async fn terminate(child: &mut Child) {
        if !matches!(child.try_wait(), Ok(None)) {
            return;
        }

        if let Some(id) = child.id() {
            let _ = signal::kill(Pid::from_raw(id as i32), Signal::SIGTERM);
        }
        if timeout(TERMINATE_GRACE, child.wait()).await.is_ok() {
            return;
        }

        let _ = child.start_kill();
        let _ = timeout(TERMINATE_GRACE, child.wait()).await;
    }
}

#[async_trait]
impl ChangeNotifier for ClipnotifyWatcher {
    async fn watch(
        &self,
        selection: Selection,
        events: &SelectionEvents,
        stop: &StopSignal,
    ) -> Result<(), NotifierError> {
        let mut child = self.spawn(selection)?;
        let Some(stdout) = child.stdout.take() else {
            Self::terminate(&mut child).await;
            return Err(NotifierError::SpawnFailed {
                selection,
                message: "stdout not captured".to_string(),
            });
        };
        let mut lines = BufReader::new(stdout).lines();

        let result = loop {
            tokio::select! {
                _ = stop.stopped() => break Ok(()),
                line = lines.next_line() => match line {
                    Ok(Some(_)) => {
                        if events.send(selection).is_err() {
                            break Ok(());
                        }
                    }
                    Ok(None) | Err(_) => {
                        if stop.is_stopped() {
                            break Ok(());
                        }
                        let detail = Self::exit_detail(&mut child).await;
                        break Err(NotifierError::Exited { selection, detail });
                    }
                },
            }
        };

        Self::terminate(&mut child).await;
        result
    }

    fn shutdown_timeout(&self) -> Duration {
        SHUTDOWN_TIMEOUT
    }
}
