//! Wayland clipboard adapter using wl-copy

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStderr, Command};
use tokio::time::timeout;

use crate::application::ports::{Clipboard, ClipboardError};

/// Upper bound for handing one payload to wl-copy
pub const WL_COPY_TIMEOUT: Duration = Duration::from_secs(5);

const STDERR_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Wayland clipboard adapter using wl-copy
pub struct WaylandClipboard {
    program: PathBuf,
    timeout: Duration,
}

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("wl-copy"),
            timeout: WL_COPY_TIMEOUT,
        }
    }

    /// Override the bound on a single write
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Build wl-copy args for one payload
    fn build_args(mime_type: &str) -> [&str; 2] {
        ["--type", mime_type]
    }

    async fn copy_inner(&self, data: &[u8], mime_type: &str) -> Result<(), ClipboardError> {
        // On success wl-copy forks a server that inherits stdout/stderr and
        // keeps serving the selection, so those pipes are never read to EOF.
        let mut child = Command::new(&self.program)
            .args(Self::build_args(mime_type))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ClipboardError::WlCopyNotFound
                } else {
                    ClipboardError::CopyFailed(e.to_string())
                }
            })?;

        // Write payload to stdin, dropping it to signal EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(data)
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        let stderr = child.stderr.take();

        if !status.success() {
            let reason = match stderr {
                Some(stderr) => Self::read_reason(stderr).await,
                None => String::new(),
            };
            return Err(ClipboardError::CopyFailed(if reason.is_empty() {
                format!("wl-copy exited with status: {}", status)
            } else {
                reason
            }));
        }

        // Keep the server's stderr drained until it exits
        if let Some(mut stderr) = stderr {
            tokio::spawn(async move {
                let _ = tokio::io::copy(&mut stderr, &mut tokio::io::sink()).await;
            });
        }

        Ok(())
    }

    /// Whatever a failed wl-copy printed, bounded in time
    async fn read_reason(mut stderr: ChildStderr) -> String {
        let mut reason = String::new();
        let _ = timeout(STDERR_READ_TIMEOUT, stderr.read_to_string(&mut reason)).await;
        reason.trim().to_string()
    }
}

impl Default for WaylandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for WaylandClipboard {
    async fn copy(&self, data: &[u8], mime_type: &str) -> Result<(), ClipboardError> {
        timeout(self.timeout, self.copy_inner(data, mime_type))
            .await
            .map_err(|_| ClipboardError::Timeout(self.timeout.as_secs()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_the_type_label() {
        assert_eq!(
            WaylandClipboard::build_args("image/png"),
            ["--type", "image/png"]
        );
    }

    #[test]
    fn default_timeout() {
        assert_eq!(WaylandClipboard::default().timeout, Duration::from_secs(5));
    }

    fn fake_wl_copy(dir: &tempfile::TempDir, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("wl-copy");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn hung_wl_copy_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = WaylandClipboard::new()
            .with_program(fake_wl_copy(&dir, "#!/bin/sh\nexec sleep 30\n"))
            .with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let result = clipboard.copy(b"hello", "text/plain").await;

        assert!(matches!(result, Err(ClipboardError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn failed_write_carries_wl_copy_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = WaylandClipboard::new().with_program(fake_wl_copy(
            &dir,
            "#!/bin/sh\ncat >/dev/null\necho 'Failed to connect to a Wayland server' >&2\nexit 1\n",
        ));

        match clipboard.copy(b"hello", "text/plain").await {
            Err(ClipboardError::CopyFailed(reason)) => {
                assert_eq!(reason, "Failed to connect to a Wayland server");
            }
            other => panic!("expected CopyFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn silent_failure_falls_back_to_status() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = WaylandClipboard::new()
            .with_program(fake_wl_copy(&dir, "#!/bin/sh\ncat >/dev/null\nexit 3\n"));

        match clipboard.copy(b"hello", "text/plain").await {
            Err(ClipboardError::CopyFailed(reason)) => {
                assert!(reason.starts_with("wl-copy exited with status"));
            }
            other => panic!("expected CopyFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn payload_and_type_reach_wl_copy() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "#!/bin/sh\nprintf '%s|' \"$2\" > '{0}'\ncat >> '{0}'\n",
            out.display()
        );
        let clipboard = WaylandClipboard::new().with_program(fake_wl_copy(&dir, &script));

        clipboard.copy(b"\x89PNG", "image/png").await.unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"image/png|\x89PNG".to_vec());
    }
}
