//! X selection adapter using xclip

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::application::ports::{SelectionError, SelectionSource};
use crate::domain::selection::Selection;

/// Upper bound for one xclip invocation
pub const XCLIP_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads X selections on one display through xclip
pub struct XclipSource {
    program: PathBuf,
    display: String,
    timeout: Duration,
}

impl XclipSource {
    /// Create an adapter for the given X display (e.g. ":99")
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            program: PathBuf::from("xclip"),
            display: display.into(),
            timeout: XCLIP_TIMEOUT,
        }
    }

    /// Override the bound on a single xclip call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Build xclip args to print one target of a selection
    fn build_args(selection: Selection, target: &str) -> Vec<String> {
        vec![
            "-selection".to_string(),
            selection.as_str().to_string(),
            "-out".to_string(),
            "-target".to_string(),
            target.to_string(),
        ]
    }

    /// Split xclip's TARGETS output into trimmed, non-empty names
    fn parse_targets(output: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(output)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    async fn run_xclip(&self, selection: Selection, target: &str) -> Result<Vec<u8>, SelectionError> {
        let output = Command::new(&self.program)
            .args(Self::build_args(selection, target))
            .env("DISPLAY", &self.display)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, output)
            .await
            .map_err(|_| SelectionError::Timeout {
                selection,
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SelectionError::XclipNotFound
                } else {
                    SelectionError::ReadFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SelectionError::ReadFailed(if stderr.is_empty() {
                format!("xclip exited with status: {}", output.status)
            } else {
                stderr
            }));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl SelectionSource for XclipSource {
    async fn query_targets(&self, selection: Selection) -> Result<Vec<String>, SelectionError> {
        let output = self.run_xclip(selection, "TARGETS").await?;
        Ok(Self::parse_targets(&output))
    }

    async fn read_target(
        &self,
        selection: Selection,
        target: &str,
    ) -> Result<Vec<u8>, SelectionError> {
        self.run_xclip(selection, target).await
    }
}
