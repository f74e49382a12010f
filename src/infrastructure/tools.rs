//! External binary detection

use std::process::Stdio;

use tokio::process::Command;

/// Check if a tool binary is available using `which`
pub async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Return the first tool from `tools` that is missing, if any
pub async fn first_missing_tool<'a>(tools: &[&'a str]) -> Option<&'a str> {
    for &tool in tools {
        if !is_tool_available(tool).await {
            return Some(tool);
        }
    }
    None
}
