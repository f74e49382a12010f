//! Domain error types

use thiserror::Error;

/// Error when parsing an interval string
#[derive(Debug, Clone, Error)]
#[error("Invalid interval: \"{input}\". Expected a positive duration such as 300ms, 0.5s, 2s, 1m or 0.3 (seconds)")]
pub struct IntervalParseError {
    pub input: String,
}

/// Error when an unknown selection name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid selection: \"{input}\". Valid selections are: clipboard, primary, secondary")]
pub struct InvalidSelectionError {
    pub input: String,
}

/// Error when an unknown sync mode is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid mode: \"{input}\". Valid modes are: events, poll")]
pub struct InvalidSyncModeError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },
}
