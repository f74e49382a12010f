//! Application configuration value object

use std::fmt;

use serde::Deserialize;

use crate::domain::error::ConfigError;
use crate::domain::interval::Interval;
use crate::domain::selection::{Selection, DEFAULT_SELECTIONS};
use crate::domain::sync_mode::SyncMode;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    pub interval: Option<String>,
    pub display: Option<String>,
    pub debug: Option<bool>,
    pub mode: Option<String>,
    pub selections: Option<Vec<String>>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            interval: Some(Interval::default_interval().to_string()),
            display: None,
            debug: Some(false),
            mode: Some(SyncMode::default().to_string()),
            selections: Some(
                DEFAULT_SELECTIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            interval: other.interval.or(self.interval),
            display: other.display.or(self.display),
            debug: other.debug.or(self.debug),
            mode: other.mode.or(self.mode),
            selections: other.selections.or(self.selections),
        }
    }

    /// Parse the interval, or the default if not set
    pub fn interval(&self) -> Result<Interval, ConfigError> {
        match self.interval.as_deref() {
            Some(s) => s.parse::<Interval>().map_err(|e| invalid("interval", e)),
            None => Ok(Interval::default()),
        }
    }

    /// Parse the sync mode, or the default if not set
    pub fn mode(&self) -> Result<SyncMode, ConfigError> {
        match self.mode.as_deref() {
            Some(s) => s.parse::<SyncMode>().map_err(|e| invalid("mode", e)),
            None => Ok(SyncMode::default()),
        }
    }

    /// Parse the watched selections, de-duplicated in first-seen order.
    /// An unset or empty list means the defaults.
    pub fn selections(&self) -> Result<Vec<Selection>, ConfigError> {
        let names = match self.selections.as_deref() {
            Some(names) if !names.is_empty() => names,
            _ => return Ok(DEFAULT_SELECTIONS.to_vec()),
        };

        let mut selections = Vec::with_capacity(names.len());
        for name in names {
            let selection = name
                .parse::<Selection>()
                .map_err(|e| invalid("selections", e))?;
            if !selections.contains(&selection) {
                selections.push(selection);
            }
        }
        Ok(selections)
    }

    /// Display endpoint, treating an empty string as unset
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref().filter(|d| !d.is_empty())
    }

    /// Get debug setting, or false if not set
    pub fn debug_or_default(&self) -> bool {
        self.debug.unwrap_or(false)
    }
}

fn invalid(key: &str, error: impl fmt::Display) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: error.to_string(),
    }
}
