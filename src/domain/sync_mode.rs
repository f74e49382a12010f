//! How selection changes are detected

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidSyncModeError;

/// Driving discipline for the mirror loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyncMode {
    /// One clipnotify watcher per selection feeding a single dispatcher
    #[default]
    Events,
    /// Re-check every selection once per interval
    Poll,
}

impl SyncMode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Poll => "poll",
        }
    }
}

impl FromStr for SyncMode {
    type Err = InvalidSyncModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "events" | "event" => Ok(Self::Events),
            "poll" | "polling" => Ok(Self::Poll),
            _ => Err(InvalidSyncModeError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
