//! X selection identifiers

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidSelectionError;

/// Selections watched when nothing else is configured
pub const DEFAULT_SELECTIONS: &[Selection] = &[Selection::Clipboard, Selection::Primary];

/// One independently addressable X selection buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selection {
    Clipboard,
    Primary,
    Secondary,
}

impl Selection {
    /// Get the name understood by xclip and clipnotify
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl FromStr for Selection {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clipboard" => Ok(Self::Clipboard),
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            _ => Err(InvalidSelectionError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
