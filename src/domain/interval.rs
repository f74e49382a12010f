//! Interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default poll / queue-wait interval (300 milliseconds)
pub const DEFAULT_INTERVAL_MS: u64 = 300;

/// Value object representing the mirror loop's wait period.
/// Always positive; validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    milliseconds: u64,
}

impl Interval {
    /// Create an Interval from milliseconds, rejecting zero
    pub const fn from_millis(ms: u64) -> Option<Self> {
        if ms == 0 {
            None
        } else {
            Some(Self { milliseconds: ms })
        }
    }

    /// Default interval (300ms)
    pub const fn default_interval() -> Self {
        Self {
            milliseconds: DEFAULT_INTERVAL_MS,
        }
    }

    /// Get interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Multiply the interval, used for shutdown join bounds
    pub const fn times(&self, factor: u32) -> StdDuration {
        StdDuration::from_millis(self.milliseconds.saturating_mul(factor as u64))
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Parse an interval string.
    /// Supported formats: "300ms", "0.5s", "2s", "1m", and bare seconds like "0.3"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IntervalParseError { input: s.to_string() };
        let input = s.trim().to_lowercase();

        let (number, scale_ms) = if let Some(n) = input.strip_suffix("ms") {
            (n, 1.0)
        } else if let Some(n) = input.strip_suffix('s') {
            (n, 1000.0)
        } else if let Some(n) = input.strip_suffix('m') {
            (n, 60_000.0)
        } else {
            (input.as_str(), 1000.0)
        };

        let value: f64 = number.trim().parse().map_err(|_| err())?;
        if !value.is_finite() || value <= 0.0 {
            return Err(err());
        }

        let total_ms = (value * scale_ms).round();
        if total_ms < 1.0 || total_ms > u64::MAX as f64 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms as u64,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds % 1000 == 0 {
            write!(f, "{}s", self.milliseconds / 1000)
        } else {
            write!(f, "{}ms", self.milliseconds)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::default_interval()
    }
}
