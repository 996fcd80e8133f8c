//! Timestamp formatting utilities
//!
//! The wrapper template prints local wall-clock time (`%t`) and date (`%d`).
//! Time comes from a [`Clock`] so rendering can be pinned in tests.

use chrono::{Local, NaiveDateTime};
use std::fmt;

/// Timestamp layouts used by wrapper placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `HH:MM:SS`, 24-hour, zero-padded
    Time,
    /// `YYYY/MM/DD`, zero-padded
    Date,
}

impl TimestampFormat {
    /// strftime pattern for this format
    pub fn pattern(&self) -> &'static str {
        match self {
            TimestampFormat::Time => "%H:%M:%S",
            TimestampFormat::Date => "%Y/%m/%d",
        }
    }

    #[must_use]
    pub fn format(&self, datetime: &NaiveDateTime) -> String {
        datetime.format(self.pattern()).to_string()
    }
}

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Debug for FixedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedClock({})", self.0)
    }
}
