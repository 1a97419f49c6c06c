// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.
//!
//! Levels are totally ordered from least to most severe. A logger emits a line only when
//! the line's level is at or above the logger's threshold.

use crate::error::Error;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Detailed diagnostics, normally hidden.
    Debug,
    /// Routine operation. This is the default threshold.
    #[default]
    Info,
    /// Suspicious condition.
    Warning,
    /// Runtime error.
    Error,
    /// Programmer error. Logging at this level also hands a [`Panicked`](crate::Panicked)
    /// fault back to the caller.
    Panic,
    /// Unrecoverable. Logging at this level terminates the process.
    Fatal,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: &'static [Level] = &[
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Panic,
        Level::Fatal,
    ];

    /// The name written on the wire, e.g. `level=warning`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Parses a level name. `warn` is accepted for `warning`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}
