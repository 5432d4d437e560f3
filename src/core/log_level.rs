//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used for numeric level codes outside the known range
pub const UNKNOWN_LEVEL_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Information = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
    Success = 5,
    Failure = 6,
    Critical = 7,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Information,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Success,
        LogLevel::Failure,
        LogLevel::Critical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
            LogLevel::Success => "Success",
            LogLevel::Failure => "Failure",
            LogLevel::Critical => "Critical",
        }
    }

    #[inline]
    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Map a numeric level code back to a level, if it is one
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Display name for a raw numeric code, `"Unknown"` when out of range
    pub fn name_of_code(code: i64) -> &'static str {
        Self::from_code(code)
            .map(|level| level.name())
            .unwrap_or(UNKNOWN_LEVEL_NAME)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "information" | "info" => Ok(LogLevel::Information),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "success" => Ok(LogLevel::Success),
            "failure" => Ok(LogLevel::Failure),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
