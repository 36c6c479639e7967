use std::{fmt, str::FromStr};

use crate::log::logger_error::LoggerError;

/// Defines the severity levels for log messages.
///
/// Variants are declared from least to most severe, so the derived `Ord`
/// follows severity: `LogLevel::Debug < LogLevel::Emergency`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Detailed debug information.
    #[default]
    Debug = 10,
    /// Interesting events.
    Info = 20,
    /// Normal but significant events.
    Notice = 30,
    /// Exceptional occurrences that are not errors.
    Warning = 40,
    /// Runtime errors that do not require immediate action.
    Error = 50,
    /// Critical conditions.
    Critical = 60,
    /// Action must be taken immediately.
    Alert = 70,
    /// System is unusable.
    Emergency = 80,
}

impl LogLevel {
    /// Every level, from most to least severe.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Emergency,
        LogLevel::Alert,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Numeric severity; higher is more severe.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name (`"warning"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Emergency => "emergency",
            LogLevel::Alert => "alert",
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Uppercase label written into log lines (`"WARNING"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Emergency => "EMERGENCY",
            LogLevel::Alert => "ALERT",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Looks a level up by its numeric rank.
    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.rank() == rank)
    }

    /// Returns `true` if a message at `self` passes a logger set to `threshold`.
    #[must_use]
    pub fn passes(self, threshold: LogLevel) -> bool {
        self >= threshold
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(rank: u8) -> Result<Self, LoggerError> {
        Self::from_rank(rank).ok_or_else(|| LoggerError::InvalidLevel(rank.to_string()))
    }
}

/// Conversion of caller-supplied level values into the [`LogLevel`] domain.
///
/// Accepted by every `Logger` operation that takes a level from outside the
/// type system, so an unknown name or rank surfaces as
/// [`LoggerError::InvalidLevel`] instead of silently picking a level.
pub trait IntoLevel {
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidLevel`] if the value names no known level.
    fn into_level(self) -> Result<LogLevel, LoggerError>;
}

impl IntoLevel for LogLevel {
    #[inline]
    fn into_level(self) -> Result<LogLevel, LoggerError> {
        Ok(self)
    }
}

impl IntoLevel for &str {
    fn into_level(self) -> Result<LogLevel, LoggerError> {
        self.parse()
    }
}

impl IntoLevel for &String {
    fn into_level(self) -> Result<LogLevel, LoggerError> {
        self.parse()
    }
}

impl IntoLevel for u8 {
    fn into_level(self) -> Result<LogLevel, LoggerError> {
        LogLevel::try_from(self)
    }
}
