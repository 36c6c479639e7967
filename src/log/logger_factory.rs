use std::path::Path;

use crate::log::{log_level::LogLevel, logger::Logger, logger_error::Result};

/// Creates file loggers bound to one fixed threshold.
///
/// # Example
///
/// ```rust,no_run
/// use filelog::log::{LogLevel, LoggerFactory};
///
/// let errors_only = LoggerFactory::new(LogLevel::Error);
/// let logger = errors_only.create("/var/log/app-errors.log")?;
/// assert_eq!(logger.threshold(), LogLevel::Error);
/// # Ok::<(), filelog::log::LoggerError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoggerFactory {
    threshold: LogLevel,
}

impl LoggerFactory {
    /// Factory for loggers with `threshold`.
    #[must_use]
    pub const fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    /// One factory per level, most severe first.
    pub fn all() -> impl Iterator<Item = LoggerFactory> {
        LogLevel::ALL.into_iter().map(Self::new)
    }

    /// Threshold given to every created logger.
    #[must_use]
    pub const fn threshold(&self) -> LogLevel {
        self.threshold
    }

    /// Opens `path` with this factory's threshold.
    ///
    /// # Errors
    ///
    /// Same as [`Logger::open`].
    pub fn create(&self, path: impl AsRef<Path>) -> Result<Logger> {
        Logger::open(path, self.threshold)
    }
}

impl From<LogLevel> for LoggerFactory {
    fn from(threshold: LogLevel) -> Self {
        Self::new(threshold)
    }
}
