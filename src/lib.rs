//! `filelog` is a small leveled file logger.
//!
//! A [`Logger`](log::Logger) appends one formatted line per accepted message
//! to a file it owns. Messages are filtered against a severity threshold,
//! stamped with the date and level, and may carry `{placeholder}` values
//! taken from a per-call [`Context`](log::Context).
//!
//! ```rust,no_run
//! use filelog::log::{Context, LogLevel, Logger};
//!
//! let logger = Logger::open("app.log", LogLevel::Info)?;
//! let _ = logger.warning("cache at {pct}%", &Context::new().with("pct", 93));
//! // app.log: 2013-04-25 13:37:42 WARNING cache at 93%
//! # Ok::<(), filelog::log::LoggerError>(())
//! ```

/// Handles configuration loading and management.
pub mod config;
/// Leveled file logging.
pub mod log;
