pub mod context;
pub mod formatter;
pub mod log_level;
pub mod log_macros;
pub mod log_sink;
pub mod logger;
pub mod logger_error;
pub mod logger_factory;

pub use context::Context;
pub use log_level::{IntoLevel, LogLevel};
pub use log_sink::{FileSink, LineSink};
pub use logger::{Delivery, Logger};
pub use logger_error::LoggerError;
pub use logger_factory::LoggerFactory;
