use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building or reconfiguring a [`Logger`](crate::log::Logger).
///
/// Failed writes are not errors: they are reported per call through
/// [`Delivery::Failed`](crate::log::Delivery::Failed).
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Parent directory of the log file is missing, not a directory, or read-only.
    #[error("log directory {} does not exist or is not writable", .0.display())]
    Directory(PathBuf),

    /// The directory is usable but the file itself could not be opened.
    #[error("error opening log file with path {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A level value outside the eight known levels.
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    /// Flushing the sink on close failed. The sink is released regardless.
    #[error("failed to close log sink: {0}")]
    Close(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LoggerError>;
