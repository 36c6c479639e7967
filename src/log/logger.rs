use crate::{
    config::LoggerConfig,
    log::{
        context::Context,
        formatter::{self, DEFAULT_DATE_FORMAT, LineFormat},
        log_level::{IntoLevel, LogLevel},
        log_sink::{FileSink, LineSink},
        logger_error::{LoggerError, Result},
    },
};

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Outcome of a single log call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Delivery {
    /// The line was written to the sink.
    Written,
    /// The level was below the threshold; nothing was written.
    Suppressed,
    /// The sink rejected the write, or the logger is closed.
    Failed,
}

impl Delivery {
    /// `false` only for [`Delivery::Failed`]; a suppressed message is not a failure.
    #[must_use]
    pub fn is_ok(self) -> bool {
        !matches!(self, Delivery::Failed)
    }
}

/// Mutable part of a logger, guarded as one unit.
struct LoggerState<S> {
    sink: Option<S>,
    threshold: LogLevel,
    date_format: String,
    line_format: LineFormat,
}

/// Leveled logger writing formatted lines to an exclusively owned sink.
///
/// Messages at or above the threshold are formatted and appended as one line;
/// anything less severe is dropped. All state sits behind a single mutex, so
/// a `Logger` can be shared across threads (e.g. in an `Arc`) without lines
/// interleaving or a reader seeing a half-applied setting.
///
/// The sink is released exactly once, either by [`Logger::close`] or on drop.
///
/// # Example
///
/// ```rust,no_run
/// use filelog::log::{Context, LogLevel, Logger};
///
/// let logger = Logger::open("/var/log/app.log", LogLevel::Info)?;
/// let _ = logger.info("Hello {name}", &Context::from([("name", "World")]));
/// # Ok::<(), filelog::log::LoggerError>(())
/// ```
pub struct Logger<S: LineSink = FileSink> {
    state: Mutex<LoggerState<S>>,
    file_path: Option<PathBuf>,
}

impl Logger<FileSink> {
    /// Opens `path` for appending with the given threshold.
    ///
    /// # Errors
    ///
    /// * [`LoggerError::InvalidLevel`] if `threshold` is not a known level.
    /// * [`LoggerError::Directory`] if the parent directory is missing or
    ///   read-only; no file is created.
    /// * [`LoggerError::FileOpen`] if the file itself cannot be opened.
    pub fn open(path: impl AsRef<Path>, threshold: impl IntoLevel) -> Result<Self> {
        let threshold = threshold.into_level()?;
        let path = path.as_ref();

        let dir = parent_dir(path);
        if !is_writable_dir(dir) {
            return Err(LoggerError::Directory(dir.to_path_buf()));
        }

        let sink = FileSink::open_append(path).map_err(|source| LoggerError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), %threshold, "log file opened");

        let mut logger = Self::with_sink(sink, threshold)?;
        logger.file_path = Some(path.to_path_buf());
        Ok(logger)
    }

    /// Joins `dir` and `file_name` with the platform separator and opens the result.
    ///
    /// # Errors
    ///
    /// Same as [`Logger::open`].
    pub fn open_in_dir(
        dir: impl AsRef<Path>,
        file_name: &str,
        threshold: impl IntoLevel,
    ) -> Result<Self> {
        Self::open(dir.as_ref().join(file_name), threshold)
    }

    /// Opens the file described by `config` and applies its formats.
    ///
    /// # Errors
    ///
    /// Same as [`Logger::open`].
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let logger = Self::open(config.file_path(), config.threshold)?;
        if let Some(spec) = &config.date_format {
            logger.set_date_format(spec);
        }
        if let Some(template) = &config.line_format {
            logger.set_line_format(template);
        }
        Ok(logger)
    }
}

impl<S: LineSink> Logger<S> {
    /// Builds a logger on an already acquired sink.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`] if `threshold` is not a known level.
    pub fn with_sink(sink: S, threshold: impl IntoLevel) -> Result<Self> {
        let threshold = threshold.into_level()?;
        Ok(Self {
            state: Mutex::new(LoggerState {
                sink: Some(sink),
                threshold,
                date_format: DEFAULT_DATE_FORMAT.to_owned(),
                line_format: LineFormat::default(),
            }),
            file_path: None,
        })
    }

    /// Logs `message` at `level`, substituting `{key}` placeholders from `context`.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`] if `level` is not a known level; nothing
    /// is written in that case. A failed write is reported as
    /// [`Delivery::Failed`], not as an error.
    pub fn log(
        &self,
        level: impl IntoLevel,
        message: &str,
        context: &Context,
    ) -> Result<Delivery> {
        let level = level.into_level()?;
        Ok(self.emit(level, message, context))
    }

    /// Logs at [`LogLevel::Emergency`].
    pub fn emergency(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Emergency, message, context)
    }

    /// Logs at [`LogLevel::Alert`].
    pub fn alert(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Alert, message, context)
    }

    /// Logs at [`LogLevel::Critical`].
    pub fn critical(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Critical, message, context)
    }

    /// Logs at [`LogLevel::Error`].
    pub fn error(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Error, message, context)
    }

    /// Logs at [`LogLevel::Warning`].
    pub fn warning(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Warning, message, context)
    }

    /// Logs at [`LogLevel::Notice`].
    pub fn notice(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Notice, message, context)
    }

    /// Logs at [`LogLevel::Info`].
    pub fn info(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Info, message, context)
    }

    /// Logs at [`LogLevel::Debug`].
    pub fn debug(&self, message: &str, context: &Context) -> Delivery {
        self.emit(LogLevel::Debug, message, context)
    }

    fn emit(&self, level: LogLevel, message: &str, context: &Context) -> Delivery {
        let mut guard = self.lock();
        let state = &mut *guard;

        if !level.passes(state.threshold) {
            return Delivery::Suppressed;
        }

        let line = formatter::format_line(
            &state.date_format,
            level,
            &formatter::interpolate(message, context),
            &state.line_format,
        );

        let Some(sink) = state.sink.as_mut() else {
            tracing::warn!(%level, "log call on a closed logger");
            return Delivery::Failed;
        };

        match sink.write_line(&line) {
            Ok(()) => Delivery::Written,
            Err(err) => {
                tracing::warn!(%level, error = %err, "failed to write log line");
                Delivery::Failed
            }
        }
    }

    /// Sets the strftime specifier used for the `{date}` slot.
    pub fn set_date_format(&self, spec: &str) {
        self.lock().date_format = spec.to_owned();
    }

    #[must_use]
    pub fn date_format(&self) -> String {
        self.lock().date_format.clone()
    }

    /// Sets the line template. `{date}`, `{level}` and `{message}` are
    /// recognized; any other text is written verbatim.
    ///
    /// `"[{level}|{date}] {message}"` yields `[INFO|2013-04-25 13:37:42] Hello`.
    pub fn set_line_format(&self, template: &str) {
        self.lock().line_format = LineFormat::parse(template);
    }

    #[must_use]
    pub fn line_format(&self) -> String {
        self.lock().line_format.as_str().to_owned()
    }

    /// Changes the minimum level that will be written.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidLevel`] if `level` is not a known level; the
    /// previous threshold stays in effect.
    pub fn set_threshold(&self, level: impl IntoLevel) -> Result<()> {
        let level = level.into_level()?;
        self.lock().threshold = level;
        Ok(())
    }

    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        self.lock().threshold
    }

    /// Path of the log file, for loggers created from a path.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().sink.is_none()
    }

    /// Flushes and releases the sink. Later calls are no-ops.
    ///
    /// # Errors
    ///
    /// [`LoggerError::Close`] if the final flush fails. The sink is released
    /// either way.
    pub fn close(&self) -> Result<()> {
        let Some(mut sink) = self.lock().sink.take() else {
            return Ok(());
        };
        sink.close().map_err(LoggerError::Close)?;
        tracing::debug!(path = ?self.file_path, "logger closed");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState<S>> {
        // State is replaced field by field, so a panic mid-update cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: LineSink> Drop for Logger<S> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "failed to close logger on drop");
        }
    }
}

impl<S: LineSink> std::fmt::Debug for Logger<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field("file_path", &self.file_path)
            .field("threshold", &state.threshold)
            .field("date_format", &state.date_format)
            .field("line_format", &state.line_format.as_str())
            .field("closed", &state.sink.is_none())
            .finish()
    }
}

/// Directory a log file lives in; bare file names resolve to the current directory.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Existing directory the current user may create files in.
#[cfg(unix)]
fn is_writable_dir(dir: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    fs::metadata(dir).is_ok_and(|meta| meta.is_dir())
        && access(dir, AccessFlags::W_OK | AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable_dir(dir: &Path) -> bool {
    fs::metadata(dir).is_ok_and(|meta| meta.is_dir() && !meta.permissions().readonly())
}
