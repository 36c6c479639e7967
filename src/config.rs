use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::log::{
    LoggerError,
    formatter::{DEFAULT_DATE_FORMAT, DEFAULT_LINE_FORMAT},
    log_level::LogLevel,
};

/// Section holding the logger keys.
pub const LOGGING_SECTION: &str = "Logging";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("missing key [{section}] {key}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },
}

/// INI-style key/value configuration.
///
/// Lines are `key = value`, `[section]` headers, `#` comments or blank.
/// Keys before the first header land in `globals`. Surrounding double quotes
/// are stripped from values.
#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// Section value, then global value, then `default`. Empty strings count as unset.
    #[must_use]
    pub fn get_non_empty_or_default<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: &'a str,
    ) -> &'a str {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
            .unwrap_or(default)
    }
}

/// Logger settings read from the `[Logging]` section.
///
/// ```ini
/// [Logging]
/// log_dir = "~/logs"
/// log_filename = "app.log"
/// threshold = "info"
/// line_format = "[{level}|{date}] {message}"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub dir: PathBuf,
    pub file_name: String,
    pub threshold: LogLevel,
    /// `None` keeps [`DEFAULT_DATE_FORMAT`].
    pub date_format: Option<String>,
    /// `None` keeps [`DEFAULT_LINE_FORMAT`].
    pub line_format: Option<String>,
}

impl LoggerConfig {
    /// # Errors
    ///
    /// * [`ConfigError::MissingKey`] (wrapped) if `log_filename` is absent.
    /// * [`LoggerError::InvalidLevel`] if `threshold` names no level.
    pub fn from_config(config: &Config) -> Result<Self, LoggerError> {
        let file_name = config
            .get_non_empty(LOGGING_SECTION, "log_filename")
            .ok_or(ConfigError::MissingKey {
                section: LOGGING_SECTION,
                key: "log_filename",
            })?
            .to_string();

        let dir = expand_path(config.get_non_empty_or_default(LOGGING_SECTION, "log_dir", "."));

        let threshold = config
            .get_non_empty_or_default(LOGGING_SECTION, "threshold", LogLevel::Debug.as_str())
            .parse::<LogLevel>()?;

        let date_format = config
            .get_non_empty(LOGGING_SECTION, "date_format")
            .filter(|spec| *spec != DEFAULT_DATE_FORMAT)
            .map(str::to_string);
        let line_format = config
            .get_non_empty(LOGGING_SECTION, "line_format")
            .filter(|template| *template != DEFAULT_LINE_FORMAT)
            .map(str::to_string);

        Ok(Self {
            dir,
            file_name,
            threshold,
            date_format,
            line_format,
        })
    }

    /// Loads `path` and reads the `[Logging]` section from it.
    ///
    /// # Errors
    ///
    /// See [`Config::load`] and [`LoggerConfig::from_config`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let config = Config::load(path)?;
        Self::from_config(&config)
    }

    /// `dir` joined with `file_name`.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Expands tilde (`~`) in file paths to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    if path_str.starts_with('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if path_str == "~" {
                return home_path;
            }
            if let Some(rest) = path_str
                .strip_prefix("~/")
                .or_else(|| path_str.strip_prefix("~\\"))
            {
                home_path.push(rest);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# global values
log_dir = "/var/tmp"

[Logging]
log_filename = "app.log"
threshold = WARNING
line_format = "[{level}|{date}] {message}"
"#;

    #[test]
    fn parse_reads_globals_and_sections() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_global("log_dir"), Some("/var/tmp"));
        assert_eq!(cfg.get("Logging", "log_filename"), Some("app.log"));
        assert_eq!(cfg.get("Logging", "missing"), None);
        assert_eq!(cfg.get("Other", "log_filename"), None);
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let cfg = Config::parse("[Logging]\nline_format = a=b {message}\n");
        assert_eq!(cfg.get("Logging", "line_format"), Some("a=b {message}"));
    }

    #[test]
    fn logger_config_from_sample() {
        let cfg = LoggerConfig::from_config(&Config::parse(SAMPLE)).unwrap();
        assert_eq!(cfg.dir, PathBuf::from("/var/tmp"));
        assert_eq!(cfg.file_name, "app.log");
        assert_eq!(cfg.file_path(), PathBuf::from("/var/tmp/app.log"));
        assert_eq!(cfg.threshold, LogLevel::Warning);
        assert_eq!(cfg.date_format, None);
        assert_eq!(cfg.line_format.as_deref(), Some("[{level}|{date}] {message}"));
    }

    #[test]
    fn logger_config_defaults() {
        let cfg = LoggerConfig::from_config(&Config::parse("[Logging]\nlog_filename = x.log\n"))
            .unwrap();
        assert_eq!(cfg.dir, PathBuf::from("."));
        assert_eq!(cfg.threshold, LogLevel::Debug);
        assert_eq!(cfg.date_format, None);
        assert_eq!(cfg.line_format, None);
    }

    #[test]
    fn missing_file_name_is_reported() {
        match LoggerConfig::from_config(&Config::empty()) {
            Err(LoggerError::Config(ConfigError::MissingKey { key, .. })) => {
                assert_eq!(key, "log_filename");
            }
            other => panic!("expected MissingKey, got: {other:?}"),
        }
    }

    #[test]
    fn bad_threshold_is_invalid_level() {
        let cfg = Config::parse("[Logging]\nlog_filename = x.log\nthreshold = chatty\n");
        assert!(matches!(
            LoggerConfig::from_config(&cfg),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            Config::load("/definitely/not/here.ini"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn expand_path_leaves_plain_paths() {
        assert_eq!(expand_path("/var/log"), PathBuf::from("/var/log"));
        assert_eq!(expand_path("logs"), PathBuf::from("logs"));
    }
}
