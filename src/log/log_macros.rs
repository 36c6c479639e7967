//! Leveled logging macros for [`Logger`](crate::log::Logger).
//!
//! Placeholder values are passed as `key = value` pairs after the template and
//! collected into a [`Context`](crate::log::Context):
//!
//! ```rust,no_run
//! use filelog::{logger_info, log::{LogLevel, Logger}};
//!
//! let logger = Logger::open("app.log", LogLevel::Debug)?;
//! let _ = logger_info!(logger, "user {user} logged in from {ip}", user = "alice", ip = "10.0.0.7");
//! # Ok::<(), filelog::log::LoggerError>(())
//! ```

// ============================================================================
// 1. GENERIC MACROS
// ============================================================================

/// Builds a [`Context`](crate::log::Context) from `key = value` pairs.
#[macro_export]
macro_rules! context {
    () => {
        $crate::log::Context::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut __ctx = $crate::log::Context::new();
        $( __ctx.insert(stringify!($key), &$value); )+
        __ctx
    }};
}

/// Calls [`Logger::log`](crate::log::Logger::log); evaluates to its `Result`.
#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $lvl:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $logger.log($lvl, $msg, &$crate::context!($($key = $value),*))
    };
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS
// ============================================================================
// Each evaluates to the `Delivery` of the matching `Logger` method.

#[macro_export]
macro_rules! logger_emergency { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.emergency($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_alert     { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.alert($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_critical  { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.critical($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_error     { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.error($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_warning   { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.warning($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_notice    { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.notice($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_info      { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.info($msg, &$crate::context!($($key = $value),*)) } }
#[macro_export]
macro_rules! logger_debug     { ($logger:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => { $logger.debug($msg, &$crate::context!($($key = $value),*)) } }
