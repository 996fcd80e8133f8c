//! Logging macros for printf-style log calls.
//!
//! Every argument after the message template is converted with
//! [`FormatArg::from`](crate::FormatArg), so plain Rust values can be passed
//! the way they would be passed to C's `printf`.
//!
//! # Examples
//!
//! ```
//! use ak_logger::prelude::*;
//! use ak_logger::{info, log_assert, warning_w};
//!
//! let mut logger = Logger::builder()
//!     .console(AnsiConsole::new(Vec::<u8>::new()))
//!     .build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With printf arguments
//! let port = 8080;
//! info!(logger, "Server listening on port %d", port);
//!
//! // Wide text
//! warning_w!(logger, "%s: %.1f%%", "load", 97.25);
//!
//! // Assertion with the call site's file and line
//! log_assert!(logger, port > 1024, "port %d is privileged", port);
//! ```

/// Log a message at a given level.
///
/// # Examples
///
/// ```
/// # use ak_logger::prelude::*;
/// # let mut logger = Logger::builder().console(AnsiConsole::new(Vec::<u8>::new())).build();
/// use ak_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $fmt, &[$($crate::FormatArg::from($arg)),*])
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $fmt $(, $arg)*)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $fmt $(, $arg)*)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use ak_logger::prelude::*;
/// # let mut logger = Logger::builder().console(AnsiConsole::new(Vec::<u8>::new())).build();
/// use ak_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing %d items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $fmt $(, $arg)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $fmt $(, $arg)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $fmt $(, $arg)*)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $fmt $(, $arg)*)
    };
}

/// Log a wide message at a given level. The template is a `&str` encoded to
/// UTF-16 at the call site.
///
/// # Examples
///
/// ```
/// # use ak_logger::prelude::*;
/// # let mut logger = Logger::builder().console(AnsiConsole::new(Vec::<u8>::new())).build();
/// use ak_logger::log_w;
/// log_w!(logger, LogLevel::Debug, "angle %c", 'θ');
/// ```
#[macro_export]
macro_rules! log_w {
    ($logger:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_w($level, $crate::wide($fmt), &[$($crate::FormatArg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! trace_w {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_w!($logger, $crate::LogLevel::Trace, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! debug_w {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_w!($logger, $crate::LogLevel::Debug, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! info_w {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_w!($logger, $crate::LogLevel::Info, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! warning_w {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_w!($logger, $crate::LogLevel::Warning, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! error_w {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_w!($logger, $crate::LogLevel::Error, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! fatal_w {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_w!($logger, $crate::LogLevel::Fatal, $fmt $(, $arg)*)
    };
}

/// Report `['file':line]: message` when the condition is false.
///
/// The condition is evaluated once; the message arguments only when it
/// fails.
///
/// # Examples
///
/// ```
/// # use ak_logger::prelude::*;
/// # let mut logger = Logger::builder().console(AnsiConsole::new(Vec::<u8>::new())).build();
/// use ak_logger::log_assert;
/// let retries = 3;
/// log_assert!(logger, retries < 5, "too many retries: %d", retries);
/// assert_eq!(logger.metrics().assertions_failed(), 0);
/// ```
#[macro_export]
macro_rules! log_assert {
    ($logger:expr, $cond:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        if !($cond) {
            $logger.assert(false, file!(), line!(), $fmt, &[$($crate::FormatArg::from($arg)),*]);
        }
    };
}

/// Wide [`log_assert!`]
#[macro_export]
macro_rules! log_assert_w {
    ($logger:expr, $cond:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        if !($cond) {
            $logger.assert_w(
                false,
                file!(),
                line!(),
                $crate::wide($fmt),
                &[$($crate::FormatArg::from($arg)),*],
            );
        }
    };
}

/// Lock the process-wide logger.
///
/// ```
/// use ak_logger::{global, info};
/// info!(global!(), "to standard output");
/// ```
#[macro_export]
macro_rules! global {
    () => {
        $crate::Logger::global()
    };
}
