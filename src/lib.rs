//! # AK Logger
//!
//! A small console logger driven by wrapper templates, with colored output,
//! narrow (byte) and wide (UTF-16) text paths built from one generic
//! algorithm.
//!
//! ## Features
//!
//! - **Wrapper templates**: `%0`..`%8` colors, `%t` time, `%d` date, `%l`
//!   level and `%s` the printf-formatted message
//! - **Leveled calls**: each level call colors its line and leaves the
//!   current level untouched
//! - **Assertions**: `['file':line]: message` reports on a false condition
//! - **Platform consoles**: ANSI escape sequences, or text attributes on a
//!   Windows console
//!
//! ## Example
//!
//! ```
//! use ak_logger::prelude::*;
//!
//! let mut logger = Logger::builder()
//!     .format("[%l]: %s\n")
//!     .console(AnsiConsole::new(Vec::<u8>::new()).with_colors(false))
//!     .build();
//!
//! ak_logger::info!(logger, "listening on port %d", 8080);
//! ak_logger::log_assert!(logger, 1 + 1 == 2, "arithmetic is broken");
//! ```

pub mod consoles;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::consoles::{default_console, stdout_console, AnsiConsole};
    pub use crate::core::{
        wide, Clock, CodeUnit, Color, Console, FixedClock, FormatArg, LocalClock, LogLevel,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Rendered, Result,
        SharedLogger, StreamMode, Template,
    };
}

pub use consoles::{default_console, stdout_console, AnsiConsole};
pub use core::{
    format_string, wide, Clock, CodeUnit, Color, ColorSpec, Console, FixedClock, FormatArg,
    LocalClock, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Palette, Piece, Rendered, Result, Segment, SharedLogger, StreamMode, Template,
    TimestampFormat, DEFAULT_FORMAT,
};
