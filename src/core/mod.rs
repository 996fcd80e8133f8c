//! Core logger types and traits

pub mod code_unit;
pub mod color;
pub mod config;
pub mod console;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod printf;
pub mod shared;
pub mod template;
pub mod timestamp;

pub use code_unit::{until_nul, wide, CodeUnit, StreamMode};
pub use color::{Color, ColorSpec, Palette, ANSI_RESET};
pub use config::LoggerConfig;
pub use console::Console;
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, ASSERT_PREFIX};
pub use metrics::LoggerMetrics;
pub use printf::{format_into, format_string, format_units, FormatArg};
pub use shared::SharedLogger;
pub use template::{Piece, Rendered, Segment, Template, DEFAULT_FORMAT};
pub use timestamp::{Clock, FixedClock, LocalClock, TimestampFormat};
