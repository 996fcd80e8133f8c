//! Error types for the logger
//!
//! Log calls themselves never fail: console failures are reported on stderr
//! and counted. These errors surface from configuration, flushing and the
//! [`Console`](super::Console) seam.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Console API failure
    #[error("Console error ({console}): {message}")]
    ConsoleError { console: String, message: String },

    /// The global logger was already set up
    #[error("Global logger already initialized")]
    AlreadyInitialized,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a console error
    pub fn console(console: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConsoleError {
            console: console.into(),
            message: message.into(),
        }
    }
}
