//! Process-wide and shared access to a [`Logger`]

use super::{
    error::{LoggerError, Result},
    logger::Logger,
};
use parking_lot::{Mutex, MutexGuard};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Mutex<Logger>> = OnceLock::new();

impl Logger {
    /// Lock the process-wide logger, creating a default one on first use.
    ///
    /// The guard serializes whole lines, including their color changes.
    /// Holding two guards in one statement deadlocks.
    pub fn global() -> MutexGuard<'static, Logger> {
        GLOBAL.get_or_init(|| Mutex::new(Logger::new())).lock()
    }

    /// Install `logger` as the process-wide logger.
    ///
    /// Fails if a global logger exists already, either installed earlier or
    /// created by a previous [`Logger::global`] call.
    pub fn init_global(logger: Logger) -> Result<()> {
        GLOBAL
            .set(Mutex::new(logger))
            .map_err(|_| LoggerError::AlreadyInitialized)
    }
}

/// Cloneable handle to a logger shared between threads
///
/// # Example
///
/// ```
/// use ak_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .console(AnsiConsole::new(Vec::<u8>::new()))
///     .build();
/// let shared = SharedLogger::new(logger);
///
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.with(|l| l.info("from a thread", &[])))
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.lock().metrics().lines_written(), 1);
/// ```
#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Logger> {
        self.inner.lock()
    }

    /// Run `f` with the logger locked
    pub fn with<R>(&self, f: impl FnOnce(&mut Logger) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Logger> for SharedLogger {
    fn from(logger: Logger) -> Self {
        Self::new(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consoles::AnsiConsole;
    use crate::core::log_level::LogLevel;
    use std::thread;

    fn quiet_logger() -> Logger {
        Logger::builder()
            .console(AnsiConsole::new(Vec::<u8>::new()).with_colors(false))
            .build()
    }

    #[test]
    fn test_global_rejects_second_init() {
        let _ = Logger::init_global(quiet_logger());
        let err = Logger::init_global(quiet_logger()).unwrap_err();
        assert!(matches!(err, LoggerError::AlreadyInitialized));
    }

    #[test]
    fn test_global_keeps_level_between_locks() {
        let _ = Logger::init_global(quiet_logger());
        let previous = Logger::global().level();
        Logger::global().set_level(LogLevel::Error);
        assert_eq!(Logger::global().level(), LogLevel::Error);
        Logger::global().set_level(previous);
    }

    #[test]
    fn test_shared_logger_across_threads() {
        let shared = SharedLogger::from(quiet_logger());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let handle = shared.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        handle.with(|l| l.warning("thread %d line %d", &[i.into(), j.into()]));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let logger = shared.lock();
        assert_eq!(logger.metrics().lines_written(), 100);
        assert_eq!(logger.level(), LogLevel::Info);
    }
}
