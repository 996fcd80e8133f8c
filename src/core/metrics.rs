//! Logger metrics for observability
//!
//! Counts what a logger has emitted and how often the console refused a
//! write. Log calls never return errors, so these counters are the only way
//! to notice a broken console from the caller's side.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use ak_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_failed_write();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.failed_writes(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines fully written to the console
    lines_written: AtomicU64,

    /// Assertion calls whose condition was false
    assertions_failed: AtomicU64,

    /// Lines the console failed to take
    failed_writes: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            assertions_failed: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn assertions_failed(&self) -> u64 {
        self.assertions_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Record a written line, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_assertion_failed(&self) -> u64 {
        self.assertions_failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_write(&self) -> u64 {
        self.failed_writes.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of lines that failed, in percent
    pub fn failure_rate(&self) -> f64 {
        let written = self.lines_written();
        let failed = self.failed_writes();
        let total = written + failed;

        if total == 0 {
            return 0.0;
        }
        (failed as f64 / total as f64) * 100.0
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.assertions_failed.store(0, Ordering::Relaxed);
        self.failed_writes.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.assertions_failed(), 0);
        assert_eq!(metrics.failed_writes(), 0);
        assert_eq!(metrics.failure_rate(), 0.0);
    }

    #[test]
    fn test_record_returns_previous_count() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_written(), 0);
        assert_eq!(metrics.record_written(), 1);
        assert_eq!(metrics.lines_written(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        for _ in 0..3 {
            metrics.record_written();
        }
        metrics.record_failed_write();

        let rate = metrics.failure_rate();
        assert!((24.9..=25.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        metrics.record_assertion_failed();
        metrics.record_failed_write();
        metrics.reset();
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.assertions_failed(), 0);
        assert_eq!(metrics.failed_writes(), 0);
    }
}
