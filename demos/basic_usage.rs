//! Basic logger usage example
//!
//! Demonstrates the default template, the leveled calls and assertions.
//!
//! Run with: cargo run --example basic_usage

use ak_logger::prelude::*;
use ak_logger::{error, info, log_assert, warning};

fn main() -> Result<()> {
    println!("=== AK Logger - Basic Usage Example ===\n");

    // Default templates, Info level, colored standard output
    let mut logger = Logger::new();

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.trace("This is a trace message", &[]);
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[]);
    logger.warning("This is a warning message", &[]);
    logger.error("This is an error message", &[]);
    logger.fatal("This is a fatal message", &[]);

    println!("\n2. printf-style arguments:");
    let port = 8080;
    info!(logger, "Listening on port %d", port);
    warning!(logger, "Disk usage at %.1f%%", 91.5);
    error!(logger, "%s returned %#x", "open()", 0xC0DE);

    println!("\n3. Leveled calls leave the current level alone:");
    logger.set_level(LogLevel::Warning);
    logger.info("Info call", &[]);
    logger.log_current("Unleveled call at %s", &[logger.level().to_str().into()]);

    println!("\n4. Assertions report the call site:");
    let retries = 7;
    log_assert!(logger, retries < 5, "retries = %d", retries);
    println!();

    logger.flush()?;
    println!(
        "\n=== Example completed: {} lines, {} failed assertions ===",
        logger.metrics().lines_written(),
        logger.metrics().assertions_failed()
    );

    Ok(())
}
