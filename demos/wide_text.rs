//! Wide text example
//!
//! Logs UTF-16 templates and shows where `%c` behaves differently on the
//! narrow and wide paths.
//!
//! Run with: cargo run --example wide_text

use ak_logger::prelude::*;
use ak_logger::{info_w, log_assert_w};

fn main() -> Result<()> {
    println!("=== AK Logger - Wide Text Example ===\n");

    let mut logger = Logger::with_formats("[%l %t]: %s\n", wide("%3<%l %d %t>%8 %s\n"));

    println!("1. Wide leveled calls:");
    logger.info_w(wide("Grüße aus %s"), &["Zürich".into()]);
    logger.warning_w(wide("Temperatur: %d°C"), &[38.into()]);
    info_w!(logger, "Δ = %.4f", 0.0125);

    println!("\n2. The same code unit through both paths:");
    let pi = 0x3C0u16;
    logger.info_w(wide("wide   %%c -> %c"), &[pi.into()]);
    logger.info("narrow %%c -> %c (code truncated to one byte)", &[pi.into()]);

    println!("\n3. Rust chars are encoded whole on both paths:");
    logger.info_w(wide("wide   %c"), &['π'.into()]);
    logger.info("narrow %c", &['π'.into()]);

    println!("\n4. Wide assertion:");
    let len = 0;
    log_assert_w!(logger, len > 0, "empty buffer (%d units)", len);
    println!();

    logger.flush()
}
