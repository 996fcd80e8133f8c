//! Custom wrapper template example
//!
//! Builds loggers from templates and from a JSON configuration.
//!
//! Run with: cargo run --example custom_format

use ak_logger::prelude::*;
use ak_logger::{fatal, warning};

const CONFIG: &str = r#"{
    "format": "%6%d %t%8 | %l | %s\n",
    "wide_format": "%6%d %t%8 | %l | %s\n",
    "level": "debug"
}"#;

fn main() -> Result<()> {
    println!("=== AK Logger - Custom Format Example ===\n");

    println!("1. Colors inside the template:");
    let mut logger = Logger::builder()
        .format("%4[%8%l%4]%8 %s %0(%t)%8\n")
        .level(LogLevel::Debug)
        .build();
    logger.log_current("current level is used", &[]);
    warning!(logger, "template colors follow the level color");

    println!("\n2. Unknown codes are dropped:");
    let mut logger = Logger::builder().format("%l%q%%: %s%\n").build();
    logger.info("no trace of %%q or the trailing %%", &[]);
    println!();

    println!("\n3. From configuration:");
    let config = LoggerConfig::from_json(CONFIG)?;
    println!("{}", config.to_json_pretty()?);
    let mut logger = LoggerBuilder::from_config(&config).build();
    logger.log_current("configured at %s", &[config.level.to_str().into()]);
    fatal!(logger, "configured template, %d%% custom", 100);

    println!("\n4. Rendering without writing:");
    let line = logger.render("rendered %05.1f", &[3.5.into()]);
    println!("{:?}", line.to_string_lossy());

    println!("\n5. One-off template at the current level:");
    logger.print_fmt("%5>> %l%8 %s\n", "printed with %s", &["print_fmt".into()]);

    logger.flush()
}
