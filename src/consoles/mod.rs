//! Console implementations

pub mod ansi;
#[cfg(windows)]
pub mod attribute;

pub use ansi::AnsiConsole;
#[cfg(windows)]
pub use attribute::AttributeConsole;

// Re-export trait for convenience
pub use crate::core::Console;

/// Standard output console for this platform.
///
/// On Windows an attached console is colored through text attributes;
/// everywhere else, and when Windows output is redirected, escape sequences
/// are used.
pub fn default_console() -> Box<dyn Console> {
    stdout_console(None)
}

/// Standard output console with colors forced on or off, or detected when
/// `colors` is `None`
pub fn stdout_console(colors: Option<bool>) -> Box<dyn Console> {
    #[cfg(windows)]
    {
        if use_attributes(colors, attribute::current_attributes().is_some()) {
            return Box::new(AttributeConsole::new());
        }
    }
    Box::new(AnsiConsole::stdout().with_colors(escape_colors(colors)))
}

/// Attributes need an attached console, and are skipped when colors are off
#[cfg_attr(not(windows), allow(dead_code))]
fn use_attributes(colors: Option<bool>, console_attached: bool) -> bool {
    console_attached && colors != Some(false)
}

fn escape_colors(colors: Option<bool>) -> bool {
    colors.unwrap_or_else(|| colored::control::SHOULD_COLORIZE.should_colorize())
}
