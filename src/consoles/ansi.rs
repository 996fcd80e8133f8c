//! Escape-code console implementation

use crate::core::{Color, ColorSpec, Console, LoggerError, Palette, Result, StreamMode};
use std::io::{self, Stdout, Write};

/// Console that expresses colors as ANSI escape sequences written into the
/// same stream as the text.
///
/// Wide text is transcoded to UTF-8 on the way out; unpaired surrogates are
/// replaced.
pub struct AnsiConsole<W: Write + Send = Stdout> {
    writer: W,
    use_colors: bool,
    palette: &'static Palette,
    mode: StreamMode,
}

impl AnsiConsole<Stdout> {
    /// Standard output. Colors follow `colored`'s terminal detection
    /// (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, TTY check).
    pub fn stdout() -> Self {
        let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();
        Self::new(io::stdout()).with_colors(use_colors)
    }
}

impl<W: Write + Send> AnsiConsole<W> {
    /// Console over any writer, with colors enabled
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            use_colors: true,
            palette: Palette::shared_ansi(),
            mode: StreamMode::default(),
        }
    }

    /// Turn escape sequences on or off
    ///
    /// # Example
    ///
    /// ```
    /// use ak_logger::consoles::AnsiConsole;
    ///
    /// let console = AnsiConsole::new(Vec::<u8>::new()).with_colors(false);
    /// assert!(!console.uses_colors());
    /// ```
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_bytes(&mut self, bytes: &[u8], what: &str) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|e| LoggerError::io_operation("writing to console", what, e))
    }
}

impl<W: Write + Send> Console for AnsiConsole<W> {
    fn set_mode(&mut self, mode: StreamMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> StreamMode {
        self.mode
    }

    fn write_narrow(&mut self, text: &[u8]) -> Result<()> {
        self.write_bytes(text, "narrow text")
    }

    fn write_wide(&mut self, text: &[u16]) -> Result<()> {
        let utf8 = String::from_utf16_lossy(text);
        self.write_bytes(utf8.as_bytes(), "wide text")
    }

    fn apply_color(&mut self, color: Color) -> Result<()> {
        if !self.use_colors {
            return Ok(());
        }
        let palette = self.palette;
        match palette.get(color) {
            ColorSpec::Escape(sequence) => self.write_bytes(sequence.as_bytes(), "color escape"),
            ColorSpec::Attribute(_) => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "ansi"
    }
}
