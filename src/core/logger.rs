//! Main logger implementation

use super::{
    code_unit::{until_nul, CodeUnit},
    color::Color,
    config::LoggerConfig,
    console::Console,
    error::Result,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    printf::{format_units, FormatArg},
    template::{Rendered, Template},
    timestamp::{Clock, LocalClock},
};
use crate::consoles::stdout_console;
use std::sync::Arc;

/// Prefix put in front of a failed assertion's message
pub const ASSERT_PREFIX: &str = "['%s':%d]: ";

/// Leveled console logger driven by wrapper templates.
///
/// Every line is rendered by the wrapper template for its width (narrow or
/// wide), with the call's message template substituted at `%s`. The whole
/// line is shown in the level's color and the console is reset afterwards.
///
/// Leveled calls (`info`, `log`, ...) set the level for one line and restore
/// the previous level before returning. Unleveled calls (`log_current`) use
/// whatever level is set.
///
/// # Example
///
/// ```
/// use ak_logger::prelude::*;
///
/// let mut logger = Logger::builder()
///     .console(AnsiConsole::new(Vec::<u8>::new()).with_colors(false))
///     .build();
///
/// logger.info("hello %d", &[5.into()]);
/// assert_eq!(logger.level(), LogLevel::Info);
/// ```
pub struct Logger {
    format: Template<u8>,
    format_wide: Template<u16>,
    level: LogLevel,
    console: Box<dyn Console>,
    clock: Arc<dyn Clock>,
    metrics: LoggerMetrics,
}

/// Picks the wrapper template matching a character width
trait WrapperFormat: CodeUnit {
    fn wrapper(logger: &Logger) -> &Template<Self>;
}

impl WrapperFormat for u8 {
    fn wrapper(logger: &Logger) -> &Template<u8> {
        &logger.format
    }
}

impl WrapperFormat for u16 {
    fn wrapper(logger: &Logger) -> &Template<u16> {
        &logger.format_wide
    }
}

impl Logger {
    /// Logger with the default templates at Info level, writing to the
    /// platform's standard output console
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Logger with caller-supplied wrapper templates at Info level
    #[must_use]
    pub fn with_formats(format: impl AsRef<[u8]>, wide_format: impl AsRef<[u16]>) -> Self {
        Self::with_formats_and_level(format, wide_format, LogLevel::Info)
    }

    /// Logger with caller-supplied wrapper templates and initial level
    #[must_use]
    pub fn with_formats_and_level(
        format: impl AsRef<[u8]>,
        wide_format: impl AsRef<[u16]>,
        level: LogLevel,
    ) -> Self {
        LoggerBuilder::new()
            .format(format)
            .wide_format(wide_format)
            .level(level)
            .build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Narrow wrapper template
    pub fn format(&self) -> &Template<u8> {
        &self.format
    }

    /// Wide wrapper template
    pub fn wide_format(&self) -> &Template<u16> {
        &self.format_wide
    }

    pub fn console(&self) -> &dyn Console {
        &*self.console
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&mut self) -> Result<()> {
        self.console.flush()
    }

    /// Render a narrow line at the current level without writing it
    pub fn render(&self, text: impl AsRef<[u8]>, args: &[FormatArg]) -> Rendered<u8> {
        self.render_line(text.as_ref(), args)
    }

    /// Render a wide line at the current level without writing it
    pub fn render_w(&self, text: impl AsRef<[u16]>, args: &[FormatArg]) -> Rendered<u16> {
        self.render_line(text.as_ref(), args)
    }

    // ----- narrow -----

    /// Log at `level`, restoring the current level afterwards
    pub fn log(&mut self, level: LogLevel, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(level, text.as_ref(), args);
    }

    /// Log at the current level
    pub fn log_current(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.write_line(text.as_ref(), args);
    }

    #[inline]
    pub fn trace(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Trace, text.as_ref(), args);
    }

    #[inline]
    pub fn debug(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Debug, text.as_ref(), args);
    }

    #[inline]
    pub fn info(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Info, text.as_ref(), args);
    }

    #[inline]
    pub fn warning(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Warning, text.as_ref(), args);
    }

    #[inline]
    pub fn error(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Error, text.as_ref(), args);
    }

    #[inline]
    pub fn fatal(&mut self, text: impl AsRef<[u8]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Fatal, text.as_ref(), args);
    }

    /// Report a failed assertion as `['<file>':<line>]: <message>`.
    ///
    /// Nothing is written when `condition` holds. The line bypasses the
    /// wrapper template, gets no color and no trailing newline.
    pub fn assert(
        &mut self,
        condition: bool,
        file: &str,
        line: u32,
        text: impl AsRef<[u8]>,
        args: &[FormatArg],
    ) {
        if !condition {
            self.write_assertion(file, line, text.as_ref(), args);
        }
    }

    /// Render `text` through a one-off wrapper template at the current
    /// level. Colors named in `format` are applied; the level color is not,
    /// and nothing resets the console afterwards.
    pub fn print_fmt(
        &mut self,
        format: impl AsRef<[u8]>,
        text: impl AsRef<[u8]>,
        args: &[FormatArg],
    ) {
        self.print_with(format.as_ref(), text.as_ref(), args);
    }

    // ----- wide -----

    /// Wide [`log`](Self::log)
    pub fn log_w(&mut self, level: LogLevel, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(level, text.as_ref(), args);
    }

    /// Wide [`log_current`](Self::log_current)
    pub fn log_current_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.write_line(text.as_ref(), args);
    }

    #[inline]
    pub fn trace_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Trace, text.as_ref(), args);
    }

    #[inline]
    pub fn debug_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Debug, text.as_ref(), args);
    }

    #[inline]
    pub fn info_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Info, text.as_ref(), args);
    }

    #[inline]
    pub fn warning_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Warning, text.as_ref(), args);
    }

    #[inline]
    pub fn error_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Error, text.as_ref(), args);
    }

    #[inline]
    pub fn fatal_w(&mut self, text: impl AsRef<[u16]>, args: &[FormatArg]) {
        self.log_at(LogLevel::Fatal, text.as_ref(), args);
    }

    /// Wide [`assert`](Self::assert)
    pub fn assert_w(
        &mut self,
        condition: bool,
        file: &str,
        line: u32,
        text: impl AsRef<[u16]>,
        args: &[FormatArg],
    ) {
        if !condition {
            self.write_assertion(file, line, text.as_ref(), args);
        }
    }

    /// Wide [`print_fmt`](Self::print_fmt)
    pub fn print_fmt_w(
        &mut self,
        format: impl AsRef<[u16]>,
        text: impl AsRef<[u16]>,
        args: &[FormatArg],
    ) {
        self.print_with(format.as_ref(), text.as_ref(), args);
    }

    // ----- internals -----

    fn log_at<C: WrapperFormat>(&mut self, level: LogLevel, text: &[C], args: &[FormatArg]) {
        let previous = self.level;
        self.level = level;
        self.write_line(text, args);
        self.level = previous;
    }

    fn render_line<C: WrapperFormat>(&self, text: &[C], args: &[FormatArg]) -> Rendered<C> {
        C::wrapper(self).render(self.level, text, args, &*self.clock)
    }

    fn write_line<C: WrapperFormat>(&mut self, text: &[C], args: &[FormatArg]) {
        let rendered = self.render_line(text, args);
        self.emit(Some(self.level.color()), &rendered);
    }

    fn print_with<C: CodeUnit>(&mut self, format: &[C], text: &[C], args: &[FormatArg]) {
        let rendered = Template::parse(format).render(self.level, text, args, &*self.clock);
        self.emit(None, &rendered);
    }

    fn write_assertion<C: CodeUnit>(&mut self, file: &str, line: u32, text: &[C], args: &[FormatArg]) {
        self.metrics.record_assertion_failed();

        let mut template = Vec::with_capacity(ASSERT_PREFIX.len() + text.len());
        C::push_str(&mut template, ASSERT_PREFIX);
        template.extend_from_slice(until_nul(text));

        let mut all_args = Vec::with_capacity(args.len() + 2);
        all_args.push(FormatArg::from(file));
        all_args.push(FormatArg::from(line));
        all_args.extend_from_slice(args);

        let rendered = Rendered::plain(format_units(&template, &all_args));
        self.emit(None, &rendered);
    }

    /// Write one rendered line. Console failures are reported on stderr and
    /// counted, never returned.
    fn emit<C: CodeUnit>(&mut self, color: Option<Color>, rendered: &Rendered<C>) {
        match Self::write_to_console(&mut *self.console, color, rendered) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                self.metrics.record_failed_write();
                eprintln!("[LOGGER ERROR] Console '{}' failed: {}", self.console.name(), e);
            }
        }
    }

    fn write_to_console<C: CodeUnit>(
        console: &mut dyn Console,
        color: Option<Color>,
        rendered: &Rendered<C>,
    ) -> Result<()> {
        console.set_mode(C::MODE)?;
        let Some(color) = color else {
            rendered.write_to(console)?;
            return console.flush();
        };

        console.apply_color(color)?;
        let written = rendered.write_to(console);
        // Reset even when the text did not make it out
        let reset = console.reset_color();
        written.and(reset)?;
        console.flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use ak_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .format("%l> %s\n")
///     .wide_format(wide("%l> %s\n"))
///     .level(LogLevel::Debug)
///     .colors(false)
///     .build();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    format: Template<u8>,
    wide_format: Template<u16>,
    level: LogLevel,
    console: Option<Box<dyn Console>>,
    clock: Option<Arc<dyn Clock>>,
    colors: Option<bool>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            format: Template::default(),
            wide_format: Template::default(),
            level: LogLevel::Info,
            console: None,
            clock: None,
            colors: None,
        }
    }

    /// Builder preloaded from a configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut builder = Self::new()
            .format(&config.format)
            .wide_format(config.wide_format_units())
            .level(config.level);
        builder.colors = config.colors;
        builder
    }

    /// Narrow wrapper template
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl AsRef<[u8]>) -> Self {
        self.format = Template::parse(format.as_ref());
        self
    }

    /// Wide wrapper template
    #[must_use = "builder methods return a new value"]
    pub fn wide_format(mut self, format: impl AsRef<[u16]>) -> Self {
        self.wide_format = Template::parse(format.as_ref());
        self
    }

    /// Initial level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Console to write to. Defaults to the platform's standard output.
    #[must_use = "builder methods return a new value"]
    pub fn console<K: Console + 'static>(mut self, console: K) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Clock for `%t` and `%d`. Defaults to the local clock.
    #[must_use = "builder methods return a new value"]
    pub fn clock<K: Clock + 'static>(mut self, clock: K) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Force colors on or off for the default console. Ignored when a
    /// console is supplied explicitly.
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = Some(enabled);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let colors = self.colors;
        let console = self.console.unwrap_or_else(|| stdout_console(colors));

        Logger {
            format: self.format,
            format_wide: self.wide_format,
            level: self.level,
            console,
            clock: self.clock.unwrap_or_else(|| Arc::new(LocalClock)),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::code_unit::{wide, StreamMode};
    use crate::core::error::LoggerError;
    use crate::core::timestamp::FixedClock;
    use chrono::NaiveDate;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Mode(StreamMode),
        Narrow(Vec<u8>),
        Wide(Vec<u16>),
        Color(Color),
        Flush,
    }

    /// Console that records every call
    #[derive(Clone, Default)]
    struct RecordingConsole {
        events: Arc<Mutex<Vec<Event>>>,
        fail_writes: bool,
        mode: StreamMode,
    }

    impl RecordingConsole {
        fn events(&self) -> Vec<Event> {
            self.events.lock().clone()
        }

        fn text(&self) -> String {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Narrow(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                    Event::Wide(units) => Some(String::from_utf16_lossy(&units)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Console for RecordingConsole {
        fn set_mode(&mut self, mode: StreamMode) -> Result<()> {
            self.mode = mode;
            self.events.lock().push(Event::Mode(mode));
            Ok(())
        }

        fn mode(&self) -> StreamMode {
            self.mode
        }

        fn write_narrow(&mut self, text: &[u8]) -> Result<()> {
            if self.fail_writes {
                return Err(LoggerError::console("recording", "refused"));
            }
            self.events.lock().push(Event::Narrow(text.to_vec()));
            Ok(())
        }

        fn write_wide(&mut self, text: &[u16]) -> Result<()> {
            self.events.lock().push(Event::Wide(text.to_vec()));
            Ok(())
        }

        fn apply_color(&mut self, color: Color) -> Result<()> {
            self.events.lock().push(Event::Color(color));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.events.lock().push(Event::Flush);
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 2, 29)
                .and_then(|d| d.and_hms_opt(13, 14, 15))
                .expect("valid datetime"),
        )
    }

    fn recording_logger() -> (Logger, RecordingConsole) {
        let console = RecordingConsole::default();
        let logger = Logger::builder()
            .console(console.clone())
            .clock(clock())
            .build();
        (logger, console)
    }

    #[test]
    fn test_info_line_sequence() {
        let (mut logger, console) = recording_logger();
        logger.info("hello %d", &[5.into()]);

        assert_eq!(
            console.events(),
            vec![
                Event::Mode(StreamMode::Narrow),
                Event::Color(Color::Green),
                Event::Narrow(b"[INFO 13:14:15]: hello 5\n".to_vec()),
                Event::Color(Color::Reset),
                Event::Flush,
            ]
        );
        assert_eq!(logger.metrics().lines_written(), 1);
    }

    #[test]
    fn test_level_colors_per_call() {
        let (mut logger, console) = recording_logger();
        logger.trace("t", &[]);
        logger.debug("d", &[]);
        logger.warning("w", &[]);
        logger.error("e", &[]);
        logger.fatal("f", &[]);

        let colors: Vec<Color> = console
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Color(Color::Reset) => None,
                Event::Color(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            [Color::Green, Color::Green, Color::Yellow, Color::Red, Color::Red]
        );
    }

    #[test]
    fn test_leveled_calls_restore_level() {
        let (mut logger, console) = recording_logger();
        logger.set_level(LogLevel::Debug);

        logger.fatal("boom", &[]);
        assert_eq!(logger.level(), LogLevel::Debug);
        logger.log(LogLevel::Warning, "careful", &[]);
        assert_eq!(logger.level(), LogLevel::Debug);
        logger.error_w(wide("wide"), &[]);
        assert_eq!(logger.level(), LogLevel::Debug);

        assert!(console.text().contains("[FATAL 13:14:15]: boom"));
        assert!(console.text().contains("[WARNING 13:14:15]: careful"));
        assert!(console.text().contains("[ERROR 13:14:15]: wide"));
    }

    #[test]
    fn test_unleveled_call_uses_current_level() {
        let (mut logger, console) = recording_logger();
        logger.set_level(LogLevel::Warning);
        logger.log_current("as is", &[]);
        assert_eq!(console.text(), "[WARNING 13:14:15]: as is\n");
        assert!(console.events().contains(&Event::Color(Color::Yellow)));
    }

    #[test]
    fn test_wide_call_switches_mode_and_keeps_it() {
        let (mut logger, console) = recording_logger();
        logger.info_w(wide("val=%c"), &[0x3C0.into()]);

        assert_eq!(console.events()[0], Event::Mode(StreamMode::Wide));
        assert_eq!(console.text(), "[INFO 13:14:15]: val=π\n");
        assert_eq!(logger.console().mode(), StreamMode::Wide);
    }

    #[test]
    fn test_narrow_char_code_divergence() {
        let (mut logger, console) = recording_logger();
        logger.info("%c", &[0x3C0.into()]);
        let narrow: Vec<u8> = console
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Narrow(bytes) => Some(bytes),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(narrow, b"[INFO 13:14:15]: \xC0\n");
    }

    #[test]
    fn test_custom_formats_and_level() {
        let console = RecordingConsole::default();
        let mut logger = Logger::builder()
            .format("[%l %d %t]: %s\n")
            .wide_format(wide("<%l> %s"))
            .level(LogLevel::Trace)
            .console(console.clone())
            .clock(clock())
            .build();

        logger.log_current("x", &[]);
        logger.log_current_w(wide("y"), &[]);
        assert_eq!(console.text(), "[TRACE 2024/02/29 13:14:15]: x\n<TRACE> y");
    }

    #[test]
    fn test_assertion_false_writes_location_prefix() {
        let (mut logger, console) = recording_logger();
        logger.assert(false, "path/to/file", 42, "x must be positive", &[]);

        assert_eq!(console.text(), "['path/to/file':42]: x must be positive");
        assert!(!console.events().iter().any(|e| matches!(e, Event::Color(_))));
        assert_eq!(logger.metrics().assertions_failed(), 1);
    }

    #[test]
    fn test_assertion_with_arguments() {
        let (mut logger, console) = recording_logger();
        logger.assert_w(false, "lib.rs", 7, wide("got %d, want %s"), &[3.into(), "4".into()]);
        assert_eq!(console.text(), "['lib.rs':7]: got 3, want 4");
    }

    #[test]
    fn test_assertion_true_writes_nothing() {
        let (mut logger, console) = recording_logger();
        logger.assert(true, "path/to/file", 42, "never shown", &[]);
        assert!(console.events().is_empty());
        assert_eq!(logger.metrics().assertions_failed(), 0);
    }

    #[test]
    fn test_console_failure_is_counted_and_reset_still_sent() {
        let console = RecordingConsole {
            fail_writes: true,
            ..RecordingConsole::default()
        };
        let mut logger = Logger::builder().console(console.clone()).clock(clock()).build();

        logger.info("lost", &[]);
        assert_eq!(logger.metrics().failed_writes(), 1);
        assert_eq!(logger.metrics().lines_written(), 0);
        assert_eq!(console.events().last(), Some(&Event::Color(Color::Reset)));
    }

    #[test]
    fn test_print_fmt_uses_given_template_without_level_color() {
        let (mut logger, console) = recording_logger();
        logger.set_level(LogLevel::Error);
        logger.print_fmt("%2<%l>%8 %s\n", "n=%d", &[3.into()]);

        assert_eq!(
            console.events(),
            vec![
                Event::Mode(StreamMode::Narrow),
                Event::Color(Color::Green),
                Event::Narrow(b"<ERROR>".to_vec()),
                Event::Color(Color::Reset),
                Event::Narrow(b" n=3\n".to_vec()),
                Event::Flush,
            ]
        );
        assert_eq!(logger.level(), LogLevel::Error);
        assert_eq!(logger.metrics().lines_written(), 1);
    }

    #[test]
    fn test_print_fmt_w_leaves_console_uncolored() {
        let (mut logger, console) = recording_logger();
        logger.print_fmt_w(wide("%l|%t|%s"), wide("π%c"), &['x'.into()]);

        assert_eq!(
            console.events(),
            vec![
                Event::Mode(StreamMode::Wide),
                Event::Wide(wide("INFO|13:14:15|πx")),
                Event::Flush,
            ]
        );
    }

    #[test]
    fn test_render_does_not_write() {
        let (logger, console) = recording_logger();
        let line = logger.render("n=%d", &[1.into()]);
        assert_eq!(line.to_string_lossy(), "[INFO 13:14:15]: n=1\n");
        let wide_line = logger.render_w(wide("n=%d"), &[1.into()]);
        assert_eq!(wide_line.to_string_lossy(), "[INFO 13:14:15]: n=1\n");
        assert!(console.events().is_empty());
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().colors(false).build();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.format(), &Template::<u8>::default());
        assert_eq!(logger.wide_format(), &Template::<u16>::default());
    }
}
