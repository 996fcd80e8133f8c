//! Wrapper templates
//!
//! A wrapper template is the line layout a [`Logger`](super::Logger) is built
//! with. Placeholders are two units long:
//!
//! | Code      | Renders                                              |
//! |-----------|------------------------------------------------------|
//! | `%0`-`%7` | color change (black, red, green, yellow, blue, magenta, cyan, white) |
//! | `%8`      | color reset                                          |
//! | `%t`      | local time, `HH:MM:SS`                               |
//! | `%d`      | local date, `YYYY/MM/DD`                             |
//! | `%l`      | level label                                          |
//! | `%s`      | the message template, printf-formatted with the call's arguments |
//!
//! Any other code renders nothing, and a `%` with nothing after it is
//! ignored.

use super::code_unit::{until_nul, CodeUnit};
use super::color::Color;
use super::console::Console;
use super::error::Result;
use super::log_level::LogLevel;
use super::printf::{format_into, FormatArg};
use super::timestamp::{Clock, TimestampFormat};

/// Layout used when none is supplied
pub const DEFAULT_FORMAT: &str = "[%l %t]: %s\n";

/// A parsed wrapper template element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<C> {
    Literal(Vec<C>),
    Color(Color),
    Time,
    Date,
    Level,
    Message,
}

/// An immutable, pre-parsed wrapper template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<C> {
    source: Vec<C>,
    pieces: Vec<Piece<C>>,
}

impl<C: CodeUnit> Template<C> {
    /// Parse a wrapper template. Parsing stops at the first NUL unit.
    pub fn parse(source: &[C]) -> Self {
        let source = until_nul(source);
        let mut pieces = Vec::new();
        let mut literal = Vec::new();
        let mut i = 0;

        while i < source.len() {
            let unit = source[i];
            if unit.to_ascii() != Some(b'%') {
                literal.push(unit);
                i += 1;
                continue;
            }

            let code = source.get(i + 1).and_then(|u| u.to_ascii());
            i += 2;
            let piece = match code {
                Some(b't') => Piece::Time,
                Some(b'd') => Piece::Date,
                Some(b'l') => Piece::Level,
                Some(b's') => Piece::Message,
                Some(digit) => match Color::from_digit(digit) {
                    Some(color) => Piece::Color(color),
                    None => continue,
                },
                None => continue,
            };
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(piece);
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Self {
            source: source.to_vec(),
            pieces,
        }
    }

    /// Encode `text` in this width and parse it
    pub fn from_text(text: &str) -> Self {
        let mut units = Vec::with_capacity(text.len());
        C::push_str(&mut units, text);
        Self::parse(&units)
    }

    pub fn source(&self) -> &[C] {
        &self.source
    }

    pub fn pieces(&self) -> &[Piece<C>] {
        &self.pieces
    }

    /// Render one line. Every `%s` formats `message` against `args` from
    /// the first argument again.
    pub fn render(
        &self,
        level: LogLevel,
        message: &[C],
        args: &[FormatArg],
        clock: &dyn Clock,
    ) -> Rendered<C> {
        let mut rendered = Rendered::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(units) => rendered.text_mut().extend_from_slice(units),
                Piece::Color(color) => rendered.push_color(*color),
                Piece::Time => {
                    let time = TimestampFormat::Time.format(&clock.now());
                    C::push_str(rendered.text_mut(), &time);
                }
                Piece::Date => {
                    let date = TimestampFormat::Date.format(&clock.now());
                    C::push_str(rendered.text_mut(), &date);
                }
                Piece::Level => C::push_str(rendered.text_mut(), level.to_str()),
                Piece::Message => format_into(rendered.text_mut(), message, args),
            }
        }
        rendered
    }
}

impl<C: CodeUnit> Default for Template<C> {
    fn default() -> Self {
        Self::from_text(DEFAULT_FORMAT)
    }
}

/// One run of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<C> {
    Text(Vec<C>),
    Color(Color),
}

/// Rendered output in emission order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered<C> {
    segments: Vec<Segment<C>>,
}

impl<C: CodeUnit> Rendered<C> {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Text rendered without any formatting of its own
    pub fn plain(text: Vec<C>) -> Self {
        Self {
            segments: vec![Segment::Text(text)],
        }
    }

    /// The trailing text run, opened if the last segment is a color
    fn text_mut(&mut self) -> &mut Vec<C> {
        if !matches!(self.segments.last(), Some(Segment::Text(_))) {
            self.segments.push(Segment::Text(Vec::new()));
        }
        match self.segments.last_mut() {
            Some(Segment::Text(text)) => text,
            _ => unreachable!("text segment pushed above"),
        }
    }

    pub fn push_color(&mut self, color: Color) {
        self.segments.push(Segment::Color(color));
    }

    pub fn segments(&self) -> &[Segment<C>] {
        &self.segments
    }

    /// Visible text with color changes dropped
    pub fn text(&self) -> Vec<C> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_slice()),
                Segment::Color(_) => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Visible text decoded into a `String`
    pub fn to_string_lossy(&self) -> String {
        C::to_string_lossy(&self.text())
    }

    /// Send every segment to `console`, in order
    pub fn write_to(&self, console: &mut dyn Console) -> Result<()> {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) if text.is_empty() => {}
                Segment::Text(text) => C::write_to(console, text)?,
                Segment::Color(color) => console.apply_color(*color)?,
            }
        }
        Ok(())
    }
}
