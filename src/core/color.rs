//! Abstract console colors and their platform representation
//!
//! A [`Palette`] is resolved once and then only read: consoles hold a
//! `&'static Palette` and look colors up in it on every change.

use std::sync::OnceLock;

/// Color selectable from a wrapper template with `%0`..`%8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// The console's original appearance
    Reset,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::Reset,
    ];

    /// Map a placeholder digit (`b'0'`..=`b'8'`) to its color
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'0'..=b'8' => Some(Self::ALL[usize::from(digit - b'0')]),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn to_colored(self) -> Option<colored::Color> {
        use colored::Color as C;
        match self {
            Color::Black => Some(C::Black),
            Color::Red => Some(C::Red),
            Color::Green => Some(C::Green),
            Color::Yellow => Some(C::Yellow),
            Color::Blue => Some(C::Blue),
            Color::Magenta => Some(C::Magenta),
            Color::Cyan => Some(C::Cyan),
            Color::White => Some(C::White),
            Color::Reset => None,
        }
    }
}

/// How one color is expressed on a particular console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    /// Escape sequence written into the text stream
    Escape(String),
    /// Text attribute word set on the console
    Attribute(u16),
}

pub const ANSI_RESET: &str = "\x1B[0m";

/// Immutable Color -> ColorSpec table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [ColorSpec; 9],
}

impl Palette {
    /// Escape-code palette: `ESC[30m`..`ESC[37m`, reset is `ESC[0m`
    pub fn ansi() -> Self {
        Self {
            entries: Color::ALL.map(|color| match color.to_colored() {
                Some(c) => ColorSpec::Escape(format!("\x1B[{}m", c.to_fg_str())),
                None => ColorSpec::Escape(ANSI_RESET.to_string()),
            }),
        }
    }

    /// Attribute palette with `reset` as the console's captured default
    pub fn attributes(reset: u16) -> Self {
        let attr = |color: Color| -> u16 {
            match color {
                Color::Black => 0x0,
                Color::Blue => 0x1,
                Color::Green => 0x2,
                Color::Cyan => 0x3,
                Color::Red => 0x4,
                Color::Magenta => 0x5,
                Color::Yellow => 0x6,
                Color::White => 0x7,
                Color::Reset => reset,
            }
        };
        Self {
            entries: Color::ALL.map(|color| ColorSpec::Attribute(attr(color))),
        }
    }

    /// Process-wide escape-code palette
    pub fn shared_ansi() -> &'static Palette {
        static ANSI: OnceLock<Palette> = OnceLock::new();
        ANSI.get_or_init(Palette::ansi)
    }

    pub fn get(&self, color: Color) -> &ColorSpec {
        &self.entries[color.index()]
    }
}
