//! Character widths the logger can render
//!
//! Narrow text is a sequence of bytes (`u8`), wide text a sequence of UTF-16
//! code units (`u16`). Templates and the printf engine are written once over
//! [`CodeUnit`] and instantiated for both.

use super::console::Console;
use super::error::Result;
use std::fmt;

/// Encoding mode of the console stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    #[default]
    Narrow,
    Wide,
}

pub trait CodeUnit: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static {
    /// Stream mode a console is switched to before this width is written
    const MODE: StreamMode;

    fn from_ascii(byte: u8) -> Self;

    /// The unit as an ASCII byte, if it is one
    fn to_ascii(self) -> Option<u8>;

    fn is_nul(self) -> bool {
        self == Self::default()
    }

    /// Append `s` in this width's encoding
    fn push_str(out: &mut Vec<Self>, s: &str);

    /// Append a raw numeric character code the way `%c` does: the code is
    /// truncated to a single unit of this width.
    fn push_code(out: &mut Vec<Self>, code: u64);

    fn write_to(console: &mut dyn Console, units: &[Self]) -> Result<()>;

    fn to_string_lossy(units: &[Self]) -> String;
}

impl CodeUnit for u8 {
    const MODE: StreamMode = StreamMode::Narrow;

    #[inline]
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    #[inline]
    fn to_ascii(self) -> Option<u8> {
        self.is_ascii().then_some(self)
    }

    fn push_str(out: &mut Vec<Self>, s: &str) {
        out.extend_from_slice(s.as_bytes());
    }

    fn push_code(out: &mut Vec<Self>, code: u64) {
        out.push((code & 0xFF) as u8);
    }

    fn write_to(console: &mut dyn Console, units: &[Self]) -> Result<()> {
        console.write_narrow(units)
    }

    fn to_string_lossy(units: &[Self]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

impl CodeUnit for u16 {
    const MODE: StreamMode = StreamMode::Wide;

    #[inline]
    fn from_ascii(byte: u8) -> Self {
        u16::from(byte)
    }

    #[inline]
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self).ok().filter(u8::is_ascii)
    }

    fn push_str(out: &mut Vec<Self>, s: &str) {
        out.extend(s.encode_utf16());
    }

    fn push_code(out: &mut Vec<Self>, code: u64) {
        out.push((code & 0xFFFF) as u16);
    }

    fn write_to(console: &mut dyn Console, units: &[Self]) -> Result<()> {
        console.write_wide(units)
    }

    fn to_string_lossy(units: &[Self]) -> String {
        String::from_utf16_lossy(units)
    }
}

/// Encode a string as wide (UTF-16) text
pub fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// The part of `units` before the first NUL
pub fn until_nul<C: CodeUnit>(units: &[C]) -> &[C] {
    match units.iter().position(|u| u.is_nul()) {
        Some(end) => &units[..end],
        None => units,
    }
}
