//! Console trait for log output destinations

use super::{code_unit::StreamMode, color::Color, error::Result};

/// A console stream the logger renders into.
///
/// Text and color changes arrive in rendering order. How a color is shown
/// (escape sequence in the stream, or a text attribute on the console) is up
/// to the implementation.
pub trait Console: Send {
    /// Switch the stream's encoding mode. The mode stays in effect until the
    /// next call; nothing restores the previous one.
    fn set_mode(&mut self, mode: StreamMode) -> Result<()>;

    fn mode(&self) -> StreamMode;

    fn write_narrow(&mut self, text: &[u8]) -> Result<()>;

    fn write_wide(&mut self, text: &[u16]) -> Result<()>;

    fn apply_color(&mut self, color: Color) -> Result<()>;

    fn reset_color(&mut self) -> Result<()> {
        self.apply_color(Color::Reset)
    }

    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}
