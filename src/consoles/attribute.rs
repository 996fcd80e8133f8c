//! Attribute-based console implementation (Windows)

use crate::core::{Color, ColorSpec, Console, LoggerError, Palette, Result, StreamMode};
use std::io::{self, Stdout, Write};
use std::sync::OnceLock;
use windows_sys::Win32::System::Console::{
    GetConsoleScreenBufferInfo, GetStdHandle, SetConsoleTextAttribute, WriteConsoleA,
    CONSOLE_SCREEN_BUFFER_INFO, STD_OUTPUT_HANDLE,
};

/// Light gray on black, used when the console cannot be queried
const FALLBACK_ATTRIBUTES: u16 = 0x7;

/// Text attributes currently set on the standard output console, or `None`
/// when standard output is not a console.
pub fn current_attributes() -> Option<u16> {
    // SAFETY: `info` is a plain-old-data out parameter owned by this frame
    // and GetStdHandle returns a process-owned handle that is never closed.
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = std::mem::zeroed();
        (GetConsoleScreenBufferInfo(handle, &mut info) != 0).then_some(info.wAttributes)
    }
}

/// Attribute palette whose reset value is the console's appearance when the
/// first `AttributeConsole` was created.
fn shared_palette() -> &'static Palette {
    static PALETTE: OnceLock<Palette> = OnceLock::new();
    PALETTE.get_or_init(|| Palette::attributes(current_attributes().unwrap_or(FALLBACK_ATTRIBUTES)))
}

/// Console that colors text by setting text attributes on the standard
/// output console. Color changes are global console state.
pub struct AttributeConsole {
    stdout: Stdout,
    palette: &'static Palette,
    mode: StreamMode,
}

impl AttributeConsole {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            palette: shared_palette(),
            mode: StreamMode::default(),
        }
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    fn write_bytes(&mut self, bytes: &[u8], what: &str) -> Result<()> {
        self.stdout
            .write_all(bytes)
            .map_err(|e| LoggerError::io_operation("writing to console", what, e))
    }

    /// Hand narrow bytes to the console as they are. The console shows them
    /// in its output code page, so bytes that are not UTF-8 are still text.
    fn write_code_page(&mut self, mut bytes: &[u8]) -> Result<()> {
        self.stdout.flush()?;
        while !bytes.is_empty() {
            let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
            let mut written = 0u32;
            // SAFETY: `bytes` outlives the call and `len` never exceeds it;
            // `written` is a local out parameter.
            let ok = unsafe {
                WriteConsoleA(
                    GetStdHandle(STD_OUTPUT_HANDLE),
                    bytes.as_ptr().cast(),
                    len,
                    &mut written,
                    std::ptr::null(),
                )
            };
            if ok == 0 || written == 0 {
                return Err(LoggerError::console(
                    self.name(),
                    format!("WriteConsoleA failed: {}", io::Error::last_os_error()),
                ));
            }
            bytes = &bytes[(written as usize).min(bytes.len())..];
        }
        Ok(())
    }
}

impl Default for AttributeConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for AttributeConsole {
    fn set_mode(&mut self, mode: StreamMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> StreamMode {
        self.mode
    }

    fn write_narrow(&mut self, text: &[u8]) -> Result<()> {
        // Console stdio rejects bytes that are not UTF-8; redirected output
        // takes them raw
        if current_attributes().is_some() {
            self.write_code_page(text)
        } else {
            self.write_bytes(text, "narrow text")
        }
    }

    fn write_wide(&mut self, text: &[u16]) -> Result<()> {
        let utf8 = String::from_utf16_lossy(text);
        self.write_bytes(utf8.as_bytes(), "wide text")
    }

    fn apply_color(&mut self, color: Color) -> Result<()> {
        let ColorSpec::Attribute(attribute) = *self.palette.get(color) else {
            return Ok(());
        };
        // Text written so far must reach the console under the old attribute
        self.stdout.flush()?;

        // SAFETY: plain FFI call on the process's standard output handle
        let ok = unsafe { SetConsoleTextAttribute(GetStdHandle(STD_OUTPUT_HANDLE), attribute) };
        if ok == 0 {
            return Err(LoggerError::console(
                self.name(),
                format!("SetConsoleTextAttribute failed: {}", io::Error::last_os_error()),
            ));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "attribute"
    }
}
