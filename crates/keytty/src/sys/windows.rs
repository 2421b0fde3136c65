use std::ffi::c_void;
use std::io::{stdin, Read, Result};
use std::os::windows::io::AsRawHandle;
use std::ptr::{from_mut, null};

use windows_sys::Win32::Globalization;
use windows_sys::Win32::System::Console::{self, CONSOLE_MODE as ConsoleMode};

use super::util::{IdentList, IntoResult};
use super::RawHandle;
use crate::api::Device;
use crate::opt::Mode;

// ----------------------------------------------------------------------------------------------------------

/// A terminal device, i.e., the console's standard input.
///
/// This type only stores the handle. It neither owns nor closes it.
#[derive(Clone, Copy, Debug)]
pub struct Terminal {
    handle: RawHandle,
}

impl Terminal {
    /// Access the console connected to standard input.
    ///
    /// This method does not check whether standard input actually is a
    /// console. If it isn't, the first [`Device`] operation fails.
    pub fn stdin() -> Self {
        Self {
            handle: stdin().as_raw_handle(),
        }
    }

    /// Get an unbuffered reader for the console's input.
    #[inline]
    pub fn input(&self) -> RawInput {
        RawInput::new(self.handle)
    }
}

// SAFETY: Windows HANDLE is defined as a *mut c_void but console handles are
// thread-safe. In fact, Rust's standard library [implements `Send` and
// `Sync`](https://github.com/rust-lang/rust/blob/8e37e151835d96d6a7415e93e6876561485a3354/library/std/src/os/windows/io/handle.rs#L111),
// for wrapped handles, too.
unsafe impl Send for Terminal {}

impl Device for Terminal {
    type Snapshot = Config;

    fn snapshot(&mut self) -> Result<Config> {
        Config::read(self.handle)
    }

    fn enter(&mut self, snapshot: &Config, mode: Mode) -> Result<()> {
        // Consoles have no file status flags, so there is nothing else to
        // write back.
        snapshot.apply(mode).write(self.handle)
    }

    fn restore(&mut self, snapshot: &Config) -> Result<()> {
        let result1 = snapshot.write(self.handle);
        // SAFETY: FlushConsoleInputBuffer only discards pending input events.
        let result2 = unsafe { Console::FlushConsoleInputBuffer(self.handle) }.into_result();
        result1.and(result2.map(|_| ()))
    }
}

// ----------------------------------------------------------------------------------------------------------

/// A console configuration.
///
/// Besides the input mode, the configuration includes the input code page.
/// While reading keystrokes, the code page is UTF-8, since the reader decodes
/// the bytes returned by `ReadConsoleA` as UTF-8.
#[derive(Clone, Copy)]
pub struct Config {
    input_mode: ConsoleMode,
    input_encoding: u32,
}

impl Config {
    /// Read the configuration of the console with the given input handle.
    fn read(handle: RawHandle) -> Result<Self> {
        let mut input_mode = 0;
        // SAFETY: GetConsoleMode only writes the mode.
        unsafe { Console::GetConsoleMode(handle, from_mut(&mut input_mode)) }.into_result()?;
        // SAFETY: GetConsoleCP has no arguments and only reads process state.
        let input_encoding = unsafe { Console::GetConsoleCP() }.into_result()?;

        Ok(Self {
            input_mode,
            input_encoding,
        })
    }

    /// Apply the mode to create a new configuration.
    fn apply(&self, mode: Mode) -> Self {
        let mut input_mode =
            self.input_mode & !(Console::ENABLE_LINE_INPUT | Console::ENABLE_ECHO_INPUT);
        if mode == Mode::Raw {
            input_mode &= !Console::ENABLE_PROCESSED_INPUT;
        }

        Self {
            input_mode,
            input_encoding: Globalization::CP_UTF8,
        }
    }

    /// Write this configuration to the console with the given input handle.
    ///
    /// This method tries to update both input mode and code page, even if
    /// the first update fails.
    fn write(&self, handle: RawHandle) -> Result<()> {
        // SAFETY: SetConsoleMode only reads the mode.
        let result1 = unsafe { Console::SetConsoleMode(handle, self.input_mode) }.into_result();
        // SAFETY: SetConsoleCP only updates the process's console state.
        let result2 = unsafe { Console::SetConsoleCP(self.input_encoding) }.into_result();

        result1.and(result2)?;
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input_mode = IdentList::of_flags(
            self.input_mode,
            &[
                ("ENABLE_ECHO_INPUT", Console::ENABLE_ECHO_INPUT),
                ("ENABLE_INSERT_MODE", Console::ENABLE_INSERT_MODE),
                ("ENABLE_LINE_INPUT", Console::ENABLE_LINE_INPUT),
                ("ENABLE_MOUSE_INPUT", Console::ENABLE_MOUSE_INPUT),
                ("ENABLE_PROCESSED_INPUT", Console::ENABLE_PROCESSED_INPUT),
                ("ENABLE_QUICK_EDIT_MODE", Console::ENABLE_QUICK_EDIT_MODE),
                ("ENABLE_WINDOW_INPUT", Console::ENABLE_WINDOW_INPUT),
                ("ENABLE_VIRTUAL_TERMINAL_INPUT", Console::ENABLE_VIRTUAL_TERMINAL_INPUT),
            ],
        );

        f.debug_struct("Config")
            .field("input_mode", &input_mode)
            .field("input_encoding", &self.input_encoding)
            .finish()
    }
}

// ----------------------------------------------------------------------------------------------------------

/// Raw unbuffered console input.
#[derive(Debug)]
pub struct RawInput {
    handle: RawHandle,
}

impl RawInput {
    #[inline]
    fn new(handle: RawHandle) -> Self {
        Self { handle }
    }
}

// SAFETY: See Terminal above.
unsafe impl Send for RawInput {}

impl Read for RawInput {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut did_read: u32 = 0;
        // SAFETY: ReadConsoleA writes at most buf.len() bytes into buf.
        unsafe {
            Console::ReadConsoleA(
                self.handle,
                buf.as_mut_ptr().cast::<c_void>(),
                buf.len() as u32,
                from_mut(&mut did_read),
                null(),
            )
        }
        .into_result()?;
        Ok(did_read as usize)
    }
}

// ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::{Config, Console, Globalization};
    use crate::opt::Mode;

    #[test]
    fn test_apply_mode() {
        let cooked = Config {
            input_mode: Console::ENABLE_ECHO_INPUT
                | Console::ENABLE_LINE_INPUT
                | Console::ENABLE_PROCESSED_INPUT,
            input_encoding: 1252,
        };

        let rare = cooked.apply(Mode::Rare);
        assert_eq!(rare.input_mode, Console::ENABLE_PROCESSED_INPUT);
        assert_eq!(rare.input_encoding, Globalization::CP_UTF8);

        let raw = cooked.apply(Mode::Raw);
        assert_eq!(raw.input_mode, 0);
        assert_eq!(raw.input_encoding, Globalization::CP_UTF8);

        assert_eq!(
            format!("{:?}", rare),
            "Config { input_mode: [ENABLE_PROCESSED_INPUT], input_encoding: 65001 }"
        );
        assert_eq!(cooked.input_encoding, 1252);
    }
}
