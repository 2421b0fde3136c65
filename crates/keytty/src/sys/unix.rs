use std::ffi::c_void;
use std::io::{stdin, Read, Result};
use std::os::fd::AsRawFd;
use std::ptr::{from_mut, from_ref};

use super::util::{IdentList, IntoResult};
use super::RawHandle;
use crate::api::Device;
use crate::opt::Mode;

// ----------------------------------------------------------------------------------------------------------

/// A terminal device, i.e., standard input.
///
/// This type only stores the file descriptor. It neither owns nor closes it.
#[derive(Clone, Copy, Debug)]
pub struct Terminal {
    handle: RawHandle,
}

impl Terminal {
    /// Access the terminal connected to standard input.
    ///
    /// This method does not check whether standard input actually is a
    /// terminal. If it isn't, the first [`Device`] operation fails.
    pub fn stdin() -> Self {
        Self::with_handle(stdin().as_raw_fd())
    }

    #[inline]
    pub(crate) fn with_handle(handle: RawHandle) -> Self {
        Self { handle }
    }

    /// Get an unbuffered reader for the terminal's input.
    #[inline]
    pub fn input(&self) -> RawInput {
        RawInput::new(self.handle)
    }
}

impl Device for Terminal {
    type Snapshot = Config;

    fn snapshot(&mut self) -> Result<Config> {
        Config::read(self.handle)
    }

    fn enter(&mut self, snapshot: &Config, mode: Mode) -> Result<()> {
        snapshot.apply(mode).write_attributes(self.handle, libc::TCSANOW)?;

        // Write back the status flags exactly as they are. In particular,
        // O_NONBLOCK is neither set nor cleared.
        let flags = read_flags(self.handle)?;
        write_flags(self.handle, flags)
    }

    fn restore(&mut self, snapshot: &Config) -> Result<()> {
        let result1 = snapshot.write_attributes(self.handle, libc::TCSAFLUSH);
        let result2 = write_flags(self.handle, snapshot.flags);
        result1.and(result2)
    }
}

fn read_flags(handle: RawHandle) -> Result<libc::c_int> {
    // SAFETY: F_GETFL takes no further arguments and only reads the flags.
    unsafe { libc::fcntl(handle, libc::F_GETFL) }.into_result()
}

fn write_flags(handle: RawHandle, flags: libc::c_int) -> Result<()> {
    // SAFETY: F_SETFL takes one int argument, which the call passes.
    unsafe { libc::fcntl(handle, libc::F_SETFL, flags) }.into_result()?;
    Ok(())
}

// ----------------------------------------------------------------------------------------------------------

/// A terminal configuration.
///
/// It comprises the terminal attributes as well as the file status flags of
/// the terminal's file descriptor.
#[derive(Clone, Copy)]
pub struct Config {
    state: libc::termios,
    flags: libc::c_int,
}

impl Config {
    /// Read the configuration.
    fn read(handle: RawHandle) -> Result<Self> {
        let mut state = std::mem::MaybeUninit::uninit();
        // SAFETY: tcgetattr only writes to the termios structure.
        unsafe { libc::tcgetattr(handle, state.as_mut_ptr()) }.into_result()?;
        // SAFETY: tcgetattr succeeded and hence initialized the structure.
        let state = unsafe { state.assume_init() };
        let flags = read_flags(handle)?;

        Ok(Self { state, flags })
    }

    /// Apply the mode to create a new configuration.
    fn apply(&self, mode: Mode) -> Self {
        let mut state = self.state;

        match mode {
            Mode::Rare => {
                state.c_lflag &= !(libc::ICANON | libc::ECHO);
            }
            Mode::Raw => {
                // SAFETY: cfmakeraw only updates the termios structure.
                unsafe { libc::cfmakeraw(from_mut(&mut state)) };
            }
        }

        Self {
            state,
            flags: self.flags,
        }
    }

    /// Write the terminal attributes, with TCSANOW or TCSAFLUSH as timing.
    fn write_attributes(&self, handle: RawHandle, when: libc::c_int) -> Result<()> {
        // SAFETY: tcsetattr only reads the termios structure.
        unsafe { libc::tcsetattr(handle, when, from_ref(&self.state)) }.into_result()?;
        Ok(())
    }

    /// Determine whether the line editor is enabled.
    #[cfg(test)]
    fn is_canonical(&self) -> bool {
        self.state.c_lflag & libc::ICANON != 0
    }

    /// Determine whether echo is enabled.
    #[cfg(test)]
    fn is_echoing(&self) -> bool {
        self.state.c_lflag & libc::ECHO != 0
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input_flags = IdentList::of_flags(
            self.state.c_iflag,
            &[
                ("BRKINT", libc::BRKINT),
                ("ICRNL", libc::ICRNL),
                ("IGNBRK", libc::IGNBRK),
                ("IGNCR", libc::IGNCR),
                ("INLCR", libc::INLCR),
                ("IXANY", libc::IXANY),
                ("IXOFF", libc::IXOFF),
                ("IXON", libc::IXON),
            ],
        );

        let output_flags = IdentList::of_flags(
            self.state.c_oflag,
            &[
                ("OPOST", libc::OPOST),
                ("OCRNL", libc::OCRNL),
                ("ONOCR", libc::ONOCR),
                ("ONLRET", libc::ONLRET),
            ],
        );

        let local_flags = IdentList::of_flags(
            self.state.c_lflag,
            &[
                ("ECHO", libc::ECHO),
                ("ECHOE", libc::ECHOE),
                ("ECHOK", libc::ECHOK),
                ("ECHONL", libc::ECHONL),
                ("ICANON", libc::ICANON),
                ("IEXTEN", libc::IEXTEN),
                ("ISIG", libc::ISIG),
                ("NOFLSH", libc::NOFLSH),
            ],
        );

        let status_flags = IdentList::of_flags(
            self.flags,
            &[
                ("O_APPEND", libc::O_APPEND),
                ("O_NONBLOCK", libc::O_NONBLOCK),
            ],
        );

        f.debug_struct("Config")
            .field("input", &input_flags)
            .field("output", &output_flags)
            .field("local", &local_flags)
            .field("status", &status_flags)
            .finish()
    }
}

// ----------------------------------------------------------------------------------------------------------

/// Raw unbuffered terminal input.
///
/// Every read is a system call. That way, reading one character consumes
/// exactly the bytes of that character and nothing else.
#[derive(Debug)]
pub struct RawInput {
    handle: RawHandle,
}

impl RawInput {
    fn new(handle: RawHandle) -> Self {
        Self { handle }
    }
}

impl Read for RawInput {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        // SAFETY: read writes at most buf.len() bytes into buf.
        unsafe {
            libc::read(
                self.handle,
                buf.as_mut_ptr().cast::<c_void>(),
                buf.len() as libc::size_t,
            )
        }
        .into_result()
    }
}

// ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::{read_flags, Config, RawHandle, Terminal};
    use crate::api::Device;
    use crate::opt::Mode;
    use crate::raw::RawMode;
    use crate::sys::util::IntoResult;
    use std::fs::File;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
    use std::ptr::{from_mut, null_mut};

    /// Open a pseudo-terminal, returning controller and terminal.
    fn open_pty() -> std::io::Result<(OwnedFd, OwnedFd)> {
        let mut controller = -1;
        let mut terminal = -1;
        // SAFETY: openpty only writes the two descriptors; all other
        // arguments are optional and null.
        unsafe {
            libc::openpty(
                from_mut(&mut controller),
                from_mut(&mut terminal),
                null_mut(),
                null_mut(),
                null_mut(),
            )
        }
        .into_result()?;

        // SAFETY: openpty succeeded, so both descriptors are open and owned
        // by nobody else.
        let controller = unsafe { OwnedFd::from_raw_fd(controller) };
        // SAFETY: Ditto.
        let terminal = unsafe { OwnedFd::from_raw_fd(terminal) };
        Ok((controller, terminal))
    }

    /// Determine the number of bytes waiting to be read.
    fn pending(handle: RawHandle) -> std::io::Result<libc::c_int> {
        let mut count: libc::c_int = 0;
        // SAFETY: FIONREAD only writes the count.
        unsafe { libc::ioctl(handle, libc::FIONREAD, from_mut(&mut count)) }.into_result()?;
        Ok(count)
    }

    /// Wait for up to a second until the given number of bytes is pending.
    fn await_pending(handle: RawHandle, count: libc::c_int) -> std::io::Result<libc::c_int> {
        for _ in 0..100 {
            let actual = pending(handle)?;
            if count <= actual {
                return Ok(actual);
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        pending(handle)
    }

    fn assert_same_attributes(actual: &Config, expected: &Config) {
        assert_eq!(actual.state.c_iflag, expected.state.c_iflag);
        assert_eq!(actual.state.c_oflag, expected.state.c_oflag);
        assert_eq!(actual.state.c_cflag, expected.state.c_cflag);
        assert_eq!(actual.state.c_lflag, expected.state.c_lflag);
        assert_eq!(actual.state.c_cc, expected.state.c_cc);
        assert_eq!(actual.flags, expected.flags);
    }

    #[test]
    fn test_not_a_terminal() -> std::io::Result<()> {
        let file = File::open("/dev/null")?;
        let mut terminal = Terminal::with_handle(file.as_raw_fd());

        let error = terminal.snapshot().unwrap_err();
        assert_eq!(error.raw_os_error(), Some(libc::ENOTTY));
        Ok(())
    }

    #[test]
    fn test_apply_mode() {
        // SAFETY: termios is a plain C structure and all zeros is valid.
        let mut state: libc::termios = unsafe { std::mem::zeroed() };
        state.c_lflag = libc::ICANON | libc::ECHO | libc::ISIG;
        state.c_iflag = libc::ICRNL;
        let config = Config { state, flags: 0 };
        assert!(config.is_canonical());
        assert!(config.is_echoing());

        let rare = config.apply(Mode::Rare);
        assert!(!rare.is_canonical());
        assert!(!rare.is_echoing());
        assert_eq!(rare.state.c_lflag, libc::ISIG);
        assert_eq!(rare.state.c_iflag, libc::ICRNL);
        assert_eq!(rare.flags, config.flags);

        let raw = config.apply(Mode::Raw);
        assert!(!raw.is_canonical());
        assert!(!raw.is_echoing());
        assert_eq!(raw.state.c_lflag & libc::ISIG, 0);

        // The original snapshot is unchanged.
        assert!(config.is_canonical());
        assert_eq!(
            format!("{:?}", config),
            "Config { input: [ICRNL], output: [], local: [ECHO, ICANON, ISIG], status: [] }"
        );
    }

    #[test]
    fn test_pty_round_trip() -> std::io::Result<()> {
        let (controller, tty) = open_pty()?;
        let handle = tty.as_raw_fd();
        let mut terminal = Terminal::with_handle(handle);

        let before = terminal.snapshot()?;
        assert!(before.is_canonical());
        assert!(before.is_echoing());

        let raw = RawMode::enter(&mut terminal, Mode::Rare)?;

        let during = Config::read(handle)?;
        assert!(!during.is_canonical());
        assert!(!during.is_echoing());
        assert_ne!(during.state.c_lflag & libc::ISIG, 0);
        assert_eq!(
            during.state.c_lflag,
            before.state.c_lflag & !(libc::ICANON | libc::ECHO)
        );
        assert_eq!(during.state.c_iflag, before.state.c_iflag);
        assert_eq!(during.flags, before.flags);

        let keys = b"xy";
        // SAFETY: write only reads the given bytes.
        let written = unsafe {
            libc::write(
                controller.as_raw_fd(),
                keys.as_ptr().cast::<libc::c_void>(),
                keys.len(),
            )
        }
        .into_result()?;
        assert_eq!(written, keys.len());
        assert_eq!(await_pending(handle, 2)?, 2);

        raw.restore()?;

        // Restoration discards pending input.
        assert_eq!(pending(handle)?, 0);
        let after = Config::read(handle)?;
        assert_same_attributes(&after, &before);
        assert_eq!(read_flags(handle)?, before.flags);
        Ok(())
    }
}
