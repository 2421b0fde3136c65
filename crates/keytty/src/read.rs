use std::collections::BTreeSet;
use std::io::{stderr, stdout, Read, Stdout, Write};

use crate::api::Device;
use crate::err::{should_retry, Error, ErrorKind};
use crate::opt::{Options, Volume};
use crate::raw::RawMode;
use crate::sys::{RawInput, Terminal};
use crate::util::nicely_str;
use crate::utf8::{char_width, decode_char, is_continuation};

/// The characters acceptable as keystroke.
///
/// # Example
///
/// ```
/// # use keytty::Accept;
/// let yes_no = Accept::only(['y', 'n']);
/// assert!(yes_no.accepts('y'));
/// assert!(!yes_no.accepts('q'));
///
/// let digits: Accept = ('0'..='9').collect();
/// assert!(digits.accepts('7'));
///
/// assert!(Accept::Any.accepts('q'));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Accept {
    /// Accept the first character.
    #[default]
    Any,
    /// Accept only characters in the set, silently discarding all others.
    Only(BTreeSet<char>),
}

impl Accept {
    /// Accept only the given characters.
    pub fn only<I: IntoIterator<Item = char>>(chars: I) -> Self {
        Self::Only(chars.into_iter().collect())
    }

    /// Determine whether the character is acceptable.
    pub fn accepts(&self, c: char) -> bool {
        match self {
            Self::Any => true,
            Self::Only(chars) => chars.contains(&c),
        }
    }

    /// Determine whether no character is acceptable.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Any => false,
            Self::Only(chars) => chars.is_empty(),
        }
    }
}

impl FromIterator<char> for Accept {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::only(iter)
    }
}

// ------------------------------------------------------------------------------------------------

/// A reader that tolerates interruptions.
#[derive(Debug)]
pub(crate) struct DoggedReader<R> {
    inner: R,
    interrupts: usize,
}

impl<R> DoggedReader<R> {
    /// Create a new dogged reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            interrupts: 0,
        }
    }

    /// Get the number of interruptions since the last call.
    pub fn take_interrupts(&mut self) -> usize {
        std::mem::take(&mut self.interrupts)
    }
}

impl<R: Read> Read for DoggedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            let result = self.inner.read(buf);
            if should_retry(&result) {
                self.interrupts += 1;
                continue;
            }
            return result;
        }
    }
}

/// Read the next character.
///
/// This function reads one byte at a time, so that it consumes no bytes
/// beyond the character. It also stops at the first byte that does not
/// continue a multi-byte character, so that a malformed character consumes
/// at most one keystroke past its first byte.
fn next_char<R: Read>(input: &mut R) -> Result<(char, [u8; 4], usize), Error> {
    let mut buffer = [0; 4];

    fn fill<R: Read>(input: &mut R, slot: &mut [u8]) -> Result<(), Error> {
        match input.read(slot)? {
            0 => Err(ErrorKind::EndOfInput.into()),
            _ => Ok(()),
        }
    }

    fill(input, &mut buffer[..1])?;
    let width = char_width(buffer[0]);
    if width == 0 {
        return Err(ErrorKind::MalformedUtf8.into());
    }

    for index in 1..width {
        fill(input, &mut buffer[index..=index])?;
        if !is_continuation(buffer[index]) {
            return Err(ErrorKind::MalformedUtf8.into());
        }
    }

    let c = decode_char(&buffer[..width]).ok_or(ErrorKind::MalformedUtf8)?;
    Ok((c, buffer, width))
}

// ------------------------------------------------------------------------------------------------

/// A reader of single keystrokes.
///
/// A key reader combines a terminal [`Device`], an input to read characters
/// from, and an output to write prompts to. For the terminal connected to
/// standard input, use [`KeyReader::stdio`]. Other devices, inputs, and
/// outputs are mostly useful for testing.
///
/// Each call to [`KeyReader::read_char`] switches the device to rare mode (or
/// raw mode, depending on [`Options::mode`]), reads until an acceptable
/// character arrives, and restores the device's configuration before
/// returning, no matter how reading ends. Restoration also discards any input
/// typed after the accepted character.
///
/// Diagnostics, if enabled with [`Options::volume`], are written to standard
/// error.
#[derive(Debug)]
pub struct KeyReader<D, R, W> {
    options: Options,
    device: D,
    input: DoggedReader<R>,
    output: W,
}

impl KeyReader<Terminal, RawInput, Stdout> {
    /// Create a new key reader for standard input and output with the default
    /// options.
    pub fn stdio() -> Self {
        Self::stdio_with_options(Options::default())
    }

    /// Create a new key reader for standard input and output with the given
    /// options.
    pub fn stdio_with_options(options: Options) -> Self {
        let terminal = Terminal::stdin();
        let input = terminal.input();
        Self::with_options(options, terminal, input, stdout())
    }
}

impl<D: Device, R: Read, W: Write> KeyReader<D, R, W> {
    /// Create a new key reader with the default options.
    pub fn new(device: D, input: R, output: W) -> Self {
        Self::with_options(Options::default(), device, input, output)
    }

    /// Create a new key reader with the given options.
    pub fn with_options(options: Options, device: D, input: R, output: W) -> Self {
        Self {
            options,
            device,
            input: DoggedReader::new(input),
            output,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Read one acceptable character.
    ///
    /// If the prompt is not empty, this method writes it to the output before
    /// reading and a newline after reading, flushing both. It then reads
    /// characters from the input until one is acceptable. Unacceptable
    /// characters are discarded silently. Since the terminal does not echo
    /// input, the user sees no trace of them either. Interrupted reads are
    /// retried.
    ///
    /// # Errors
    ///
    /// This method fails with
    ///
    ///   * [`ErrorKind::NothingAccepted`] if the set of acceptable characters
    ///     is empty, before touching the terminal;
    ///   * [`ErrorKind::TerminalControl`] if the terminal cannot be switched to
    ///     rare or raw mode, e.g., because the input is not a terminal, in
    ///     which case the terminal is unchanged;
    ///   * [`ErrorKind::EndOfInput`], [`ErrorKind::MalformedUtf8`], or
    ///     [`ErrorKind::Unreadable`] if reading input or writing the prompt
    ///     fails, after restoring the terminal;
    ///   * [`ErrorKind::Restore`] if restoring the terminal fails, even if
    ///     reading failed as well, since the terminal may be left in raw mode.
    pub fn read_char(&mut self, prompt: &str, accept: &Accept) -> Result<char, Error> {
        if accept.is_empty() {
            return Err(ErrorKind::NothingAccepted.into());
        }

        let Self {
            options,
            device,
            input,
            output,
        } = self;

        let raw = RawMode::enter(device, options.mode())?;
        let pid = std::process::id();
        log(options, Volume::Regular, format_args!("keytty::enter pid={}", pid));
        log(options, Volume::Detailed, format_args!("keytty::snapshot {:?}", raw));

        let result = prompt_and_read(options, input, output, prompt, accept);

        let restored = raw.restore();
        log(
            options,
            Volume::Regular,
            format_args!("{} pid={}", restore_event(&restored), pid),
        );
        if let Err(error) = restored {
            if let Err(ref lost) = result {
                log(options, Volume::Regular, format_args!("keytty::lost {}", lost));
            }
            return Err(error);
        }

        let c = result?;
        if !prompt.is_empty() {
            output.write_all(b"\n")?;
            output.flush()?;
        }

        Ok(c)
    }

    /// Consume this key reader and return its device, input, and output.
    pub fn into_inner(self) -> (D, R, W) {
        (self.device, self.input.inner, self.output)
    }
}

/// Write the prompt and read the first acceptable character.
fn prompt_and_read<R: Read, W: Write>(
    options: &Options,
    input: &mut DoggedReader<R>,
    output: &mut W,
    prompt: &str,
    accept: &Accept,
) -> Result<char, Error> {
    if !prompt.is_empty() {
        output.write_all(prompt.as_bytes())?;
        output.flush()?;
    }

    loop {
        let outcome = next_char(input);
        let interrupts = input.take_interrupts();
        if 0 < interrupts {
            log(
                options,
                Volume::Detailed,
                format_args!("keytty::retry interrupts={}", interrupts),
            );
        }

        let (c, bytes, width) = outcome?;
        if accept.accepts(c) {
            return Ok(c);
        }

        log(
            options,
            Volume::Detailed,
            format_args!("keytty::discard {}", nicely_str(&bytes[..width])),
        );
    }
}

/// Name the log event for the outcome of restoring the terminal.
fn restore_event(restored: &Result<(), Error>) -> &'static str {
    if restored.is_ok() {
        "keytty::restore"
    } else {
        "keytty::restore failed"
    }
}

/// Log the message to standard error, if the volume is at least as loud as
/// the given one.
fn log(options: &Options, volume: Volume, message: std::fmt::Arguments<'_>) {
    let enabled = match volume {
        Volume::Silent => false,
        Volume::Regular => options.verbose(),
        Volume::Detailed => options.volume() == Volume::Detailed,
    };

    if enabled {
        let _ = writeln!(stderr(), "{}", message);
    }
}

/// Read one acceptable character from standard input.
///
/// This function is a shortcut for [`KeyReader::stdio`] followed by
/// [`KeyReader::read_char`]. See the latter for details and errors.
///
/// # Example
///
/// ```no_run
/// # use keytty::{read_char, Accept};
/// let answer = read_char("Continue? (y/n): ", &Accept::only(['y', 'n']))?;
/// if answer == 'n' {
///     return Ok(());
/// }
/// # Ok::<(), keytty::err::Error>(())
/// ```
pub fn read_char(prompt: &str, accept: &Accept) -> Result<char, Error> {
    KeyReader::stdio().read_char(prompt, accept)
}

// ------------------------------------------------------------------------------------------------
