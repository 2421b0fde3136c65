//! Helper module with this crate's error type.
//!
//! Keystroke errors complement I/O errors by identifying which step of reading
//! a keystroke failed. That matters because only some failures leave the
//! terminal in raw mode. They seamlessly convert to I/O errors.

use std::io::Write;

use crate::style::Style;

/// The enumeration of error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or updating the terminal configuration failed before the
    /// terminal was left in raw mode, usually because input is not a terminal.
    TerminalControl,
    /// Restoring the terminal configuration failed, so the terminal may still
    /// be in raw mode.
    Restore,
    /// The input ended before an acceptable character arrived.
    EndOfInput,
    /// A malformed UTF-8 character.
    MalformedUtf8,
    /// The set of acceptable characters is empty.
    NothingAccepted,
    /// An error reading input or writing the prompt.
    Unreadable,
}

impl ErrorKind {
    /// Turn the error kind to an error message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TerminalControl => "could not configure terminal for reading keystrokes",
            Self::Restore => "could not restore terminal configuration",
            Self::EndOfInput => "input ended before an acceptable keystroke",
            Self::MalformedUtf8 => "malformed UTF-8",
            Self::NothingAccepted => "set of acceptable characters is empty",
            Self::Unreadable => "error reading keystroke",
        }
    }
}

impl From<ErrorKind> for std::io::Error {
    fn from(value: ErrorKind) -> Self {
        Error::from(value).into()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind, source: None }
    }
}

/// A keystroke error.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<std::io::Error>,
}

impl Error {
    /// Create a new terminal control error.
    pub fn terminal_control(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::TerminalControl,
            source: Some(source),
        }
    }

    /// Create a new restore error.
    pub fn restore(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Restore,
            source: Some(source),
        }
    }

    /// Create a new unreadable error.
    pub fn unreadable(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Unreadable,
            source: Some(source),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.as_str())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|error| error as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::unreadable(value)
    }
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        use self::ErrorKind::*;

        match value.kind {
            EndOfInput => Self::new(std::io::ErrorKind::UnexpectedEof, value),
            MalformedUtf8 => Self::new(std::io::ErrorKind::InvalidData, value),
            NothingAccepted => Self::new(std::io::ErrorKind::InvalidInput, value),
            TerminalControl | Restore | Unreadable => {
                let kind = value
                    .source
                    .as_ref()
                    .map_or(std::io::ErrorKind::Other, std::io::Error::kind);
                Self::new(kind, value)
            }
        }
    }
}

/// Determine whether an operation should be retried.
///
/// Only interrupted operations are retried. Keystroke reads block without
/// timeout, so a timed out read is a genuine error.
pub fn should_retry<T>(result: &std::io::Result<T>) -> bool {
    matches!(result, Err(err) if err.kind() == std::io::ErrorKind::Interrupted)
}

/// Report the error, including any sources, on standard error.
pub fn report<E: std::error::Error>(error: &E) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(
        stderr,
        "{}{}ERROR: {}{}",
        Style::BOLD,
        Style::FAIL,
        error,
        Style::ENDC
    );

    let mut error: &dyn std::error::Error = error;
    while let Some(inner) = error.source() {
        let _ = writeln!(stderr, "    {}", inner);
        error = inner;
    }
}
