//! Helper module with the options for reading keystrokes.
//!
//! This module provides the options for a [`KeyReader`](crate::KeyReader) and
//! the corresponding builder.
//!
//!
//! # Example
//!
//! ```
//! # use keytty::opt::{Mode, Options, Volume};
//! let options = Options::builder()
//!     .mode(Mode::Raw)
//!     .volume(Volume::Regular)
//!     .build();
//!
//! assert_eq!(options.mode(), Mode::Raw);
//! assert_eq!(options.volume(), Volume::Regular);
//! ```

/// The diagnostic logging volume.
///
/// Diagnostics are written to standard error, leaving standard output to the
/// prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Volume {
    /// No diagnostics at all.
    #[default]
    Silent,
    /// Log entering and leaving raw mode.
    Regular,
    /// Also log terminal configurations, discarded characters, and retried
    /// interruptions.
    Detailed,
}

/// A terminal mode for reading keystrokes.
///
///   * __Rare mode__, also called cbreak mode, disables the line editor and
///     echo but leaves all other terminal features untouched, including the
///     processing of control-c into a signal. This is the default.
///
///   * __Raw mode__ disables all features beyond character-based I/O. Control
///     characters such as control-c are delivered as keystrokes. Use with
///     care, since the only way out of a prompt with a restricted set of
///     acceptable characters is to type one of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Rare or cbreak mode.
    #[default]
    Rare,
    /// Raw mode.
    Raw,
}

#[derive(Clone, Debug)]
struct OptionData {
    volume: Volume,
    mode: Mode,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            volume: Volume::Silent,
            mode: Mode::Rare,
        }
    }
}

/// A builder of options objects.
#[derive(Debug)]
pub struct OptionBuilder(OptionData);

impl OptionBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Set rare or raw mode.
    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.0.mode = mode;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> Options {
        Options(self.0.clone())
    }
}

/// An options object.
#[derive(Clone, Debug)]
pub struct Options(OptionData);

impl Default for Options {
    fn default() -> Self {
        Options(OptionData::new())
    }
}

impl Options {
    /// Create a new builder with the default option values.
    pub fn builder() -> OptionBuilder {
        OptionBuilder(OptionData::new())
    }

    /// Instantiate the default options but with regular debugging output
    /// enabled.
    pub fn with_log() -> Options {
        Self::builder().volume(Volume::Regular).build()
    }

    /// Instantiate the default options but with detailed debugging output
    /// enabled.
    pub fn with_detailed_log() -> Options {
        Self::builder().volume(Volume::Detailed).build()
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Determine whether any diagnostics are enabled.
    pub fn verbose(&self) -> bool {
        self.0.volume != Volume::Silent
    }

    /// Get the terminal mode.
    pub fn mode(&self) -> Mode {
        self.0.mode
    }
}

#[cfg(test)]
mod test {
    use super::{Mode, Options, Volume};

    #[test]
    fn test_options() {
        let options = Options::default();
        assert_eq!(options.volume(), Volume::Silent);
        assert_eq!(options.mode(), Mode::Rare);
        assert!(!options.verbose());

        let options = Options::with_log();
        assert_eq!(options.volume(), Volume::Regular);
        assert!(options.verbose());
        assert_eq!(Options::with_detailed_log().volume(), Volume::Detailed);

        let mut builder = Options::builder();
        builder.mode(Mode::Raw);
        let raw = builder.build();
        let detailed = builder.volume(Volume::Detailed).build();
        assert_eq!(raw.mode(), Mode::Raw);
        assert_eq!(raw.volume(), Volume::Silent);
        assert_eq!(detailed.mode(), Mode::Raw);
        assert_eq!(detailed.volume(), Volume::Detailed);
    }
}
