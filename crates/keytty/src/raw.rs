use crate::api::Device;
use crate::err::Error;
use crate::opt::Mode;

/// A terminal device in rare or raw mode.
///
/// This guard is the only way of changing a device's configuration. Entering
/// takes a snapshot of the current configuration and then installs the mode.
/// Leaving restores the snapshot, either explicitly with
/// [`RawMode::restore`], which reports failure, or implicitly when the guard
/// is dropped, e.g., while unwinding from a panic, which ignores failure.
/// Either way, the snapshot is restored exactly once.
///
///
/// # Example
///
/// ```no_run
/// # use keytty::{opt::Mode, RawMode, Terminal};
/// let mut terminal = Terminal::stdin();
/// let raw = RawMode::enter(&mut terminal, Mode::Rare)?;
/// // Read keystrokes without line editing and echo...
/// raw.restore()?;
/// # Ok::<(), keytty::err::Error>(())
/// ```
pub struct RawMode<'a, D: Device> {
    device: &'a mut D,
    snapshot: Option<D::Snapshot>,
}

impl<'a, D: Device> RawMode<'a, D> {
    /// Put the device into the given mode.
    ///
    /// If this method fails, the device's configuration is unchanged. When
    /// installing the new configuration fails midway, this method makes a
    /// best effort to restore the snapshot before returning the error.
    ///
    /// # Errors
    ///
    /// This method returns a [`TerminalControl`](crate::err::ErrorKind)
    /// error if the device fails to take a snapshot or to enter the mode.
    pub fn enter(device: &'a mut D, mode: Mode) -> Result<Self, Error> {
        let snapshot = device.snapshot().map_err(Error::terminal_control)?;
        if let Err(error) = device.enter(&snapshot, mode) {
            let _ = device.restore(&snapshot);
            return Err(Error::terminal_control(error));
        }

        Ok(Self {
            device,
            snapshot: Some(snapshot),
        })
    }

    /// Restore the device's original configuration.
    ///
    /// # Errors
    ///
    /// This method returns a [`Restore`](crate::err::ErrorKind) error if the
    /// device fails to restore the snapshot. The terminal may be left in raw
    /// mode, so the caller should alert the user or reset the terminal.
    pub fn restore(mut self) -> Result<(), Error> {
        self.restore_once().map_err(Error::restore)
    }

    fn restore_once(&mut self) -> std::io::Result<()> {
        match self.snapshot.take() {
            Some(snapshot) => self.device.restore(&snapshot),
            None => Ok(()),
        }
    }
}

impl<D: Device> Drop for RawMode<'_, D> {
    fn drop(&mut self) {
        // Map instead of unwrap so that we don't panic in drop.
        let _ = self.restore_once();
    }
}

impl<D: Device> std::fmt::Debug for RawMode<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawMode")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
