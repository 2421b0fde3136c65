use std::io::Result;

use crate::opt::Mode;

/// A terminal device whose input configuration can be saved, changed, and
/// restored.
///
/// A device's configuration is process-wide state. It is changed by
/// [`RawMode`](crate::RawMode) only, which pairs every change with exactly one
/// restoration. [`Terminal`](crate::Terminal) implements this trait for
/// standard input; other implementations are mostly useful for testing.
pub trait Device {
    /// A snapshot of the terminal configuration.
    type Snapshot: std::fmt::Debug;

    /// Read the current configuration.
    ///
    /// This method must not change the terminal configuration.
    fn snapshot(&mut self) -> Result<Self::Snapshot>;

    /// Switch to the given mode, effective immediately.
    ///
    /// The snapshot is the configuration read just before. Implementations
    /// start from the snapshot and only clear the flags required by the mode.
    fn enter(&mut self, snapshot: &Self::Snapshot, mode: Mode) -> Result<()>;

    /// Restore the snapshot.
    ///
    /// Restoration discards any input that was received but not yet read.
    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<()>;
}

/// A mutably borrowed device is a device.
impl<D: Device + ?Sized> Device for &mut D {
    type Snapshot = D::Snapshot;

    fn snapshot(&mut self) -> Result<Self::Snapshot> {
        (**self).snapshot()
    }

    fn enter(&mut self, snapshot: &Self::Snapshot, mode: Mode) -> Result<()> {
        (**self).enter(snapshot, mode)
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<()> {
        (**self).restore(snapshot)
    }
}
