use std::collections::VecDeque;
use std::io::{Error, ErrorKind, Read, Result};

use crate::api::Device;
use crate::opt::Mode;

/// The observable configuration of a fake terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FakeConfig {
    pub canonical: bool,
    pub echo: bool,
    pub signals: bool,
    pub flags: i32,
}

impl Default for FakeConfig {
    fn default() -> Self {
        Self {
            canonical: true,
            echo: true,
            signals: true,
            flags: 0o2,
        }
    }
}

/// A fake terminal device that records its operations and fails on demand.
#[derive(Debug, Default)]
pub(crate) struct FakeDevice {
    pub config: FakeConfig,
    pub operations: Vec<&'static str>,
    pub fail_snapshot: bool,
    pub fail_enter: bool,
    pub fail_restore: bool,
}

impl FakeDevice {
    pub fn restorations(&self) -> usize {
        self.operations.iter().filter(|op| **op == "restore").count()
    }
}

impl Device for FakeDevice {
    type Snapshot = FakeConfig;

    fn snapshot(&mut self) -> Result<FakeConfig> {
        self.operations.push("snapshot");
        if self.fail_snapshot {
            return Err(Error::from_raw_os_error(25));
        }
        Ok(self.config)
    }

    fn enter(&mut self, snapshot: &FakeConfig, mode: Mode) -> Result<()> {
        self.operations.push("enter");
        self.config = FakeConfig {
            canonical: false,
            echo: false,
            signals: mode == Mode::Rare && snapshot.signals,
            flags: snapshot.flags,
        };
        if self.fail_enter {
            return Err(ErrorKind::PermissionDenied.into());
        }
        Ok(())
    }

    fn restore(&mut self, snapshot: &FakeConfig) -> Result<()> {
        self.operations.push("restore");
        if self.fail_restore {
            return Err(ErrorKind::PermissionDenied.into());
        }
        self.config = *snapshot;
        Ok(())
    }
}

/// A step of scripted input.
#[derive(Debug)]
pub(crate) enum Step {
    Bytes(&'static [u8]),
    Interrupt,
    Fail(ErrorKind),
}

/// A reader that replays a script of bytes and errors.
///
/// Each read returns at most one byte, an interruption, or an error. Once the
/// script is exhausted, reads return end of input.
#[derive(Debug)]
pub(crate) struct ScriptedReader {
    steps: VecDeque<Step>,
    pub consumed: Vec<u8>,
}

impl ScriptedReader {
    pub fn new<I: IntoIterator<Item = Step>>(steps: I) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            consumed: Vec::new(),
        }
    }

    /// Determine the number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Bytes(bytes) => bytes.len(),
                _ => 0,
            })
            .sum()
    }
}

impl Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        match self.steps.pop_front() {
            None => Ok(0),
            Some(Step::Interrupt) => Err(ErrorKind::Interrupted.into()),
            Some(Step::Fail(kind)) => Err(kind.into()),
            Some(Step::Bytes(bytes)) => {
                let Some((first, rest)) = bytes.split_first() else {
                    return self.read(buf);
                };
                if !rest.is_empty() {
                    self.steps.push_front(Step::Bytes(rest));
                }
                buf[0] = *first;
                self.consumed.push(*first);
                Ok(1)
            }
        }
    }
}
