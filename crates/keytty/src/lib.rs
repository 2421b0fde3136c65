//! # Key 🔑 Tty
//!
//! This crate provides **single keystroke input and a catalog of ANSI
//! styles** for command line tools. Its only dependency is the low-level crate
//! enabling system calls, i.e., [`libc`](https://crates.io/crates/libc) on Unix
//! and [`windows-sys`](https://crates.io/crates/windows-sys) on Windows.
//!
//! Reading a keystroke is easy:
//!
//!   * Decide which characters are acceptable with [`Accept`].
//!   * Call [`read_char()`] with a prompt, or create a [`KeyReader`] for more
//!     control through [`opt::Options`].
//!
//! While reading, the terminal is in *rare mode*, with line editing and echo
//! disabled, and characters are delivered as soon as they are typed.
//! Unacceptable characters are silently discarded. No matter how reading ends,
//! the terminal's configuration is restored exactly once before returning,
//! courtesy of the [`RawMode`] guard.
//!
//! The [`style`] module provides the **catalog of ANSI styles** as string
//! constants of [`style::Style`], including 8 colors in three variants, two
//! 24-bit colors, text attributes, and [`style::Style::ENDC`] to reset them
//! all.
//!
//!
//! # Example
//!
//! ```no_run
//! # use keytty::{read_char, style::Style, Accept};
//! let prompt = format!("{}Continue?{} (y/n): ", Style::BOLD, Style::ENDC);
//! let answer = read_char(&prompt, &Accept::only(['y', 'n']))?;
//!
//! if answer == 'y' {
//!     println!("{}Continuing...{}", Style::FG_GREEN, Style::ENDC);
//! }
//! # Ok::<(), keytty::err::Error>(())
//! ```
//!
//!
//! # Concurrency
//!
//! A terminal's configuration is process-wide state. Reading keystrokes from
//! several threads at the same time garbles that configuration, since the
//! snapshots and restorations interleave. Applications that read keystrokes
//! from more than one thread must serialize the calls, e.g., with a mutex.
//!
//!
//! # Windows
//!
//! On Windows, rare mode clears `ENABLE_LINE_INPUT` and `ENABLE_ECHO_INPUT`
//! for the console's standard input and switches its input code page to
//! UTF-8. The console has no file status flags, so only the console mode and
//! code page are saved and restored. Pending console input is
//! flushed upon restoration, just like on Unix.

mod api;
pub mod err;
pub mod opt;
mod raw;
mod read;
pub mod style;
mod sys;
#[cfg(test)]
mod test_util;
mod utf8;
pub mod util;

pub use api::Device;
pub use raw::RawMode;
pub use read::{read_char, Accept, KeyReader};
pub use sys::{Config, RawInput, Terminal};
