//! Helper module with a catalog of ANSI styles.
//!
//! [`Style`] collects the select-graphic-rendition (SGR) escape sequences for
//! the eight standard colors in foreground, background, and bright variants,
//! for two 24-bit colors, orange and a pale purple, for text attributes, and
//! for three situational aliases. Each style is a string constant, ready to be
//! written to a terminal, and [`Style::ENDC`] resets them all.
//!
//! The byte sequences are fixed and some are a bit unusual. In particular, the
//! background colors start with a `0;` reset parameter and the bright colors
//! append `;1` for bold instead of using the 90–97 range. Existing consumers
//! depend on these exact bytes, so they stay as they are.
//!
//!
//! # Example
//!
//! ```
//! # use keytty::style::Style;
//! let warning = format!("{}careful!{}", Style::WARNING, Style::ENDC);
//! assert_eq!(warning, "\x1b[93mcareful!\x1b[0m");
//!
//! assert_eq!(Style::lookup("FG_ORANGE"), Some("\x1b[38;2;255;165;0m"));
//! assert_eq!(Style::lookup("FG_TEAL"), None);
//! ```

macro_rules! define_styles {
    ( $( $(#[$attr:meta])* $name:ident = $ansi:literal ),+ $(,)? ) => {
        impl Style {
            $(
                $(#[$attr])*
                #[doc = concat!("\n\nThe escape sequence is `", stringify!($ansi), "`.")]
                pub const $name: &'static str = $ansi;
            )+

            /// The names and escape sequences of all styles, in declaration
            /// order.
            const ALL: &'static [(&'static str, &'static str)] = &[
                $( (stringify!($name), $ansi), )+
            ];
        }
    };
}

/// The catalog of ANSI styles.
///
/// This unit struct only serves as namespace for the associated string
/// constants. Use [`Style::all`] to enumerate them and [`Style::lookup`] to
/// find one by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style;

define_styles! {
    /// Black foreground.
    FG_BLACK = "\x1b[30m",
    /// Red foreground.
    FG_RED = "\x1b[31m",
    /// Green foreground.
    FG_GREEN = "\x1b[32m",
    /// Yellow foreground.
    FG_YELLOW = "\x1b[33m",
    /// Blue foreground.
    FG_BLUE = "\x1b[34m",
    /// Magenta foreground.
    FG_MAGENTA = "\x1b[35m",
    /// Cyan foreground.
    FG_CYAN = "\x1b[36m",
    /// White foreground.
    FG_WHITE = "\x1b[37m",
    /// Orange foreground, i.e., 24-bit RGB(255, 165, 0).
    FG_ORANGE = "\x1b[38;2;255;165;0m",
    /// Pale purple foreground, i.e., 24-bit RGB(230, 230, 250).
    FG_PURPLE = "\x1b[38;2;230;230;250m",

    /// Black background.
    BG_BLACK = "\x1b[0;40m",
    /// Red background.
    BG_RED = "\x1b[0;41m",
    /// Green background.
    BG_GREEN = "\x1b[0;42m",
    /// Yellow background.
    BG_YELLOW = "\x1b[0;43m",
    /// Blue background.
    BG_BLUE = "\x1b[0;44m",
    /// Magenta background.
    BG_MAGENTA = "\x1b[0;45m",
    /// Cyan background.
    BG_CYAN = "\x1b[0;46m",
    /// White background.
    BG_WHITE = "\x1b[0;47m",
    /// Orange background, i.e., 24-bit RGB(255, 165, 0).
    BG_ORANGE = "\x1b[48;2;255;165;0m",
    /// Pale purple background, i.e., 24-bit RGB(230, 230, 250).
    BG_PURPLE = "\x1b[48;2;230;230;250m",

    /// Bright red foreground.
    BRIGHT_RED = "\x1b[31;1m",
    /// Bright green foreground.
    BRIGHT_GREEN = "\x1b[32;1m",
    /// Bright yellow foreground.
    BRIGHT_YELLOW = "\x1b[33;1m",
    /// Bright blue foreground.
    BRIGHT_BLUE = "\x1b[34;1m",
    /// Bright magenta foreground.
    BRIGHT_MAGENTA = "\x1b[35;1m",
    /// Bright cyan foreground.
    BRIGHT_CYAN = "\x1b[36;1m",
    /// Bright white foreground.
    BRIGHT_WHITE = "\x1b[37;1m",
    /// Bright black, i.e., gray foreground.
    BRIGHT_BLACK = "\x1b[30;1m",

    /// Bold text.
    BOLD = "\x1b[1m",
    /// Dim or faint text.
    DIM = "\x1b[2m",
    /// Standout text, which most terminals render as italic.
    STANDOUT = "\x1b[3m",
    /// Underlined text.
    UNDERLINE = "\x1b[4m",
    /// Slowly blinking text.
    ///
    /// Some terminals, notably PuTTY, need extra configuration to blink.
    BLINK_SLOW = "\x1b[5m",
    /// Rapidly blinking text.
    BLINK_FAST = "\x1b[6m",
    /// Inverse video, i.e., swapped foreground and background.
    INVERSE = "\x1b[7m",

    /// Headers, in bright magenta.
    HEADER = "\x1b[95m",
    /// Warnings, in bright yellow.
    WARNING = "\x1b[93m",
    /// Failures, in bright red.
    FAIL = "\x1b[91m",

    /// Reset all styles.
    ENDC = "\x1b[0m",
}

impl Style {
    /// Get an iterator over the names and escape sequences of all styles.
    pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::ALL.iter().copied()
    }

    /// Look up the escape sequence for the style with the given name.
    ///
    /// Names are the constant names, e.g., `FG_RED` or `ENDC`, and must match
    /// exactly.
    pub fn lookup(name: &str) -> Option<&'static str> {
        Self::ALL
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, ansi)| *ansi)
    }
}
