//! Helper module with utilities for byte strings.

use std::fmt;

/// Nicely format a byte.
fn format_nicely<W>(byte: u8, output: &mut W) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    if (0x20..=0x7e).contains(&byte) {
        return output.write_char(byte as char);
    }

    let replacement = match byte {
        // Make sure that letters are math sans-serif Unicode letters and at
        // least one letter is not a hexadecimal number.
        0x00 => "‹𝗇𝗎𝗅›",
        0x03 => "‹𝖾𝗍𝗑›",
        0x04 => "‹𝖾𝗈𝗍›",
        0x07 => "‹𝖻𝖾𝗅›",
        0x08 => "‹𝖻s›",
        0x09 => "‹𝗁𝗍›",
        0x0a => "‹𝗅𝖿›",
        0x0b => "‹𝗏𝗍›",
        0x0d => "‹𝖼𝗋›",

        0x18 => "‹𝖼𝖺𝗇›",
        0x1a => "‹𝗌𝗎𝖻›",
        0x1b => "‹𝖾𝗌𝖼›",

        0x7f => "‹𝖽𝖾𝗅›",

        _ => "",
    };
    if !replacement.is_empty() {
        return output.write_str(replacement);
    }

    output.write_fmt(format_args!("‹{:02x}›", byte))
}

/// A newtype for nicely formatting a byte slice.
struct ByteStringNicely<'a>(&'a [u8]);

impl fmt::Display for ByteStringNicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Ok(s) = core::str::from_utf8(self.0) {
            // Multi-byte characters are printable as is.
            if s.chars().any(|c| !c.is_ascii()) {
                return write!(f, "\"{}\"", s);
            }
        }

        f.write_str("\"")?;
        for byte in self.0.iter() {
            if *byte == b'"' {
                f.write_str("\\\"")?;
            } else {
                format_nicely(*byte, f)?;
            }
        }
        f.write_str("\"")
    }
}

impl fmt::Debug for ByteStringNicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Turn the slice into a value that displays nicely.
///
/// Printable ASCII characters and well-formed non-ASCII characters display as
/// themselves. Common C0 controls display as two- or three-letter mnemonics,
/// e.g., `‹𝖾𝗌𝖼›`, and all other bytes as two-digit hexadecimal numbers, e.g.,
/// `‹9b›`. The mnemonics always have at least one letter that is *not* a
/// hexadecimal digit and use Unicode sans-serif math characters, so that they
/// are clearly distinguishable from the numbers.
///
/// # Example
///
/// ```
/// # use keytty::util::nicely_str;
/// assert_eq!(format!("{}", nicely_str(b"q\x1b")), "\"q‹𝖾𝗌𝖼›\"");
/// ```
pub fn nicely_str(bytes: &[u8]) -> impl fmt::Debug + fmt::Display + use<'_> {
    ByteStringNicely(bytes)
}

#[cfg(test)]
mod test {
    use super::nicely_str;

    #[test]
    fn test_nicely() {
        assert_eq!(format!("{}", nicely_str(b"y")), "\"y\"");
        assert_eq!(format!("{}", nicely_str(b"\"")), "\"\\\"\"");
        assert_eq!(format!("{}", nicely_str(b"\x03")), "\"‹𝖾𝗍𝗑›\"");
        assert_eq!(format!("{}", nicely_str(b"\x1b[\xaf")), "\"‹𝖾𝗌𝖼›[‹af›\"");
        assert_eq!(format!("{:?}", nicely_str("é".as_bytes())), "\"é\"");
    }
}
