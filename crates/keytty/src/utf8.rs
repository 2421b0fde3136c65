/// Determine the length of a UTF-8 character from its first byte.
///
/// This function returns zero for continuation bytes and for bytes that never
/// start a well-formed character. A non-zero width is no guarantee that the
/// following bytes complete the character.
pub(crate) const fn char_width(first: u8) -> usize {
    if first < 0x80 {
        1
    } else {
        UTF8_CHAR_WIDTH[(first - 0x80) as usize] as usize
    }
}

/// Determine whether the byte continues a multi-byte UTF-8 character.
#[inline]
pub(crate) const fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// Decode the bytes of exactly one UTF-8 character.
pub(crate) fn decode_char(bytes: &[u8]) -> Option<char> {
    let s = core::str::from_utf8(bytes).ok()?;
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(c)
}

// See https://github.com/rust-lang/rust/blob/master/library/core/src/str/validations.rs
#[rustfmt::skip]
const UTF8_CHAR_WIDTH: &[u8; 128] = &[
    // 1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 8
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 9
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // A
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // B
    0, 0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // C
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // D
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, // E
    4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // F
];

#[cfg(test)]
mod test {
    use super::{char_width, decode_char, is_continuation};

    #[test]
    fn test_char_width() {
        for (c, width) in [('a', 1), ('\x1b', 1), ('é', 2), ('€', 3), ('🌸', 4)] {
            let mut buffer = [0; 4];
            let bytes = c.encode_utf8(&mut buffer).as_bytes();
            assert_eq!(char_width(bytes[0]), width, "width of {:?}", c);
            assert_eq!(decode_char(bytes), Some(c));
        }

        assert_eq!(char_width(0x80), 0);
        assert_eq!(char_width(0xc0), 0);
        assert_eq!(char_width(0xff), 0);
    }

    #[test]
    fn test_decode_char() {
        assert_eq!(decode_char(b""), None);
        assert_eq!(decode_char(b"ab"), None);
        assert_eq!(decode_char(b"\xc3"), None);
        assert_eq!(decode_char(b"\xc3\x28"), None);
        assert_eq!(decode_char(b"\xed\xa0\x80"), None);
    }

    #[test]
    fn test_is_continuation() {
        assert!(is_continuation(0x80));
        assert!(is_continuation(0xbf));
        assert!(!is_continuation(b'y'));
        assert!(!is_continuation(0xc3));
        assert!(!is_continuation(0xe9));
    }
}
