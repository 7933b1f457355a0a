//! Parse whole buffers as a single number.

use crate::Bytestring;

/// Parse the buffer as one decimal number without anything else.
///
/// Trailing bytes, including whitespace, make the parse fail.
pub fn parse_uint(b: &[u8]) -> Option<u64> {
    let mut bstr = Bytestring::new(b);
    let num = bstr.uint64()?;
    bstr.eol().then_some(num)
}

/// Parse the buffer as one hexadecimal number without anything else.
pub fn parse_hex_uint(b: &[u8]) -> Option<u64> {
    let mut bstr = Bytestring::new(b);
    let num = bstr.hex_uint64()?;
    bstr.eol().then_some(num)
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::format;

    #[test]
    fn decimal() {
        assert_eq!(parse_uint(b"42"), Some(42));
        assert_eq!(parse_uint(b"0"), Some(0));
        assert_eq!(parse_uint(b"1844674407370955161"), Some(u64::MAX / 10));
        assert_eq!(parse_uint(b"184467440737095516150"), None);
        assert_eq!(parse_uint(b"42DO'H!"), None);
        assert_eq!(parse_uint(b"DO'H!"), None);
        assert_eq!(parse_uint(b"42\n"), None);
        assert_eq!(parse_uint(b""), None);
    }

    #[test]
    fn hexadecimal() {
        assert_eq!(parse_hex_uint(b"42"), Some(0x42));
        assert_eq!(parse_hex_uint(b"1ffffffffffffffff"), None);
        assert_eq!(parse_hex_uint(b"42DO'H!"), None);
        assert_eq!(parse_hex_uint(b"GOSH!"), None);
    }

    /// Formatting and parsing again returns the same number.
    #[test]
    fn formatted() {
        let mut n: u64 = 1;
        for shift in 0..64 {
            for v in [n - 1, n, n | (n >> 1), u64::MAX >> shift, u64::MAX - n + 1] {
                assert_eq!(parse_uint(format!("{v}").as_bytes()), Some(v), "{v}");
                assert_eq!(parse_hex_uint(format!("{v:x}").as_bytes()), Some(v), "{v:x}");
                assert_eq!(parse_hex_uint(format!("{v:X}").as_bytes()), Some(v), "{v:X}");
            }
            n = n.wrapping_shl(1);
        }
    }

    /// Every value just past u64::MAX is rejected.
    #[test]
    fn past_the_end() {
        for extra in 1..=1000u128 {
            let v = u64::MAX as u128 + extra;
            assert_eq!(parse_uint(format!("{v}").as_bytes()), None, "{v}");
            assert_eq!(parse_hex_uint(format!("{v:x}").as_bytes()), None, "{v:x}");
        }
        for extra in 0..1000u64 {
            let v = u64::MAX - extra;
            assert_eq!(parse_uint(format!("{v}").as_bytes()), Some(v));
            assert_eq!(parse_hex_uint(format!("{v:x}").as_bytes()), Some(v));
        }
    }
}
