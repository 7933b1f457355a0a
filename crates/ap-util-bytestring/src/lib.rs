//! Allocation-free parsing of byte strings.
//!
//! Lines from pseudo-filesystems like procfs are ASCII in practice, so UTF-8 is
//! treated as individual bytes.  Nothing in here allocates, not even on
//! failure: errors are reported as `None` or `false`.

#![no_std]

mod parse;
pub use parse::*;

/// A parsing cursor over a borrowed line of bytes.
///
/// The position only ever moves forward and never exceeds the length of the
/// line.
#[derive(Debug, Clone)]
pub struct Bytestring<'a> {
    /// The line contents.
    b: &'a [u8],
    /// The parsing position within the line.
    pos: usize,
}

/// Decimal values at or above this would overflow when multiplied by ten.
const CUTOFF_DECIMAL: u64 = u64::MAX / 10;
/// The largest digit that may follow CUTOFF_DECIMAL.
const CUTOFF_DECIMAL_DIGIT: u64 = u64::MAX % 10;
/// Hex values at or above this lose bits when shifted by a nibble.
const CUTOFF_HEX: u64 = 1 << 60;

impl<'a> Bytestring<'a> {
    /// Start parsing at the beginning of the line.
    pub fn new(b: &'a [u8]) -> Self {
        Self { b, pos: 0 }
    }

    /// The current parsing position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The bytes not consumed yet.
    pub fn rest(&self) -> &'a [u8] {
        &self.b[self.pos..]
    }

    /// Has the parsing reached the end of the line?
    pub fn eol(&self) -> bool {
        self.pos >= self.b.len()
    }

    /// Skip over space characters (0x20).  Returns true when the end of the
    /// line was reached.
    pub fn skip_space(&mut self) -> bool {
        while let Some(&ch) = self.b.get(self.pos) {
            if ch != b' ' {
                return false;
            }
            self.pos += 1;
        }
        true
    }

    /// Skip the text if it is next in the line.  Otherwise the position is
    /// left untouched and false is returned.
    ///
    /// Empty text always matches, even at the end of the line.
    pub fn skip_text(&mut self, text: &[u8]) -> bool {
        match self.b.get(self.pos..self.pos + text.len()) {
            Some(x) if x == text => {
                self.pos += text.len();
                true
            }
            _ => false,
        }
    }

    /// Consume the next byte.
    pub fn next_byte(&mut self) -> Option<u8> {
        let ch = *self.b.get(self.pos)?;
        self.pos += 1;
        Some(ch)
    }

    /// Parse a decimal number of at least one digit.
    ///
    /// Stops before the first byte that is not in 0-9.  Without any digit the
    /// position is left untouched.  Overflowing u64 fails as well.
    pub fn uint64(&mut self) -> Option<u64> {
        self.digits(|ch| ch.is_ascii_digit().then(|| (ch - b'0') as u64), |num, digit| {
            if num > CUTOFF_DECIMAL || (num == CUTOFF_DECIMAL && digit > CUTOFF_DECIMAL_DIGIT) {
                return None;
            }
            Some(num * 10 + digit)
        })
    }

    /// Parse a hexadecimal number of at least one digit.
    ///
    /// Accepts 0-9, a-f and A-F.  No "0x" prefix is recognized.
    pub fn hex_uint64(&mut self) -> Option<u64> {
        self.digits(|ch| (ch as char).to_digit(16).map(u64::from), |num, digit| {
            if num >= CUTOFF_HEX {
                return None;
            }
            Some(num << 4 | digit)
        })
    }

    /// Accumulate digits until the first non-digit or the end of the line.
    fn digits(&mut self, value: impl Fn(u8) -> Option<u64>, acc: impl Fn(u64, u64) -> Option<u64>) -> Option<u64> {
        let start = self.pos;
        let mut num = 0;
        while let Some(digit) = self.b.get(self.pos).and_then(|&ch| value(ch)) {
            num = acc(num, digit)?;
            self.pos += 1;
        }
        (self.pos != start).then_some(num)
    }

    /// Count the fields from the current position to the end of the line,
    /// without moving the position.
    ///
    /// Fields are runs of non-space bytes separated by one or more spaces.
    pub fn num_fields(&self) -> usize {
        self.rest().split(|&ch| ch == b' ').filter(|field| !field.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eol() {
        assert!(Bytestring::new(b"").eol());
        let mut bstr = Bytestring::new(b"foo");
        assert!(!bstr.eol());
        assert!(bstr.skip_text(b"foo"));
        assert!(bstr.eol());
    }

    #[test]
    fn skip_space() {
        assert!(Bytestring::new(b"   ").skip_space());
        let mut bstr = Bytestring::new(b"   foo");
        assert!(!bstr.skip_space());
        assert_eq!(bstr.pos(), 3);
        assert!(!bstr.skip_space());
        assert_eq!(bstr.pos(), 3);
    }

    #[test]
    fn skip_text() {
        let mut bstr = Bytestring::new(b"foobar");
        assert!(bstr.skip_text(b"foo"));
        assert_eq!(bstr.pos(), 3);
        assert_eq!(bstr.rest(), b"bar");

        let mut bstr = Bytestring::new(b"bar");
        assert!(!bstr.skip_text(b"baz"));
        assert_eq!(bstr.pos(), 0);
        assert!(!bstr.skip_text(b"barz"));
        assert_eq!(bstr.pos(), 0);
        assert!(bstr.skip_text(b"bar"));
        assert_eq!(bstr.pos(), 3);
        assert!(!bstr.skip_text(b"x"));

        // empty text matches at the end of the line, without moving
        assert!(bstr.eol());
        assert!(bstr.skip_text(b""));
        assert_eq!(bstr.pos(), 3);
        assert!(Bytestring::new(b"").skip_text(b""));
    }

    #[test]
    fn next_byte() {
        assert_eq!(Bytestring::new(b"").next_byte(), None);
        let mut bstr = Bytestring::new(b"AB");
        assert_eq!(bstr.next_byte(), Some(b'A'));
        assert_eq!(bstr.next_byte(), Some(b'B'));
        assert!(bstr.eol());
        assert_eq!(bstr.next_byte(), None);
        assert_eq!(bstr.pos(), 2);
    }

    #[test]
    fn uint64_needs_digits() {
        for line in [&b""[..], b"foo", b"!!!", b" 1"] {
            let mut bstr = Bytestring::new(line);
            assert_eq!(bstr.uint64(), None);
            assert_eq!(bstr.pos(), 0);
        }
    }

    #[test]
    fn uint64_values() {
        let mut bstr = Bytestring::new(b"4");
        assert_eq!(bstr.uint64(), Some(4));
        assert_eq!(bstr.pos(), 1);

        let mut bstr = Bytestring::new(b"7foo");
        assert_eq!(bstr.uint64(), Some(7));
        assert_eq!(bstr.pos(), 1);

        let mut bstr = Bytestring::new(b"1234567890123");
        assert_eq!(bstr.uint64(), Some(1234567890123));
        assert_eq!(bstr.pos(), 13);

        let mut bstr = Bytestring::new(b"12 34");
        assert_eq!(bstr.uint64(), Some(12));
        assert!(!bstr.skip_space());
        assert_eq!(bstr.uint64(), Some(34));
        assert!(bstr.eol());
    }

    #[test]
    fn uint64_boundary() {
        assert_eq!(Bytestring::new(b"18446744073709551615").uint64(), Some(u64::MAX));
        assert_eq!(Bytestring::new(b"18446744073709551614").uint64(), Some(u64::MAX - 1));
        assert_eq!(Bytestring::new(b"018446744073709551615").uint64(), Some(u64::MAX));
        for line in [&b"18446744073709551616"[..], b"18446744073709551619", b"18446744073709551620", b"184467440737095516150", b"99999999999999999999"] {
            assert_eq!(Bytestring::new(line).uint64(), None, "{line:?}");
        }
    }

    #[test]
    fn hex_uint64_values() {
        let mut bstr = Bytestring::new(b"42");
        assert_eq!(bstr.hex_uint64(), Some(0x42));
        assert!(bstr.eol());

        let mut bstr = Bytestring::new(b"dEaDbEeF-");
        assert_eq!(bstr.hex_uint64(), Some(0xdeadbeef));
        assert_eq!(bstr.pos(), 8);

        let mut bstr = Bytestring::new(b"g");
        assert_eq!(bstr.hex_uint64(), None);
        assert_eq!(bstr.pos(), 0);
    }

    #[test]
    fn hex_uint64_boundary() {
        assert_eq!(Bytestring::new(b"ffffffffffffffff").hex_uint64(), Some(u64::MAX));
        assert_eq!(Bytestring::new(b"FFFFFFFFFFFFFFFE").hex_uint64(), Some(u64::MAX - 1));
        assert_eq!(Bytestring::new(b"1000000000000000").hex_uint64(), Some(1 << 60));
        assert_eq!(Bytestring::new(b"00000000ffffffffffffffff").hex_uint64(), Some(u64::MAX));
        assert_eq!(Bytestring::new(b"10000000000000000").hex_uint64(), None);
        assert_eq!(Bytestring::new(b"1ffffffffffffffff").hex_uint64(), None);
    }

    #[test]
    fn num_fields() {
        assert_eq!(Bytestring::new(b"").num_fields(), 0);
        assert_eq!(Bytestring::new(b" ").num_fields(), 0);
        assert_eq!(Bytestring::new(b" F  BAR BAZ").num_fields(), 3);
        assert_eq!(Bytestring::new(b" F  BAR BAZ RATZ ").num_fields(), 4);

        let mut bstr = Bytestring::new(b"1 2 3");
        assert_eq!(bstr.uint64(), Some(1));
        assert_eq!(bstr.num_fields(), 2);
        assert_eq!(bstr.pos(), 1);
    }
}
