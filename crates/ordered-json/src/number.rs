//! [`Number`]: a JSON number kept exactly as written.
//!
//! Decoded numbers are never routed through `f64`: the validated lexeme is
//! stored verbatim, so `1.0`, `1e400` or a 40-digit integer re-encode
//! byte-for-byte and can be handed to an arbitrary-precision library as text.

use std::fmt;
use std::str::FromStr;

use crate::json::ParseError;

/// A JSON number literal.
///
/// Equality is lexical: `1`, `1.0` and `1e0` are three different numbers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Number {
    repr: String,
}

impl Number {
    /// `None` for NaN and infinities, which JSON cannot represent. Negative
    /// zero keeps its sign as `-0.0`.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let negative_zero = f == 0.0 && f.is_sign_negative();
        let repr = if f.fract() == 0.0 && f.abs() < 1e15 && !negative_zero {
            format!("{}", f as i64)
        } else {
            format!("{:?}", f)
        };
        Some(Self { repr })
    }

    /// Wraps a lexeme already validated by [`scan_number`].
    pub(crate) fn from_lexeme(repr: String) -> Self {
        debug_assert_eq!(scan_number(repr.as_bytes(), 0), Some(repr.len()));
        Self { repr }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// True when the literal has neither a fraction nor an exponent.
    pub fn is_integer(&self) -> bool {
        !self.repr.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_integer()
    }

    pub fn as_i128(&self) -> Option<i128> {
        self.as_integer()
    }

    /// Nearest `f64`; `None` when the literal overflows to infinity.
    pub fn as_f64(&self) -> Option<f64> {
        self.repr.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    fn as_integer<T: FromStr>(&self) -> Option<T> {
        if self.is_integer() {
            self.repr.parse().ok()
        } else {
            None
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Self { repr: n.to_string() }
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl FromStr for Number {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match scan_number(s.as_bytes(), 0) {
            Some(end) if end == s.len() => Ok(Self {
                repr: s.to_string(),
            }),
            _ => Err(ParseError::InvalidNumber { offset: 0 }),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self.repr)
    }
}

/// Scans an RFC 8259 number starting at `start` and returns the offset just
/// past it, or `None` if the bytes there are not a valid number.
///
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
pub(crate) fn scan_number(data: &[u8], start: usize) -> Option<usize> {
    let len = data.len();
    let mut x = start;

    if x < len && data[x] == b'-' {
        x += 1;
    }
    match data.get(x) {
        Some(b'0') => x += 1,
        Some(b'1'..=b'9') => {
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        _ => return None,
    }
    if x < len && data[x] == b'.' {
        x += 1;
        let digits = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == digits {
            return None;
        }
    }
    if x < len && (data[x] == b'e' || data[x] == b'E') {
        x += 1;
        if x < len && (data[x] == b'+' || data[x] == b'-') {
            x += 1;
        }
        let digits = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == digits {
            return None;
        }
    }
    Some(x)
}
