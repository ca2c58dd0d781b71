//! Text encoding of PWM parameter values.
//!
//! Values go to sysfs as decimal ASCII followed by one NUL byte, so a write
//! of `1500` is the five bytes `b"1500\0"`.  Reads come back as decimal text,
//! usually newline terminated.

use core::fmt::Write as _;

/// Largest encoded value: `i64::MIN` is 20 characters, plus the NUL.
pub const ENCODED_CAPACITY: usize = 24;

/// Read size for `duty_cycle` and `period`.
pub const NUMERIC_READ_LEN: usize = 31;

/// Read size for `enable`.
pub const ENABLE_READ_LEN: usize = 2;

/// An encoded value, ready to be written in one call.
pub type Encoded = heapless::Vec<u8, ENCODED_CAPACITY>;

/// Decimal text plus the trailing NUL.
pub fn encode_int(value: i64) -> Encoded {
    let mut text: heapless::String<ENCODED_CAPACITY> = heapless::String::new();
    // i64 always fits; see ENCODED_CAPACITY
    let written = write!(text, "{value}");
    debug_assert!(written.is_ok());
    let mut bytes = text.into_bytes();
    let pushed = bytes.push(0);
    debug_assert!(pushed.is_ok());
    bytes
}

pub fn encode_u32(value: u32) -> Encoded {
    encode_int(i64::from(value))
}

/// `0` or `1`, plus the trailing NUL.
pub fn encode_enable(enable: bool) -> Encoded {
    encode_int(i64::from(enable))
}

/// Parse a decimal integer the way `sscanf("%d")` does: leading whitespace
/// and one sign are accepted, anything after the digits is ignored.
///
/// Returns `None` when no digits are present or the value overflows `i64`.
pub fn parse_int(raw: &[u8]) -> Option<i64> {
    let start = raw.iter().position(|b| !b.is_ascii_whitespace())?;
    let rest = &raw[start..];
    let sign = usize::from(matches!(rest.first(), Some(b'+' | b'-')));
    let digits = rest[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    core::str::from_utf8(&rest[..sign + digits]).ok()?.parse().ok()
}

/// The first byte decides: `'1'` is enabled, `'0'` is disabled.
pub fn parse_enable(raw: &[u8]) -> Option<bool> {
    match raw.first() {
        Some(b'1') => Some(true),
        Some(b'0') => Some(false),
        _ => None,
    }
}
