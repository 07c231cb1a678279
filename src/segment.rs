use crate::constants::{BLANK, DECIMAL_POINT, HEX_DIGITS};

/// Decodes a raw hex byte into a segment pattern.
///
/// Bits 6:0 hold the value, either 0-15 or an ASCII hex letter (`'A'`-`'F'`,
/// `'a'`-`'f'`). Bit 7 is the decimal point and is carried through as is.
/// Anything else shows as a blank digit.
pub fn decode_hex(raw: u8) -> u8 {
    let decimal_point = raw & DECIMAL_POINT;
    let value = raw & !DECIMAL_POINT;

    let segments = match value {
        0..=15 => HEX_DIGITS[value as usize],
        b'A'..=b'F' => HEX_DIGITS[(value - b'A' + 10) as usize],
        b'a'..=b'f' => HEX_DIGITS[(value - b'a' + 10) as usize],
        _ => BLANK,
    };

    segments | decimal_point
}

/// Same as [`decode_hex`], with the decimal point passed separately.
pub fn hex_digit(value: u8, decimal_point: bool) -> u8 {
    let raw = value & !DECIMAL_POINT;
    if decimal_point {
        decode_hex(raw | DECIMAL_POINT)
    } else {
        decode_hex(raw)
    }
}
