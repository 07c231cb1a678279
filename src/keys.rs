use crate::constants::{KEY_LINES, KEY_SCAN_BYTES, KEY_SEGMENTS};

/// Pressed keys of the 3x8 key matrix, one bit per key.
///
/// Bit `line * 8 + segment` is set when the key between key line `line`
/// (K1-K3 as 0-2) and segment column `segment` (SEG1-SEG8 as 0-7) is down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyMask(u32);

impl KeyMask {
    pub fn from_bits(bits: u32) -> Self {
        Self(bits & 0x00FF_FFFF)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn any_pressed(&self) -> bool {
        self.0 != 0
    }

    /// `false` for coordinates outside the matrix.
    pub fn is_pressed(&self, line: u8, segment: u8) -> bool {
        if line >= KEY_LINES || segment >= KEY_SEGMENTS {
            return false;
        }
        self.0 & (1 << (line * KEY_SEGMENTS + segment)) != 0
    }

    /// Pressed keys as `(line, segment)` pairs, line-major.
    pub fn pressed(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..KEY_LINES)
            .flat_map(|line| (0..KEY_SEGMENTS).map(move |segment| (line, segment)))
            .filter(move |(line, segment)| self.is_pressed(*line, *segment))
    }
}

/// Unpacks the 4 key scan bytes.
///
/// Byte `r` covers segment columns `2r` and `2r + 1`: bit `L` is key line `L`
/// on the first column, bit `L + 4` the same line on the second. Bits 3 and
/// 7 of each byte are unused.
pub fn decode_key_scan(raw: &[u8; KEY_SCAN_BYTES]) -> KeyMask {
    let mut mask = 0u32;

    for (r, &byte) in raw.iter().enumerate() {
        let first = 2 * r as u32;
        let second = first + 1;
        for line in 0..KEY_LINES as u32 {
            let offset = line * KEY_SEGMENTS as u32;
            if byte & (1 << line) != 0 {
                mask |= 1 << (offset + first);
            }
            if byte & (1 << (line + 4)) != 0 {
                mask |= 1 << (offset + second);
            }
        }
    }

    KeyMask(mask)
}
