//! Host-side image of the 16 display registers and the mapping from logical
//! digits onto them.
//!
//! With common-cathode digits each register holds one digit's segment byte,
//! so a digit update is a plain write of consecutive registers.
//!
//! With common-anode digits the chip's grid and segment outputs swap roles:
//! every segment line of the display hangs off a register pair, and each bit
//! of those registers belongs to a different digit. Segment `s` of digit `p`
//! lives in register `2 * s + p / 8`, bit `p % 8`, which leaves room for 10
//! digits. Changing one digit touches 8 registers that are shared with other
//! digits, so the whole image is rewritten from address 0 every time.

use core::ops::Range;

use log::{debug, warn};

use crate::constants::{MAX_ANODE_DIGITS, REGISTER_COUNT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wiring {
    CommonCathode,
    CommonAnode,
}

impl Wiring {
    /// Number of logical digits this wiring can address.
    pub fn max_digits(self) -> u8 {
        match self {
            Wiring::CommonCathode => REGISTER_COUNT,
            Wiring::CommonAnode => MAX_ANODE_DIGITS,
        }
    }
}

pub struct DisplayRegisters {
    wiring: Wiring,
    shadow: [u8; REGISTER_COUNT as usize],
}

impl DisplayRegisters {
    pub fn new(wiring: Wiring) -> Self {
        Self {
            wiring,
            shadow: [0; REGISTER_COUNT as usize],
        }
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// The register image as it should be on the chip.
    pub fn shadow(&self) -> &[u8; REGISTER_COUNT as usize] {
        &self.shadow
    }

    /// Stores `patterns` for the digits starting at `start` and returns the
    /// register range that now has to be written out, if any.
    ///
    /// Positions past the wiring's range are skipped. Under common-anode
    /// wiring the range is always the full image.
    pub fn update(&mut self, start: u8, patterns: &[u8]) -> Option<Range<usize>> {
        match self.wiring {
            Wiring::CommonCathode => self.update_direct(start, patterns),
            Wiring::CommonAnode => {
                for (i, pattern) in patterns.iter().enumerate() {
                    let position = start as usize + i;
                    if position < MAX_ANODE_DIGITS as usize {
                        self.transpose_in(position, *pattern);
                    } else {
                        debug!("skipping digit {}, anode wiring has 10 digits", position);
                    }
                }
                Some(0..REGISTER_COUNT as usize)
            }
        }
    }

    /// Zeroes the image and returns the full register range.
    pub fn clear(&mut self) -> Range<usize> {
        self.shadow = [0; REGISTER_COUNT as usize];
        0..REGISTER_COUNT as usize
    }

    /// The segment pattern currently held for a logical digit.
    pub fn digit(&self, position: u8) -> Option<u8> {
        if position >= self.wiring.max_digits() {
            return None;
        }

        match self.wiring {
            Wiring::CommonCathode => Some(self.shadow[position as usize]),
            Wiring::CommonAnode => {
                let (group, bit) = anode_slot(position as usize);
                let pattern = (0..8).fold(0u8, |pattern, segment| {
                    if self.shadow[2 * segment + group] & (1 << bit) != 0 {
                        pattern | (1 << segment)
                    } else {
                        pattern
                    }
                });
                Some(pattern)
            }
        }
    }

    fn update_direct(&mut self, start: u8, patterns: &[u8]) -> Option<Range<usize>> {
        let start = start as usize;
        let registers = REGISTER_COUNT as usize;
        if start >= registers || patterns.is_empty() {
            if !patterns.is_empty() {
                debug!("skipping {} digit(s) from {}", patterns.len(), start);
            }
            return None;
        }

        let end = registers.min(start + patterns.len());
        if end - start < patterns.len() {
            warn!(
                "dropping {} digit(s) past register {}",
                patterns.len() - (end - start),
                registers - 1
            );
        }

        self.shadow[start..end].copy_from_slice(&patterns[..end - start]);
        Some(start..end)
    }

    fn transpose_in(&mut self, position: usize, pattern: u8) {
        let (group, bit) = anode_slot(position);
        for segment in 0..8 {
            let register = &mut self.shadow[2 * segment + group];
            if pattern & (1 << segment) != 0 {
                *register |= 1 << bit;
            } else {
                *register &= !(1 << bit);
            }
        }
    }
}

/// Register group (0 for digits 0-7, 1 for 8-9) and bit for an anode digit.
fn anode_slot(position: usize) -> (usize, usize) {
    if position < 8 {
        (0, position)
    } else {
        (1, position - 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let registers = DisplayRegisters::new(Wiring::CommonAnode);
        assert_eq!(registers.shadow(), &[0u8; 16]);
        assert_eq!(registers.wiring(), Wiring::CommonAnode);
    }

    #[test]
    fn test_cathode_maps_digits_directly() {
        let mut registers = DisplayRegisters::new(Wiring::CommonCathode);

        assert_eq!(registers.update(3, &[0x5B, 0x4F]), Some(3..5));
        assert_eq!(registers.digit(3), Some(0x5B));
        assert_eq!(registers.digit(4), Some(0x4F));
        assert_eq!(registers.shadow()[3], 0x5B);
    }

    #[test]
    fn test_cathode_truncates_past_last_register() {
        let mut registers = DisplayRegisters::new(Wiring::CommonCathode);

        assert_eq!(registers.update(14, &[1, 2, 3, 4]), Some(14..16));
        assert_eq!(&registers.shadow()[14..], &[1, 2]);
        assert_eq!(registers.update(16, &[1]), None);
        assert_eq!(registers.update(0, &[]), None);
    }

    #[test]
    fn test_anode_digit_zero_segments() {
        let mut registers = DisplayRegisters::new(Wiring::CommonAnode);

        // segments a and h of digit 0
        assert_eq!(registers.update(0, &[0b1000_0001]), Some(0..16));

        let mut expected = [0u8; 16];
        expected[0] = 0b0000_0001;
        expected[14] = 0b0000_0001;
        assert_eq!(registers.shadow(), &expected);
    }

    #[test]
    fn test_anode_second_group() {
        let mut registers = DisplayRegisters::new(Wiring::CommonAnode);

        // digit 9 is group 1, bit 1
        registers.update(9, &[0xFF]);

        for (i, register) in registers.shadow().iter().enumerate() {
            let expected = if i % 2 == 1 { 0b10 } else { 0 };
            assert_eq!(*register, expected, "register {}", i);
        }
    }

    #[test]
    fn test_anode_skips_positions_past_nine() {
        let mut registers = DisplayRegisters::new(Wiring::CommonAnode);

        assert_eq!(registers.update(9, &[0x06, 0x7F, 0x7F]), Some(0..16));
        assert_eq!(registers.digit(9), Some(0x06));
        assert_eq!(registers.digit(10), None);
        for position in 0..9 {
            assert_eq!(registers.digit(position), Some(0));
        }
    }

    #[test]
    fn test_anode_update_keeps_other_digits() {
        let mut registers = DisplayRegisters::new(Wiring::CommonAnode);
        let patterns = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0xEF];
        registers.update(0, &patterns);

        registers.update(4, &[0x80]);

        for (position, pattern) in patterns.iter().enumerate() {
            let expected = if position == 4 { 0x80 } else { *pattern };
            assert_eq!(registers.digit(position as u8), Some(expected));
        }
    }

    #[test]
    fn test_anode_repeated_image_is_stable() {
        let mut registers = DisplayRegisters::new(Wiring::CommonAnode);
        let patterns = [0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, 0x3F, 0x06, 0xDB, 0xCF];

        registers.update(0, &patterns);
        let first = *registers.shadow();
        registers.update(0, &patterns);

        assert_eq!(registers.shadow(), &first);
    }

    #[test]
    fn test_clear() {
        let mut registers = DisplayRegisters::new(Wiring::CommonAnode);
        registers.update(0, &[0xFF; 10]);

        assert_eq!(registers.clear(), 0..16);
        assert_eq!(registers.shadow(), &[0u8; 16]);
    }
}
