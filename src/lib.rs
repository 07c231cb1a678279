#![cfg_attr(not(test), no_std)]

mod constants;

pub mod command;
pub mod keys;
pub mod registers;
pub mod segment;
pub mod transport;

pub use constants::*;
pub use keys::KeyMask;
pub use registers::Wiring;
pub use transport::{BitBangTiming, BitBangTransport, SpiTransport, SpiTransportError, Transport};

use log::debug;
use num_traits::ToPrimitive;

use registers::DisplayRegisters;

/// Driver for a TM1638 with `NUM_DIGITS` seven-segment digits fitted.
///
/// The wiring is fixed for the driver's lifetime. The host keeps a copy of
/// the 16 display registers; creating the driver zeroes that copy but leaves
/// the chip alone, so whatever it was showing stays lit until the first write
/// or an explicit [`clear`](Self::clear).
pub struct TM1638<T, const NUM_DIGITS: u8> {
    transport: T,
    registers: DisplayRegisters,
}

impl<T, E, const NUM_DIGITS: u8> TM1638<T, NUM_DIGITS>
where
    T: Transport<Error = E>,
{
    pub fn new(transport: T, wiring: Wiring) -> Self {
        Self {
            transport,
            registers: DisplayRegisters::new(wiring),
        }
    }

    /// Releases the transport. The display keeps its current state.
    pub fn shutdown(self) -> T {
        self.transport
    }

    pub fn wiring(&self) -> Wiring {
        self.registers.wiring()
    }

    /// Turns the display on at `brightness`.
    pub fn init(&mut self, brightness: u8) -> Result<(), TM1638Error<E>> {
        self.configure_display(brightness, true)
    }

    /// `brightness` is 0-7; larger values keep only their low 3 bits.
    pub fn configure_display(&mut self, brightness: u8, enabled: bool) -> Result<(), TM1638Error<E>> {
        debug!("display brightness {} enabled {}", brightness, enabled);
        command::send_instruction(
            &mut self.transport,
            command::display_control_instruction(brightness, enabled),
        )?;
        Ok(())
    }

    /// Blanks every register on the chip.
    pub fn clear(&mut self) -> Result<(), TM1638Error<E>> {
        let range = self.registers.clear();
        self.flush(range)
    }

    pub fn set_digit(&mut self, position: u8, pattern: u8) -> Result<(), TM1638Error<E>> {
        self.set_digits(position, &[pattern])
    }

    /// Writes raw segment patterns to the digits starting at `start`.
    ///
    /// Positions the wiring cannot address are skipped; the rest are still
    /// written.
    pub fn set_digits(&mut self, start: u8, patterns: &[u8]) -> Result<(), TM1638Error<E>> {
        match self.registers.update(start, patterns) {
            Some(range) => self.flush(range),
            None => Ok(()),
        }
    }

    /// Shows a hex digit (0-15 or `'A'`-`'F'` in either case) at `position`.
    /// Unrecognized values show as blank.
    pub fn set_digit_hex(
        &mut self,
        position: u8,
        value: u8,
        decimal_point: bool,
    ) -> Result<(), TM1638Error<E>> {
        self.set_digit(position, segment::hex_digit(value, decimal_point))
    }

    /// Shows hex digits from `start`. Bit 7 of each value turns on that
    /// digit's decimal point.
    pub fn set_digits_hex(&mut self, start: u8, values: &[u8]) -> Result<(), TM1638Error<E>> {
        let mut patterns = [0u8; REGISTER_COUNT as usize];
        let mut position = start as usize;

        for chunk in values.chunks(patterns.len()) {
            if position >= REGISTER_COUNT as usize {
                break;
            }
            for (pattern, value) in patterns.iter_mut().zip(chunk) {
                *pattern = segment::decode_hex(*value);
            }
            self.set_digits(position as u8, &patterns[..chunk.len()])?;
            position += chunk.len();
        }
        Ok(())
    }

    /// Shows `number` in decimal across digits `0..NUM_DIGITS`, most
    /// significant digit first and zero padded.
    pub fn display_number<N>(&mut self, number: N) -> Result<(), TM1638Error<E>>
    where
        N: ToPrimitive,
    {
        let number = number.to_u64().ok_or(TM1638Error::InvalidValue)?;
        self.display_radix(number, 10)
    }

    /// Same as [`display_number`](Self::display_number) in hexadecimal.
    pub fn display_hex_number<N>(&mut self, number: N) -> Result<(), TM1638Error<E>>
    where
        N: ToPrimitive,
    {
        let number = number.to_u64().ok_or(TM1638Error::InvalidValue)?;
        self.display_radix(number, 16)
    }

    /// Segment pattern the driver holds for `position`, or `None` if the
    /// wiring cannot address it.
    pub fn digit(&self, position: u8) -> Option<u8> {
        self.registers.digit(position)
    }

    /// The host copy of the 16 display registers.
    pub fn registers(&self) -> &[u8; REGISTER_COUNT as usize] {
        self.registers.shadow()
    }

    pub fn read_key_registers(&mut self) -> Result<[u8; KEY_SCAN_BYTES], TM1638Error<E>> {
        Ok(command::read_key_scan(&mut self.transport)?)
    }

    pub fn scan_keys(&mut self) -> Result<KeyMask, TM1638Error<E>> {
        let raw = self.read_key_registers()?;
        Ok(keys::decode_key_scan(&raw))
    }

    fn display_radix(&mut self, number: u64, radix: u64) -> Result<(), TM1638Error<E>> {
        let num_digits = NUM_DIGITS.min(self.wiring().max_digits()) as usize;
        let limit = radix.checked_pow(num_digits as u32).unwrap_or(u64::MAX);
        if number >= limit {
            return Err(TM1638Error::InvalidValue);
        }

        let mut patterns = [0u8; REGISTER_COUNT as usize];
        let mut num = number;
        for i in 0..num_digits {
            patterns[num_digits - 1 - i] = HEX_DIGITS[(num % radix) as usize];
            num /= radix;
        }
        self.set_digits(0, &patterns[..num_digits])
    }

    fn flush(&mut self, range: core::ops::Range<usize>) -> Result<(), TM1638Error<E>> {
        let start = range.start as u8;
        command::write_registers(&mut self.transport, start, &self.registers.shadow()[range])?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TM1638Error<E> {
    Transport(E),
    InvalidValue,
}

impl<E> From<E> for TM1638Error<E> {
    fn from(error: E) -> Self {
        TM1638Error::Transport(error)
    }
}
