//! Instruction bytes and the framed sequences the chip expects.
//!
//! The two high bits of every instruction pick its class: data (`01`),
//! display control (`10`) or address (`11`).

use log::trace;

use crate::constants::instruction::{self, address, data, display_control};
use crate::constants::KEY_SCAN_BYTES;
use crate::transport::Transport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataMode {
    WriteDisplay,
    ReadKeys,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Addressing {
    AutoIncrement,
    Fixed,
}

pub fn data_instruction(mode: DataMode, addressing: Addressing, test_mode: bool) -> u8 {
    let mut byte = instruction::DATA;
    byte |= match mode {
        DataMode::WriteDisplay => data::WRITE_DISPLAY,
        DataMode::ReadKeys => data::READ_KEYS,
    };
    byte |= match addressing {
        Addressing::AutoIncrement => data::AUTO_INCREMENT,
        Addressing::Fixed => data::FIXED_ADDRESS,
    };
    byte | if test_mode {
        data::TEST_MODE
    } else {
        data::NORMAL_MODE
    }
}

/// Only the low 4 bits of `register` are used.
pub fn address_instruction(register: u8) -> u8 {
    instruction::ADDRESS | (register & address::ADDRESS_MASK)
}

/// `brightness` is truncated to its low 3 bits, so 9 encodes like 1.
pub fn display_control_instruction(brightness: u8, enabled: bool) -> u8 {
    let state = if enabled {
        display_control::DISPLAY_ON
    } else {
        display_control::DISPLAY_OFF
    };
    instruction::DISPLAY_CONTROL | (brightness & display_control::BRIGHTNESS_MASK) | state
}

/// Sends a single instruction byte as its own frame.
pub fn send_instruction<T: Transport>(transport: &mut T, byte: u8) -> Result<(), T::Error> {
    trace!("instruction 0x{:02x}", byte);
    transport.begin_transaction()?;
    transport.write_bytes(&[byte])?;
    transport.end_transaction()
}

/// Writes `values` to consecutive registers starting at `start`.
///
/// Two frames: the auto-increment write instruction on its own, then the
/// address instruction followed by the data bytes.
pub fn write_registers<T: Transport>(
    transport: &mut T,
    start: u8,
    values: &[u8],
) -> Result<(), T::Error> {
    send_instruction(
        transport,
        data_instruction(DataMode::WriteDisplay, Addressing::AutoIncrement, false),
    )?;

    trace!("write {} register(s) from 0x{:x}", values.len(), start);
    transport.begin_transaction()?;
    transport.write_bytes(&[address_instruction(start)])?;
    transport.write_bytes(values)?;
    transport.end_transaction()
}

/// Reads the 4 key scan bytes in one frame.
pub fn read_key_scan<T: Transport>(transport: &mut T) -> Result<[u8; KEY_SCAN_BYTES], T::Error> {
    let mut buffer = [0u8; KEY_SCAN_BYTES];

    transport.begin_transaction()?;
    transport.write_bytes(&[data_instruction(
        DataMode::ReadKeys,
        Addressing::AutoIncrement,
        false,
    )])?;
    transport.read_bytes(&mut buffer)?;
    transport.end_transaction()?;

    trace!("key scan {:02x?}", buffer);
    Ok(buffer)
}
