pub const REGISTER_COUNT: u8 = 16; // on-chip display registers
pub const MAX_ANODE_DIGITS: u8 = 10;
pub const MAX_BRIGHTNESS: u8 = 7; // 3 bits
pub const DECIMAL_POINT: u8 = 0x80;
pub const KEY_SCAN_BYTES: usize = 4;
pub const KEY_LINES: u8 = 3;
pub const KEY_SEGMENTS: u8 = 8;
pub const BLANK: u8 = 0x00;

/// Seven-segment codes for 0-9 and A-F, segment a in bit 0 through g in bit 6.
pub const HEX_DIGITS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

#[allow(dead_code)]
pub mod instruction {
    // bits 7:6 select the instruction class
    pub const DATA: u8 = 0x40;
    pub const DISPLAY_CONTROL: u8 = 0x80;
    pub const ADDRESS: u8 = 0xC0;

    pub mod data {
        pub const WRITE_DISPLAY: u8 = 0x00; // bits 1:0 = 00: write data to display register
        pub const READ_KEYS: u8 = 0x02; // bits 1:0 = 10: read key scan data
        pub const AUTO_INCREMENT: u8 = 0x00; // bit 2 clear: address increments after each byte
        pub const FIXED_ADDRESS: u8 = 0x04; // bit 2 set: address stays put
        pub const NORMAL_MODE: u8 = 0x00; // bit 3 clear
        pub const TEST_MODE: u8 = 0x08; // bit 3 set: internal test mode
    }

    pub mod display_control {
        pub const DISPLAY_OFF: u8 = 0x00;
        pub const DISPLAY_ON: u8 = 0x08; // bit 3
        pub const BRIGHTNESS_MASK: u8 = 0x07; // bits 2:0, pulse width 1/16 .. 14/16
    }

    pub mod address {
        pub const ADDRESS_MASK: u8 = 0x0F; // bits 3:0: register 0x0 - 0xF
    }
}
