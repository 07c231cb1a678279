//! The byte-level bus the TM1638 sits on.
//!
//! The chip talks over three lines: strobe (STB), clock (CLK) and a shared,
//! half-duplex data line (DIO). Every exchange is framed by pulling strobe low
//! and raising it again afterwards, and bytes travel least significant bit
//! first. [`Transport`] captures exactly that much; the driver never toggles
//! a pin itself.
//!
//! Two realizations are provided:
//! - [`BitBangTransport`] drives three GPIO pins directly.
//! - [`SpiTransport`] uses a hardware SPI bus for CLK/DIO plus a GPIO strobe.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

/// Framed, LSB-first byte exchange with the chip.
pub trait Transport {
    type Error;

    /// Start a framed transaction (strobe low).
    fn begin_transaction(&mut self) -> Result<(), Self::Error>;

    /// End the current framed transaction (strobe high).
    fn end_transaction(&mut self) -> Result<(), Self::Error>;

    /// Send `bytes` inside the current transaction.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Receive `buffer.len()` bytes inside the current transaction. The
    /// transport turns the data line around itself; the frame stays open.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// Microsecond delays used by [`BitBangTransport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitBangTiming {
    /// Half of a clock period.
    pub clock_us: u32,
    /// Wait between releasing DIO and sampling the first key scan bit (tWAIT).
    pub read_settle_us: u32,
    /// Gap after each byte read back from the chip.
    pub byte_gap_us: u32,
}

impl Default for BitBangTiming {
    fn default() -> Self {
        Self {
            clock_us: 1,
            read_settle_us: 5,
            byte_gap_us: 2,
        }
    }
}

/// Bit-banged three wire bus.
///
/// `DIO` has to be an open-drain pin with a pull-up (the TM1638 drives the
/// line low during key scans), so it is both an [`OutputPin`] and an
/// [`InputPin`]. Driving it high releases the line for reading.
pub struct BitBangTransport<STB, CLK, DIO, D> {
    stb: STB,
    clk: CLK,
    dio: DIO,
    delay: D,
    timing: BitBangTiming,
}

impl<STB, CLK, DIO, D, E> BitBangTransport<STB, CLK, DIO, D>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin<Error = E>,
    D: DelayNs,
{
    /// Takes ownership of the pins and parks the bus idle: strobe high, clock
    /// high, data released.
    pub fn new(stb: STB, clk: CLK, dio: DIO, delay: D) -> Result<Self, E> {
        Self::with_timing(stb, clk, dio, delay, BitBangTiming::default())
    }

    pub fn with_timing(
        mut stb: STB,
        mut clk: CLK,
        mut dio: DIO,
        delay: D,
        timing: BitBangTiming,
    ) -> Result<Self, E> {
        stb.set_high()?;
        clk.set_high()?;
        dio.set_high()?;

        Ok(Self {
            stb,
            clk,
            dio,
            delay,
            timing,
        })
    }

    /// Gives the pins and delay back.
    pub fn release(self) -> (STB, CLK, DIO, D) {
        (self.stb, self.clk, self.dio, self.delay)
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), E> {
        for bit in 0..8 {
            self.clk.set_low()?;
            self.delay.delay_us(self.timing.clock_us);
            if byte & (1 << bit) != 0 {
                self.dio.set_high()?;
            } else {
                self.dio.set_low()?;
            }
            // chip latches DIO on the rising edge
            self.clk.set_high()?;
            self.delay.delay_us(self.timing.clock_us);
        }
        Ok(())
    }

    fn shift_in(&mut self) -> Result<u8, E> {
        let mut byte = 0;
        for bit in 0..8 {
            self.clk.set_low()?;
            self.delay.delay_us(self.timing.clock_us);
            self.clk.set_high()?;
            if self.dio.is_high()? {
                byte |= 1 << bit;
            }
            self.delay.delay_us(self.timing.clock_us);
        }
        Ok(byte)
    }
}

impl<STB, CLK, DIO, D, E> Transport for BitBangTransport<STB, CLK, DIO, D>
where
    STB: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    DIO: OutputPin<Error = E> + InputPin<Error = E>,
    D: DelayNs,
{
    type Error = E;

    fn begin_transaction(&mut self) -> Result<(), E> {
        self.stb.set_low()
    }

    fn end_transaction(&mut self) -> Result<(), E> {
        self.stb.set_high()?;
        // leave DIO released so the next frame starts from a known level
        self.dio.set_high()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), E> {
        for byte in bytes {
            self.shift_out(*byte)?;
        }
        Ok(())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), E> {
        self.dio.set_high()?;
        self.delay.delay_us(self.timing.read_settle_us);

        for byte in buffer.iter_mut() {
            *byte = self.shift_in()?;
            self.delay.delay_us(self.timing.byte_gap_us);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpiTransportError<S, P> {
    Spi(S),
    Strobe(P),
}

/// Hardware SPI bus with a GPIO strobe.
///
/// The bus must already be configured by the HAL for mode 3, LSB first, with
/// MOSI and MISO both tied to DIO (MOSI through a resistor). Chip select is
/// not used; strobe is driven here so a frame can span several bus calls.
pub struct SpiTransport<SPI, STB> {
    spi: SPI,
    stb: STB,
}

impl<SPI, STB> SpiTransport<SPI, STB>
where
    SPI: SpiBus,
    STB: OutputPin,
{
    pub fn new(spi: SPI, mut stb: STB) -> Result<Self, SpiTransportError<SPI::Error, STB::Error>> {
        stb.set_high().map_err(SpiTransportError::Strobe)?;
        Ok(Self { spi, stb })
    }

    pub fn release(self) -> (SPI, STB) {
        (self.spi, self.stb)
    }
}

impl<SPI, STB> Transport for SpiTransport<SPI, STB>
where
    SPI: SpiBus,
    STB: OutputPin,
{
    type Error = SpiTransportError<SPI::Error, STB::Error>;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        self.stb.set_low().map_err(SpiTransportError::Strobe)
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        // strobe may only rise once the last bit is on the wire
        self.spi.flush().map_err(SpiTransportError::Spi)?;
        self.stb.set_high().map_err(SpiTransportError::Strobe)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.spi.write(bytes).map_err(SpiTransportError::Spi)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.flush().map_err(SpiTransportError::Spi)?;
        self.spi.read(buffer).map_err(SpiTransportError::Spi)
    }
}
