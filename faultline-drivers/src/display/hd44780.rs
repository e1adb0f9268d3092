//! HD44780 character LCD driver
//!
//! Drives an HD44780-compatible panel through a PCF8574 I2C port
//! expander ("LCD backpack") in 4-bit mode. Expander pin mapping:
//!
//! | P7..P4 | P3        | P2 | P1 | P0 |
//! |--------|-----------|----|----|----|
//! | D7..D4 | backlight | EN | RW | RS |
//!
//! Each nibble is sent as two expander writes: once with EN high and
//! once with EN low. The controller latches on the falling edge.

use embedded_hal::delay::DelayNs;
use faultline_core::traits::{DisplayDriver, DisplayError};
use faultline_hal::I2cBus;

/// Default PCF8574 address (A2..A0 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Expander control bits
mod bits {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_OFF: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM start address of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Panel geometry and bus address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hd44780Config {
    /// 7-bit expander address
    pub address: u8,
    /// Text rows (1..=4)
    pub rows: u8,
    /// Characters per row
    pub cols: u8,
}

impl Default for Hd44780Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            rows: 2,
            cols: 16,
        }
    }
}

/// HD44780 behind a PCF8574 backpack
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Hd44780Config,
    backlight: u8,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    /// Create a driver; call [`init`](Self::init) before use
    pub fn new(i2c: I2C, delay: D, config: Hd44780Config) -> Self {
        let rows = config.rows.clamp(1, ROW_OFFSETS.len() as u8);
        Self {
            i2c,
            delay,
            config: Hd44780Config { rows, ..config },
            backlight: bits::BACKLIGHT,
        }
    }

    /// Run the 4-bit initialization sequence
    ///
    /// The controller may be in 8-bit mode or halfway through a 4-bit
    /// transfer after reset, so it is forced to 8-bit three times before
    /// switching to 4-bit.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);

        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, 0)?;
        self.delay.delay_us(150);

        self.command(cmd::FUNCTION_4BIT_2LINE)?;
        self.command(cmd::DISPLAY_OFF)?;
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE_INCREMENT)?;
        self.command(cmd::DISPLAY_ON)?;
        Ok(())
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= self.config.rows || col >= self.config.cols {
            return Err(DisplayError::OutOfBounds);
        }
        let addr = ROW_OFFSETS[row as usize] + col;
        self.command(cmd::SET_DDRAM | addr)
    }

    /// Release the bus
    pub fn free(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.write_byte(byte, 0)?;
        // Slowest non-clear instruction takes 37 us
        self.delay.delay_us(50);
        Ok(())
    }

    fn data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.write_byte(byte, bits::RS)
    }

    fn write_byte(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte >> 4, mode)?;
        self.write_nibble(byte & 0x0F, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let out = (nibble << 4) | mode | self.backlight;
        self.i2c
            .write(self.config.address, &[out | bits::EN, out])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I2C, D> DisplayDriver for Hd44780<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    fn rows(&self) -> u8 {
        self.config.rows
    }

    fn cols(&self) -> u8 {
        self.config.cols
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(row, col)?;

        let room = (self.config.cols - col) as usize;
        for byte in text.bytes().take(room) {
            // The character ROM only matches ASCII in 0x20..0x7F
            let ch = if (0x20..0x7F).contains(&byte) { byte } else { b'?' };
            self.data(ch)?;
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = if on { bits::BACKLIGHT } else { 0 };
        self.i2c
            .write(self.config.address, &[self.backlight])
            .map_err(|_| DisplayError::Bus)
    }
}
