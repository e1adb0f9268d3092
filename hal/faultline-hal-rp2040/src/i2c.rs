//! I2C bus adapter
//!
//! Wraps any embedded-hal 1.0 blocking I2C master (e.g. embassy-rp
//! `I2c<'d, I2C0, Blocking>`) as a `faultline_hal::I2cBus`.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use faultline_hal::I2cBus;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// No device acknowledged
    Nack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Blocking I2C master adapter
pub struct HalI2c<T> {
    bus: T,
}

impl<T: I2c> HalI2c<T> {
    /// Wrap a configured bus
    pub fn new(bus: T) -> Self {
        Self { bus }
    }
}

impl<T: I2c> I2cBus for HalI2c<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}
