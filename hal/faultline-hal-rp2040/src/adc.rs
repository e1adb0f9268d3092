//! ADC channel management
//!
//! RP2040 has a single 12-bit ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor

use embassy_rp::adc::{Adc, Blocking, Channel};
use faultline_hal::{AdcError, AnalogInput};
use heapless::Vec;

/// Number of codes of the RP2040 converter
pub const ADC_RESOLUTION: u16 = 4096;

/// Maximum channels a sampler can hold (the four external inputs)
pub const MAX_CHANNELS: usize = 4;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
    /// Internal temperature sensor
    Temperature,
}

impl AdcChannel {
    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }
}

/// Blocking multi-channel sampler
///
/// Channels are addressed by the order they were added, so the firmware
/// decides which index is "forward" and which is "reflected".
pub struct Rp2040Adc<'d> {
    adc: Adc<'d, Blocking>,
    channels: Vec<Channel<'d>, MAX_CHANNELS>,
}

impl<'d> Rp2040Adc<'d> {
    /// Wrap an initialized blocking ADC
    pub fn new(adc: Adc<'d, Blocking>) -> Self {
        Self {
            adc,
            channels: Vec::new(),
        }
    }

    /// Register a channel, returning its index
    pub fn add_channel(&mut self, channel: Channel<'d>) -> Result<u8, AdcError> {
        let index = self.channels.len() as u8;
        self.channels
            .push(channel)
            .map_err(|_| AdcError::InvalidChannel(index))?;
        Ok(index)
    }
}

impl AnalogInput for Rp2040Adc<'_> {
    fn read(&mut self, channel: u8) -> Result<u16, AdcError> {
        let ch = self
            .channels
            .get_mut(channel as usize)
            .ok_or(AdcError::InvalidChannel(channel))?;
        self.adc.blocking_read(ch).map_err(|_| AdcError::Conversion)
    }

    fn resolution(&self) -> u16 {
        ADC_RESOLUTION
    }
}
