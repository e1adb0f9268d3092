//! RP2040-specific HAL for the cable fault locator firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `faultline-hal` traits:
//!
//! - GPIO adapters over embedded-hal 1.0 pins (embassy-rp `Input`/`Output`)
//! - I2C adapter over an embedded-hal 1.0 blocking bus
//! - ADC channel map and a multi-channel blocking sampler

#![no_std]

pub mod adc;
pub mod gpio;
pub mod i2c;

pub use adc::{AdcChannel, Rp2040Adc, ADC_RESOLUTION};
pub use gpio::{HalInput, HalOutput};
pub use i2c::HalI2c;

// Re-export shared traits from faultline-hal for convenience
pub use faultline_hal::{AnalogInput, I2cBus, InputPin, OutputPin};
