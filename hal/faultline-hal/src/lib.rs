//! Faultline Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The drivers and the firmware only talk to these
//! traits, so the measurement path can be exercised on the host with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  faultline-drivers / faultline-firmware  │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  faultline-hal (this crate - traits)     │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ faultline-hal-    │
//!           │    rp2040         │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations (LCD backpack)
//! - [`adc::AnalogInput`] - Multi-channel analog sampling

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AnalogInput};
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
