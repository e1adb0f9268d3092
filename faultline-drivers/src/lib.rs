//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in faultline-core, built on the faultline-hal abstractions:
//!
//! - Reflectometer front end (forward/reflected ADC channels)
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - Buzzer and LED fault alert

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alert;
pub mod display;
pub mod sensor;
