//! Fault alert outputs

pub mod buzzer;

pub use buzzer::BuzzerAlert;
