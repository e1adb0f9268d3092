//! Measurement front ends

pub mod reflectometer;

pub use reflectometer::{RawSample, Reflectometer};
