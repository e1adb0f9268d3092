//! Analog input abstractions
//!
//! A single converter usually serves several channels, so the trait is
//! addressed by channel index rather than one object per pin.

/// Errors from an analog conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel index not configured on this converter
    InvalidChannel(u8),
    /// The converter reported a conversion failure
    Conversion,
}

/// Multi-channel analog-to-digital converter
///
/// Samples are raw counts in `[0, resolution() - 1]`.
pub trait AnalogInput {
    /// Take a single blocking sample from `channel`
    fn read(&mut self, channel: u8) -> Result<u16, AdcError>;

    /// Number of distinct codes (e.g. 4096 for a 12-bit converter)
    fn resolution(&self) -> u16;
}
