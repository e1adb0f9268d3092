//! GPIO adapters
//!
//! embassy-rp pins implement the embedded-hal 1.0 digital traits; these
//! wrappers expose them through the infallible `faultline-hal` traits.

use embedded_hal::digital::{InputPin as EhInputPin, OutputPin as EhOutputPin};
use faultline_hal::{InputPin, OutputPin};

/// Output pin adapter
pub struct HalOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> HalOutput<P> {
    /// Wrap a pin, driving it low
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, high: false }
    }
}

impl<P: EhOutputPin> OutputPin for HalOutput<P> {
    fn set_high(&mut self) {
        // RP2040 GPIO writes cannot fail (Error = Infallible)
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin adapter
///
/// embedded-hal 1.0 reads take `&mut self`; the pin sits behind a
/// `RefCell` so the `faultline-hal` trait can stay `&self`.
pub struct HalInput<P> {
    pin: core::cell::RefCell<P>,
}

impl<P: EhInputPin> HalInput<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self {
            pin: core::cell::RefCell::new(pin),
        }
    }
}

impl<P: EhInputPin> InputPin for HalInput<P> {
    fn is_high(&self) -> bool {
        self.pin.borrow_mut().is_high().unwrap_or(false)
    }
}
