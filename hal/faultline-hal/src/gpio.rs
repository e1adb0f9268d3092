//! GPIO pin abstractions
//!
//! Digital input and output pins used for the test button, the buzzer
//! and the fault LED.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;
}

/// Input pin wrapper that reports "active" according to the wiring
///
/// A button to ground with a pull-up reads low when pressed; set
/// `active_low` for that case.
pub struct ActiveLevel<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> ActiveLevel<P> {
    /// Wrap a pin with the given polarity
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// True when the input is in its asserted state
    pub fn is_active(&self) -> bool {
        self.pin.is_high() != self.active_low
    }
}
