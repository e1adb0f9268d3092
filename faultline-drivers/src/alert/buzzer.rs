//! Buzzer and LED fault alert
//!
//! An active buzzer on one GPIO and an optional LED on another. Both are
//! switched together.

use faultline_core::traits::AlertOutput;
use faultline_hal::OutputPin;

/// Buzzer with an optional mirrored LED
pub struct BuzzerAlert<B, L> {
    buzzer: B,
    led: Option<L>,
    active: bool,
}

impl<B: OutputPin, L: OutputPin> BuzzerAlert<B, L> {
    /// Create an alert output; both pins are driven low
    pub fn new(mut buzzer: B, led: Option<L>) -> Self {
        buzzer.set_low();
        let led = led.map(|mut l| {
            l.set_low();
            l
        });
        Self {
            buzzer,
            led,
            active: false,
        }
    }

    /// Drive the LED independently of the buzzer (e.g. "fault latched")
    pub fn set_led(&mut self, on: bool) {
        if let Some(led) = self.led.as_mut() {
            led.set_state(on);
        }
    }
}

impl<B: OutputPin, L: OutputPin> AlertOutput for BuzzerAlert<B, L> {
    fn set_active(&mut self, on: bool) {
        self.buzzer.set_state(on);
        self.set_led(on);
        self.active = on;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pin {
        high: bool,
        writes: u8,
    }

    impl OutputPin for Pin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_buzzer_and_led_follow() {
        let mut alert = BuzzerAlert::new(Pin::default(), Some(Pin::default()));
        alert.set_active(true);
        assert!(alert.is_active());
        assert!(alert.buzzer.is_set_high());
        assert!(alert.led.as_ref().unwrap().is_set_high());

        alert.set_active(false);
        assert!(!alert.buzzer.is_set_high());
        assert!(!alert.led.as_ref().unwrap().is_set_high());
    }

    #[test]
    fn test_without_led() {
        let mut alert: BuzzerAlert<Pin, Pin> = BuzzerAlert::new(Pin::default(), None);
        alert.set_active(true);
        assert!(alert.buzzer.is_set_high());
        alert.set_led(true);
        assert!(alert.led.is_none());
    }

    #[test]
    fn test_pins_start_low() {
        let alert = BuzzerAlert::new(Pin { high: true, writes: 0 }, Some(Pin { high: true, writes: 0 }));
        assert!(!alert.buzzer.is_set_high());
        assert!(!alert.led.as_ref().unwrap().is_set_high());
        assert!(!alert.is_active());
    }
}
