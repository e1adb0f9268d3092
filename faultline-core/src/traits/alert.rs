//! Alert output trait

/// Audible/visual fault indicator
///
/// Implementations drive a buzzer, an LED, or both.
pub trait AlertOutput {
    /// Turn the indicator on or off
    fn set_active(&mut self, on: bool);

    /// Check if the indicator is currently on
    fn is_active(&self) -> bool;
}
