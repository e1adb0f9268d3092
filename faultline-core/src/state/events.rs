//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Debounced press of the test button
    ButtonPressed,
    /// The fixed test duration ran out
    TestElapsed,
    /// The result has been on screen for the hold time
    HoldElapsed,
}
