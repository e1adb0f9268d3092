//! State machine definition
//!
//! Sampling, display and alert behavior is a function of the current
//! state and an event.

use super::events::Event;

/// Locator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for the test button
    #[default]
    Idle,
    /// Test run in progress; the estimator is polled every tick
    Running,
    /// Result of the last run is displayed (and alerted on a fault)
    Reporting,
}

impl State {
    /// Check if the estimator should be polled in this state
    pub fn sampling_allowed(&self) -> bool {
        matches!(self, State::Running)
    }

    /// Check if this state shows a finished result
    pub fn is_reporting(&self) -> bool {
        matches!(self, State::Reporting)
    }

    /// Process an event and return the next state
    ///
    /// A run cannot be cancelled: button presses outside `Idle` are
    /// ignored.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Idle, ButtonPressed) => Running,
            (Running, TestElapsed) => Reporting,
            (Reporting, HoldElapsed) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
