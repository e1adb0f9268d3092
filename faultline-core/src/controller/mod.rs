//! Test controller
//!
//! Drives one test run at a time:
//!
//! ```text
//! Idle --button--> Running --duration--> Reporting --hold--> Idle
//! ```
//!
//! The controller performs no I/O. The firmware feeds it button edges,
//! ADC samples and the millisecond clock, then reads back the state, the
//! last measurement and whether an alert is due.

use crate::config::{DeviceConfig, TestTiming};
use crate::measurement::{Estimator, Measurement};
use crate::state::{Event, State};

/// Test run coordinator
#[derive(Debug, Clone)]
pub struct TestController {
    /// Current state
    state: State,
    /// Pure reflectometry pipeline
    estimator: Estimator,
    /// Run timing
    timing: TestTiming,
    /// Latest measurement of the current (or just finished) run
    last: Option<Measurement>,
    /// Clock value when the current state was entered
    state_entered_ms: u32,
    /// Samples taken in the current run
    samples: u32,
}

impl TestController {
    /// Create a controller in `Idle`
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            state: State::Idle,
            estimator: Estimator::new(config.estimator, config.thresholds),
            timing: config.timing,
            last: None,
            state_entered_ms: 0,
            samples: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Latest measurement, if the run has produced one
    pub fn last_measurement(&self) -> Option<&Measurement> {
        self.last.as_ref()
    }

    /// Samples taken in the current run
    pub fn sample_count(&self) -> u32 {
        self.samples
    }

    /// Run timing
    pub fn timing(&self) -> &TestTiming {
        &self.timing
    }

    /// The estimator used for every sample
    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Time spent in the current state
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.state_entered_ms)
    }

    /// Handle a debounced button press
    ///
    /// Starts a run from `Idle`; ignored otherwise.
    pub fn button_pressed(&mut self, now_ms: u32) -> Option<Event> {
        if self.state != State::Idle {
            return None;
        }
        self.last = None;
        self.samples = 0;
        self.transition(Event::ButtonPressed, now_ms);
        Some(Event::ButtonPressed)
    }

    /// Feed one pair of raw ADC samples
    ///
    /// Only accepted while `Running`; the result replaces the previous
    /// measurement.
    pub fn record_sample(&mut self, forward_raw: u16, reflected_raw: u16) -> Option<Measurement> {
        if !self.state.sampling_allowed() {
            return None;
        }
        let measurement = self.estimator.estimate(forward_raw, reflected_raw);
        self.last = Some(measurement);
        self.samples = self.samples.saturating_add(1);
        Some(measurement)
    }

    /// Advance timers, returning the event of any transition taken
    pub fn tick(&mut self, now_ms: u32) -> Option<Event> {
        let elapsed = self.elapsed_ms(now_ms);
        let event = match self.state {
            State::Running if elapsed >= self.timing.test_duration_ms => Event::TestElapsed,
            State::Reporting if elapsed >= self.timing.report_hold_ms => Event::HoldElapsed,
            _ => return None,
        };
        self.transition(event, now_ms);
        Some(event)
    }

    /// A fault alert is due: reporting a run whose last reading faulted
    pub fn alert_required(&self) -> bool {
        self.state.is_reporting() && self.last.is_some_and(|m| m.fault_detected)
    }

    fn transition(&mut self, event: Event, now_ms: u32) {
        let next = self.state.transition(event);
        if next != self.state {
            self.state = next;
            self.state_entered_ms = now_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> TestController {
        TestController::new(&DeviceConfig::default())
    }

    #[test]
    fn test_starts_idle() {
        let c = controller();
        assert_eq!(c.state(), State::Idle);
        assert!(c.last_measurement().is_none());
        assert!(!c.alert_required());
    }

    #[test]
    fn test_samples_ignored_when_not_running() {
        let mut c = controller();
        assert!(c.record_sample(410, 205).is_none());
        assert!(c.last_measurement().is_none());
    }

    #[test]
    fn test_full_run_with_fault() {
        let mut c = controller();
        assert_eq!(c.button_pressed(1000), Some(Event::ButtonPressed));
        assert_eq!(c.state(), State::Running);

        // Healthy reading first, then a fault; the last one wins
        let first = c.record_sample(512, 20).unwrap();
        assert!(!first.fault_detected);
        let second = c.record_sample(410, 205).unwrap();
        assert!(second.fault_detected);
        assert_eq!(c.sample_count(), 2);

        assert_eq!(c.tick(5999), None);
        assert_eq!(c.tick(6000), Some(Event::TestElapsed));
        assert_eq!(c.state(), State::Reporting);
        assert!(c.alert_required());
        assert_eq!(c.last_measurement(), Some(&second));

        // No sampling while reporting
        assert!(c.record_sample(512, 20).is_none());

        assert_eq!(c.tick(8999), None);
        assert_eq!(c.tick(9000), Some(Event::HoldElapsed));
        assert_eq!(c.state(), State::Idle);
        assert!(!c.alert_required());
    }

    #[test]
    fn test_healthy_run_does_not_alert() {
        let mut c = controller();
        c.button_pressed(0);
        c.record_sample(512, 20);
        c.tick(5000);
        assert_eq!(c.state(), State::Reporting);
        assert!(!c.alert_required());
    }

    #[test]
    fn test_button_ignored_during_run() {
        let mut c = controller();
        c.button_pressed(0);
        assert_eq!(c.button_pressed(100), None);
        // The run keeps its original start time
        assert_eq!(c.tick(5000), Some(Event::TestElapsed));
        assert_eq!(c.button_pressed(5100), None);
    }

    #[test]
    fn test_new_run_clears_last_measurement() {
        let mut c = controller();
        c.button_pressed(0);
        c.record_sample(410, 205);
        c.tick(5000);
        c.tick(8000);
        assert_eq!(c.state(), State::Idle);
        assert!(c.last_measurement().is_some());

        c.button_pressed(9000);
        assert!(c.last_measurement().is_none());
        assert_eq!(c.sample_count(), 0);
    }

    #[test]
    fn test_run_without_samples_reports_nothing() {
        let mut c = controller();
        c.button_pressed(0);
        c.tick(5000);
        assert_eq!(c.state(), State::Reporting);
        assert!(c.last_measurement().is_none());
        assert!(!c.alert_required());
    }

    #[test]
    fn test_clock_wraparound() {
        let mut c = controller();
        c.button_pressed(u32::MAX - 1000);
        assert_eq!(c.tick(1000), None);
        assert_eq!(c.tick(4000), Some(Event::TestElapsed));
    }

    #[test]
    fn test_custom_timing() {
        let mut config = DeviceConfig::default();
        config.timing.test_duration_ms = 200;
        config.timing.report_hold_ms = 50;
        let mut c = TestController::new(&config);
        c.button_pressed(0);
        assert_eq!(c.tick(200), Some(Event::TestElapsed));
        assert_eq!(c.tick(250), Some(Event::HoldElapsed));
    }
}
