//! Fault alert pulse patterns
//!
//! A pattern is `pulses` repetitions of `on_ms` high followed by `off_ms`
//! low. The player is time-driven: callers pass the current millisecond
//! clock and get back the level the buzzer should have.

use crate::config::AlertConfig;

/// Pulse pattern player
#[derive(Debug, Clone)]
pub struct AlertPlayer {
    config: AlertConfig,
    started_ms: Option<u32>,
}

impl AlertPlayer {
    /// Create an idle player
    pub const fn new(config: AlertConfig) -> Self {
        Self {
            config,
            started_ms: None,
        }
    }

    /// Start (or restart) the pattern at `now_ms`
    pub fn start(&mut self, now_ms: u32) {
        self.started_ms = Some(now_ms);
    }

    /// Abort the pattern
    pub fn stop(&mut self) {
        self.started_ms = None;
    }

    /// Total pattern length (ms), excluding the trailing gap
    ///
    /// Saturates at `u32::MAX` for patterns longer than the clock range.
    pub fn duration_ms(&self) -> u32 {
        let pulses = self.config.pulses as u32;
        if pulses == 0 {
            return 0;
        }
        pulses
            .saturating_mul(self.period_ms())
            .saturating_sub(self.config.off_ms)
    }

    fn period_ms(&self) -> u32 {
        self.config.on_ms.saturating_add(self.config.off_ms)
    }

    /// Output level at `now_ms`; false when idle or finished
    pub fn output_at(&self, now_ms: u32) -> bool {
        let Some(started) = self.started_ms else {
            return false;
        };
        let period = self.period_ms();
        if period == 0 {
            return false;
        }

        let elapsed = now_ms.wrapping_sub(started);
        let pulse = elapsed / period;
        pulse < self.config.pulses as u32 && elapsed % period < self.config.on_ms
    }

    /// True while a started pattern has not played out
    pub fn is_active(&self, now_ms: u32) -> bool {
        match self.started_ms {
            Some(started) => now_ms.wrapping_sub(started) < self.duration_ms(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> AlertPlayer {
        AlertPlayer::new(AlertConfig {
            pulses: 3,
            on_ms: 200,
            off_ms: 100,
            led: true,
        })
    }

    #[test]
    fn test_idle_is_silent() {
        let p = player();
        assert!(!p.output_at(0));
        assert!(!p.is_active(0));
    }

    #[test]
    fn test_pulse_timing() {
        let mut p = player();
        p.start(1000);
        assert!(p.output_at(1000));
        assert!(p.output_at(1199));
        assert!(!p.output_at(1200));
        assert!(!p.output_at(1299));
        assert!(p.output_at(1300));
        // Third pulse
        assert!(p.output_at(1600));
        assert!(p.output_at(1799));
        // Pattern over
        assert!(!p.output_at(1900));
        assert!(!p.output_at(5000));
    }

    #[test]
    fn test_duration_and_activity() {
        let mut p = player();
        assert_eq!(p.duration_ms(), 800);
        p.start(0);
        assert!(p.is_active(799));
        assert!(!p.is_active(800));
    }

    #[test]
    fn test_clock_wraparound() {
        let mut p = player();
        p.start(u32::MAX - 50);
        assert!(p.output_at(u32::MAX));
        assert!(p.output_at(100));
        assert!(!p.output_at(200));
    }

    #[test]
    fn test_stop() {
        let mut p = player();
        p.start(0);
        p.stop();
        assert!(!p.output_at(10));
    }

    #[test]
    fn test_oversized_timings_saturate() {
        let config = crate::config::parse_config("[alert]\non_ms = 4294967295\noff_ms = 1\n").unwrap();
        let mut p = AlertPlayer::new(config.alert);
        assert_eq!(p.duration_ms(), u32::MAX - 1);

        p.start(0);
        assert!(p.output_at(1_000));
        assert!(p.is_active(1_000));
    }

    #[test]
    fn test_zero_pulses() {
        let mut p = AlertPlayer::new(AlertConfig {
            pulses: 0,
            ..Default::default()
        });
        p.start(0);
        assert_eq!(p.duration_ms(), 0);
        assert!(!p.output_at(0));
        assert!(!p.is_active(0));
    }
}
