//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Measurement front-end and cable constants
///
/// Defaults describe the reference design: a 10-bit converter on a 5 V
/// reference and RG-58 class coax (velocity factor 0.66).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EstimatorConfig {
    /// ADC reference voltage (V)
    pub reference_voltage: f32,
    /// Number of ADC codes (1024 for 10-bit)
    pub adc_resolution: u16,
    /// Cable velocity factor (fraction of c)
    pub velocity_factor: f32,
    /// Longest cable the locator reports on (m); distances clamp to this
    pub cable_length_max_m: f32,
    /// Propagation speed in vacuum (m/s)
    pub speed_of_light: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            reference_voltage: 5.0,
            adc_resolution: 1024,
            velocity_factor: 0.66,
            cable_length_max_m: 1000.0,
            speed_of_light: 3.0e8,
        }
    }
}

impl EstimatorConfig {
    /// Signal propagation speed in the cable (m/s)
    pub fn propagation_speed(&self) -> f32 {
        self.speed_of_light * self.velocity_factor
    }
}

/// Thresholds of the fault decision
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaultThresholds {
    /// Forward voltage at or below which Γ is forced to 0 (V)
    pub forward_floor_v: f32,
    /// VSWR must exceed this to report a fault
    pub vswr_threshold: f32,
    /// Reflected voltage must exceed this to report a fault (V)
    pub reflected_floor_v: f32,
    /// Reported VSWR when Γ ≥ 1 (total reflection)
    pub vswr_sentinel: f32,
}

impl Default for FaultThresholds {
    fn default() -> Self {
        Self {
            forward_floor_v: 0.1,
            vswr_threshold: 2.0,
            reflected_floor_v: 0.2,
            vswr_sentinel: 99.9,
        }
    }
}

/// Test run timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestTiming {
    /// Estimator poll period while running (ms)
    pub poll_interval_ms: u32,
    /// Total length of one test run (ms)
    pub test_duration_ms: u32,
    /// How long the result stays on screen (ms)
    pub report_hold_ms: u32,
    /// Button must be stable this long to count as a press (ms)
    pub debounce_ms: u32,
}

impl Default for TestTiming {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            test_duration_ms: 5000,
            report_hold_ms: 3000,
            debounce_ms: 50,
        }
    }
}

/// Fault alert pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertConfig {
    /// Number of beeps
    pub pulses: u8,
    /// Beep length (ms)
    pub on_ms: u32,
    /// Gap between beeps (ms)
    pub off_ms: u32,
    /// Mirror the buzzer on the fault LED
    pub led: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            pulses: 3,
            on_ms: 200,
            off_ms: 200,
            led: true,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Config format version
    pub version: u8,
    /// Front-end and cable constants
    pub estimator: EstimatorConfig,
    /// Fault decision thresholds
    pub thresholds: FaultThresholds,
    /// Test run timing
    pub timing: TestTiming,
    /// Alert pattern
    pub alert: AlertConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            estimator: EstimatorConfig::default(),
            thresholds: FaultThresholds::default(),
            timing: TestTiming::default(),
            alert: AlertConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_design() {
        let config = DeviceConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.estimator.reference_voltage, 5.0);
        assert_eq!(config.estimator.adc_resolution, 1024);
        assert_eq!(config.estimator.velocity_factor, 0.66);
        assert_eq!(config.estimator.cable_length_max_m, 1000.0);
        assert_eq!(config.estimator.speed_of_light, 3.0e8);
        assert_eq!(config.thresholds.vswr_sentinel, 99.9);
    }

    #[test]
    fn test_propagation_speed() {
        let config = EstimatorConfig::default();
        let v = config.propagation_speed();
        assert!((v - 1.98e8).abs() < 1.0e3);
    }
}
