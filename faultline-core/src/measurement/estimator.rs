//! Reflection coefficient, VSWR and fault distance estimation
//!
//! The pipeline is linear and pure:
//!
//! ```text
//! raw counts -> volts -> Γ -> VSWR -> fault? -> time delay -> distance
//! ```
//!
//! # Distance heuristic
//!
//! No pulse is timed. The "time delay" is `(1 - Γ) * L / v`, a monotonic
//! function of Γ alone, so a stronger reflection is read as a closer fault.
//! Halving `delay * v` then gives `(1 - Γ) * L / 2`. The formula must stay
//! exactly as written; it is an approximation, not time-domain
//! reflectometry, which would need pulse timing hardware.

use super::Measurement;
use crate::config::{EstimatorConfig, FaultThresholds};

/// Convert raw ADC counts to volts
///
/// Counts above the converter's top code are read as the top code, so the
/// result stays below `reference_voltage`.
pub fn counts_to_volts(raw: u16, config: &EstimatorConfig) -> f32 {
    let raw = raw.min(config.adc_resolution.saturating_sub(1));
    raw as f32 * config.reference_voltage / config.adc_resolution as f32
}

/// Γ = reflected / forward, guarded against a near-zero forward channel
///
/// At or below `forward_floor_v` the result is exactly 0, which reads as
/// "no reflection" even if the cable is faulty.
pub fn reflection_coefficient(forward_v: f32, reflected_v: f32, thresholds: &FaultThresholds) -> f32 {
    if forward_v > thresholds.forward_floor_v {
        reflected_v / forward_v
    } else {
        0.0
    }
}

/// VSWR from Γ
///
/// The formula is only used below Γ = 1; at or above it the sentinel is
/// returned verbatim rather than extrapolated.
pub fn vswr(gamma: f32, thresholds: &FaultThresholds) -> f32 {
    if gamma < 1.0 {
        (1.0 + gamma) / (1.0 - gamma)
    } else {
        thresholds.vswr_sentinel
    }
}

/// Fault decision: both the mismatch and the reflected level must be high
pub fn is_fault(vswr: f32, reflected_v: f32, thresholds: &FaultThresholds) -> bool {
    vswr > thresholds.vswr_threshold && reflected_v > thresholds.reflected_floor_v
}

/// Heuristic round-trip "time delay" (s) derived from Γ
///
/// See the module docs: this is not a measured delay.
pub fn heuristic_time_delay(gamma: f32, config: &EstimatorConfig) -> f32 {
    let gamma = gamma.clamp(0.0, 1.0);
    (1.0 - gamma) * config.cable_length_max_m / config.propagation_speed()
}

/// Distance (m) from a time delay, clamped to the cable length
pub fn fault_distance(time_delay_s: f32, config: &EstimatorConfig) -> f32 {
    let distance = time_delay_s * config.propagation_speed() / 2.0;
    distance.max(0.0).min(config.cable_length_max_m)
}

/// Replace non-finite input with 0 and clamp into `[0, reference]`
fn sanitize_volts(v: f32, config: &EstimatorConfig) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, config.reference_voltage)
    } else {
        0.0
    }
}

/// Reflectometry estimator
///
/// Holds only constants; every call is independent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Estimator {
    config: EstimatorConfig,
    thresholds: FaultThresholds,
}

impl Estimator {
    /// Create an estimator from explicit constants
    pub const fn new(config: EstimatorConfig, thresholds: FaultThresholds) -> Self {
        Self { config, thresholds }
    }

    /// Front-end and cable constants
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Fault decision thresholds
    pub fn thresholds(&self) -> &FaultThresholds {
        &self.thresholds
    }

    /// Estimate from raw ADC counts
    pub fn estimate(&self, forward_raw: u16, reflected_raw: u16) -> Measurement {
        self.evaluate(
            counts_to_volts(forward_raw, &self.config),
            counts_to_volts(reflected_raw, &self.config),
        )
    }

    /// Estimate from channel voltages
    ///
    /// Voltages outside `[0, reference_voltage]` (or NaN) are brought back
    /// into range first, so Γ and VSWR are always defined.
    pub fn estimate_voltages(&self, forward_v: f32, reflected_v: f32) -> Measurement {
        self.evaluate(
            sanitize_volts(forward_v, &self.config),
            sanitize_volts(reflected_v, &self.config),
        )
    }

    fn evaluate(&self, forward_v: f32, reflected_v: f32) -> Measurement {
        let gamma = reflection_coefficient(forward_v, reflected_v, &self.thresholds);
        let vswr = vswr(gamma, &self.thresholds);
        let fault_detected = is_fault(vswr, reflected_v, &self.thresholds);

        let fault_distance_m = if fault_detected {
            fault_distance(heuristic_time_delay(gamma, &self.config), &self.config)
        } else {
            0.0
        };

        Measurement {
            forward_voltage: forward_v,
            reflected_voltage: reflected_v,
            reflection_coefficient: gamma,
            vswr,
            fault_detected,
            fault_distance_m,
            low_confidence: forward_v <= self.thresholds.forward_floor_v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn estimator() -> Estimator {
        Estimator::default()
    }

    fn close(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_counts_to_volts() {
        let config = EstimatorConfig::default();
        assert_eq!(counts_to_volts(0, &config), 0.0);
        assert_eq!(counts_to_volts(512, &config), 2.5);
        assert!(close(counts_to_volts(1023, &config), 4.995, 1e-3));
    }

    #[test]
    fn test_small_reflection_is_not_a_fault() {
        let m = estimator().estimate_voltages(2.5, 0.1);
        assert!(close(m.reflection_coefficient, 0.04, 1e-6));
        assert!(close(m.vswr, 1.0833, 1e-3));
        assert!(!m.fault_detected);
        assert_eq!(m.fault_distance_m, 0.0);
        assert_eq!(m.distance_m(), None);
        assert!(!m.low_confidence);
    }

    #[test]
    fn test_half_reflection_locates_fault() {
        let m = estimator().estimate_voltages(2.0, 1.0);
        assert_eq!(m.reflection_coefficient, 0.5);
        assert_eq!(m.vswr, 3.0);
        assert!(m.fault_detected);

        let delay = heuristic_time_delay(0.5, estimator().config());
        assert!(close(delay, 2.525e-6, 1e-9));
        assert!(close(m.fault_distance_m, 250.0, 0.01));
        assert!(m.distance_m().is_some());
    }

    #[test]
    fn test_unpowered_forward_masks_reflection() {
        for reflected in [0.0, 0.3, 1.0, 4.9] {
            let m = estimator().estimate_voltages(0.05, reflected);
            assert_eq!(m.reflection_coefficient, 0.0);
            assert_eq!(m.vswr, 1.0);
            assert!(!m.fault_detected);
            assert!(m.low_confidence);
        }
    }

    #[test]
    fn test_total_reflection_uses_sentinel() {
        let m = estimator().estimate_voltages(1.0, 1.0);
        assert_eq!(m.reflection_coefficient, 1.0);
        assert_eq!(m.vswr, 99.9);
        assert!(m.fault_detected);
        assert_eq!(heuristic_time_delay(1.0, estimator().config()), 0.0);
        assert_eq!(m.fault_distance_m, 0.0);
    }

    #[test]
    fn test_gamma_above_one_is_not_clamped() {
        let m = estimator().estimate_voltages(1.0, 2.0);
        assert_eq!(m.reflection_coefficient, 2.0);
        assert_eq!(m.vswr, 99.9);
        assert_eq!(m.fault_distance_m, 0.0);
    }

    #[test]
    fn test_forward_floor_is_exclusive() {
        let t = FaultThresholds::default();
        assert_eq!(reflection_coefficient(0.1, 0.05, &t), 0.0);
        assert!(reflection_coefficient(0.11, 0.05, &t) > 0.0);
    }

    #[test]
    fn test_fault_requires_both_conditions() {
        let t = FaultThresholds::default();
        assert!(is_fault(3.0, 0.5, &t));
        // High VSWR, tiny reflection
        assert!(!is_fault(3.0, 0.2, &t));
        // Large reflection, low VSWR
        assert!(!is_fault(2.0, 0.5, &t));
    }

    #[test]
    fn test_raw_counts_path() {
        // 410 / 205 counts at 5 V / 1024 codes is Γ = 0.5
        let m = estimator().estimate(410, 205);
        assert_eq!(m.reflection_coefficient, 0.5);
        assert!(m.fault_detected);
        assert!(close(m.fault_distance_m, 250.0, 0.01));
    }

    #[test]
    fn test_counts_past_top_code_are_clamped() {
        let m = estimator().estimate(u16::MAX, 0);
        assert_eq!(m.forward_voltage, counts_to_volts(1023, estimator().config()));
        assert!(m.forward_voltage < 5.0);
    }

    #[test]
    fn test_zero_counts() {
        let m = estimator().estimate(0, 0);
        assert_eq!(m.vswr, 1.0);
        assert!(!m.fault_detected);
        assert!(m.low_confidence);
    }

    #[test]
    fn test_nan_input_is_sanitized() {
        let m = estimator().estimate_voltages(f32::NAN, f32::INFINITY);
        assert!(!m.reflection_coefficient.is_nan());
        assert!(!m.vswr.is_nan());
        assert_eq!(m.forward_voltage, 0.0);

        let m = estimator().estimate_voltages(2.0, f32::NAN);
        assert_eq!(m.reflected_voltage, 0.0);
        assert_eq!(m.vswr, 1.0);
    }

    #[test]
    fn test_shorter_cable_scales_distance() {
        let config = EstimatorConfig {
            cable_length_max_m: 100.0,
            ..Default::default()
        };
        let est = Estimator::new(config, FaultThresholds::default());
        let m = est.estimate_voltages(2.0, 1.0);
        assert!(close(m.fault_distance_m, 25.0, 0.01));
    }

    proptest! {
        #[test]
        fn prop_low_forward_never_faults(forward in 0.0f32..=0.1, reflected in 0.0f32..=5.0) {
            let m = estimator().estimate_voltages(forward, reflected);
            prop_assert_eq!(m.reflection_coefficient, 0.0);
            prop_assert_eq!(m.vswr, 1.0);
            prop_assert!(!m.fault_detected);
        }

        #[test]
        fn prop_vswr_formula_below_one(gamma in 0.0f32..0.999) {
            let t = FaultThresholds::default();
            prop_assert_eq!(vswr(gamma, &t), (1.0 + gamma) / (1.0 - gamma));
        }

        #[test]
        fn prop_vswr_monotonic(a in 0.0f32..0.999, b in 0.0f32..0.999) {
            let t = FaultThresholds::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(vswr(lo, &t) <= vswr(hi, &t));
        }

        #[test]
        fn prop_sentinel_at_or_above_one(gamma in 1.0f32..1000.0) {
            let t = FaultThresholds::default();
            prop_assert_eq!(vswr(gamma, &t), 99.9);
        }

        #[test]
        fn prop_distance_within_cable(forward in any::<u16>(), reflected in any::<u16>()) {
            let m = estimator().estimate(forward, reflected);
            prop_assert!((0.0..=5.0).contains(&m.forward_voltage));
            prop_assert!((0.0..=5.0).contains(&m.reflected_voltage));
            prop_assert!(m.fault_distance_m >= 0.0);
            prop_assert!(m.fault_distance_m <= 1000.0);
            prop_assert!(!m.reflection_coefficient.is_nan());
            prop_assert!(!m.vswr.is_nan());
        }

        #[test]
        fn prop_distance_clamps_any_delay(delay in -1.0f32..1.0) {
            let config = EstimatorConfig::default();
            let d = fault_distance(delay, &config);
            prop_assert!((0.0..=1000.0).contains(&d));
        }

        #[test]
        fn prop_fault_matches_decision(forward in 0.0f32..=5.0, reflected in 0.0f32..=5.0) {
            let m = estimator().estimate_voltages(forward, reflected);
            prop_assert_eq!(m.fault_detected, m.vswr > 2.0 && m.reflected_voltage > 0.2);
            prop_assert_eq!(m.distance_m().is_some(), m.fault_detected);
        }
    }
}
