//! Reflectometry measurements
//!
//! A [`Measurement`] is produced once per poll tick by the [`Estimator`]
//! and never mutated afterwards. The controller keeps the latest one as
//! explicit state; nothing here is global.

pub mod estimator;

pub use estimator::Estimator;

/// One reflectometry reading and the decisions derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Forward channel voltage (V), within `[0, reference_voltage]`
    pub forward_voltage: f32,
    /// Reflected channel voltage (V), within `[0, reference_voltage]`
    pub reflected_voltage: f32,
    /// Γ = reflected / forward, or 0 when the forward channel is below the
    /// floor. Not clamped: may exceed 1.0.
    pub reflection_coefficient: f32,
    /// Voltage standing wave ratio, or the sentinel when Γ ≥ 1
    pub vswr: f32,
    /// VSWR and reflected voltage both exceeded their thresholds
    pub fault_detected: bool,
    /// Heuristic distance to the fault (m); 0.0 when no fault
    pub fault_distance_m: f32,
    /// Forward channel was at or below the floor, so Γ was forced to 0
    /// and the reading cannot show a fault
    pub low_confidence: bool,
}

impl Measurement {
    /// Distance to the fault, only when a fault was detected
    pub fn distance_m(&self) -> Option<f32> {
        if self.fault_detected {
            Some(self.fault_distance_m)
        } else {
            None
        }
    }
}
