//! Configuration types
//!
//! Front-end constants, thresholds and timings are grouped into plain
//! structs so the estimator and the controller can be exercised across
//! parameter sets.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, validate, ParseError};
pub use types::{
    AlertConfig, DeviceConfig, EstimatorConfig, FaultThresholds, TestTiming, CONFIG_VERSION,
};
