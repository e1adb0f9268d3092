//! Board-agnostic core logic for the cable fault locator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Reflectometry estimator (Γ, VSWR, fault decision, distance heuristic)
//! - Test controller and its state machine
//! - Button debouncing and alert pulse patterns
//! - Screen and telemetry rendering
//! - Configuration types and the embedded config parser
//! - Display and alert output traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alert;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod measurement;
pub mod report;
pub mod state;
pub mod traits;
