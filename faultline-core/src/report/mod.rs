//! Result presentation
//!
//! Builds what the operator sees: the LCD screen for each controller state
//! and the per-tick telemetry line.

pub mod screen;
pub mod telemetry;

pub use screen::{Renderer, Screen, SCREEN_COLS, SCREEN_ROWS};
pub use telemetry::{format_telemetry, TelemetryLine};
