//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod alert;
pub mod button;
pub mod controller;
pub mod display;
pub mod telemetry;
pub mod tick;

pub use alert::{alert_task, Alarm};
pub use button::{button_task, TestButton};
pub use controller::{controller_task, Probe};
pub use display::{display_task, Lcd};
pub use telemetry::telemetry_task;
pub use tick::tick_task;
