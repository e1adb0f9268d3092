//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use faultline_core::report::TelemetryLine;

/// Queued telemetry lines awaiting the UART
const TELEMETRY_CHANNEL_SIZE: usize = 4;

/// Command for the alert task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertCommand {
    /// Play the fault pattern from the beginning
    Start,
    /// Silence the outputs
    Stop,
}

/// Debounced button press (from button task)
pub static BUTTON_PRESSED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Alert command signal (updated by controller)
pub static ALERT_CMD: Signal<CriticalSectionRawMutex, AlertCommand> = Signal::new();

/// Signal that the screen buffer changed
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Telemetry lines for the UART task
///
/// The controller drops lines when the queue is full rather than wait.
pub static TELEMETRY_CHANNEL: Channel<CriticalSectionRawMutex, TelemetryLine, TELEMETRY_CHANNEL_SIZE> =
    Channel::new();
