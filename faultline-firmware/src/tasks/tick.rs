//! Tick task for time-based updates
//!
//! Provides periodic ticks to the controller for:
//! - Sampling the reflectometer while a run is active
//! - Run and report-hold timers
//! - Progress display refresh

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Signal to notify controller of tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Milliseconds since boot, wrapping after ~49 days
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task(interval_ms: u32) {
    info!("Tick task started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(now_ms());
    }
}
