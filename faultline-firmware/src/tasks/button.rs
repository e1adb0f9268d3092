//! Test button task
//!
//! Samples the button at a fixed rate and signals the controller on each
//! debounced press. Releases are only logged.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use faultline_core::debounce::{Debouncer, Edge};
use faultline_hal::gpio::ActiveLevel;
use faultline_hal_rp2040::HalInput;

use crate::channels::BUTTON_PRESSED;

/// Button sampling period
const SAMPLE_PERIOD_MS: u32 = 10;

/// Test button wired to ground with the internal pull-up
pub type TestButton = ActiveLevel<HalInput<Input<'static>>>;

/// Button task
#[embassy_executor::task]
pub async fn button_task(button: TestButton, debounce_ms: u32) {
    info!("Button task started");

    let mut debouncer = Debouncer::new(debounce_ms, SAMPLE_PERIOD_MS);
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS as u64));

    loop {
        match debouncer.update(button.is_active()) {
            Some(Edge::Pressed) => {
                debug!("Button pressed");
                BUTTON_PRESSED.signal(());
            }
            Some(Edge::Released) => trace!("Button released"),
            None => {}
        }

        ticker.next().await;
    }
}
