//! Character LCD task
//!
//! Copies the shared screen buffer to the HD44780 whenever the controller
//! signals an update.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;

use faultline_core::report::Screen;
use faultline_core::traits::DisplayExt;
use faultline_drivers::display::Hd44780;
use faultline_hal_rp2040::HalI2c;

use crate::channels::SCREEN_UPDATE;

/// Shared screen buffer protected by mutex
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// LCD backpack on I2C0
pub type Lcd = Hd44780<HalI2c<I2c<'static, I2C0, Blocking>>, Delay>;

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd) {
    info!("Display task started");

    let mut ready = init(&mut lcd);

    loop {
        SCREEN_UPDATE.wait().await;

        // A panel that failed to come up is retried on each update
        if !ready {
            ready = init(&mut lcd);
            if !ready {
                continue;
            }
        }

        let screen = SCREEN_BUFFER.lock().await.clone();
        if let Err(e) = lcd.draw_screen(&screen) {
            warn!("LCD write failed: {:?}", e);
        }
    }
}

fn init(lcd: &mut Lcd) -> bool {
    match lcd.init() {
        Ok(()) => {
            info!("LCD initialized");
            true
        }
        Err(e) => {
            warn!("LCD init failed: {:?}", e);
            false
        }
    }
}
