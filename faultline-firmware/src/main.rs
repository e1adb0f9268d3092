//! Faultline - Cable Fault Locator Firmware
//!
//! Main firmware binary for RP2040-based fault locators. Drives the cable
//! under test, compares forward and reflected levels on two ADC channels,
//! and shows VSWR plus an estimated distance to the fault on a 16x2 LCD.
//!
//! Board wiring:
//!
//! | Function           | Pin            |
//! |--------------------|----------------|
//! | Forward level      | GPIO26 (ADC0)  |
//! | Reflected level    | GPIO27 (ADC1)  |
//! | LCD backpack SDA   | GPIO4 (I2C0)   |
//! | LCD backpack SCL   | GPIO5 (I2C0)   |
//! | Test button        | GPIO15 to GND  |
//! | Buzzer             | GPIO16         |
//! | Fault LED          | GPIO17         |
//! | Telemetry TX/RX    | GPIO0/1 (UART0)|

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use faultline_core::config::{parse_config, DeviceConfig};
use faultline_drivers::alert::BuzzerAlert;
use faultline_drivers::display::{Hd44780, Hd44780Config};
use faultline_drivers::sensor::Reflectometer;
use faultline_hal::gpio::ActiveLevel;
use faultline_hal::i2c::I2cConfig;
use faultline_hal_rp2040::{
    AdcChannel, AnalogInput, HalI2c, HalInput, HalOutput, Rp2040Adc, ADC_RESOLUTION,
};

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit locator.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../locator.toml");

/// Conversions averaged per channel on each poll
const ADC_OVERSAMPLE: u8 = 4;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Faultline firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Reflectometer on ADC0 (forward) and ADC1 (reflected)
    let mut adc = Rp2040Adc::new(Adc::new_blocking(p.ADC, adc::Config::default()));
    let forward = adc.add_channel(Channel::new_pin(p.PIN_26, Pull::None));
    let reflected = adc.add_channel(Channel::new_pin(p.PIN_27, Pull::None));
    let (forward, reflected) = match (forward, reflected) {
        (Ok(f), Ok(r)) => (f, r),
        _ => defmt::panic!("ADC channel setup failed"),
    };
    info!(
        "Reflectometer: forward {:?}, reflected {:?}",
        AdcChannel::from_gpio(26),
        AdcChannel::from_gpio(27)
    );

    if config.estimator.adc_resolution != adc.resolution() {
        warn!(
            "Configured ADC resolution {} differs from hardware {}",
            config.estimator.adc_resolution, ADC_RESOLUTION
        );
    }
    let probe = Reflectometer::new(adc, forward, reflected).with_oversample(ADC_OVERSAMPLE);

    // LCD backpack on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let lcd = Hd44780::new(HalI2c::new(i2c), Delay, Hd44780Config::default());
    info!("I2C initialized for LCD");

    // Test button to ground, internal pull-up
    let button = ActiveLevel::new(HalInput::new(Input::new(p.PIN_15, Pull::Up)), true);

    // Buzzer, and the fault LED when the alert mirrors onto it
    let buzzer = HalOutput::new(Output::new(p.PIN_16, Level::Low));
    let led = HalOutput::new(Output::new(p.PIN_17, Level::Low));
    let alarm = BuzzerAlert::new(buzzer, config.alert.led.then_some(led));

    // Telemetry on UART0 (115200 baud default)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 16]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    info!("UART initialized for telemetry");

    // Spawn tasks
    spawner.spawn(tasks::tick_task(config.timing.poll_interval_ms)).unwrap();
    spawner
        .spawn(tasks::button_task(button, config.timing.debounce_ms))
        .unwrap();
    spawner.spawn(tasks::display_task(lcd)).unwrap();
    spawner.spawn(tasks::alert_task(alarm, config.alert)).unwrap();
    spawner.spawn(tasks::telemetry_task(tx)).unwrap();
    spawner.spawn(tasks::controller_task(config, probe)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// build.rs has already validated locator.toml, so a failure here means
/// the firmware parser and the build-time check disagree. Falls back to
/// built-in defaults rather than refusing to boot.
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            DeviceConfig::default()
        }
    }
}
