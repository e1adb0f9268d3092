//! Telemetry UART transmit task
//!
//! Writes one line per measurement to UART0 for a serial terminal.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::TELEMETRY_CHANNEL;

/// Telemetry TX task
#[embassy_executor::task]
pub async fn telemetry_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Telemetry task started");

    loop {
        let line = TELEMETRY_CHANNEL.receive().await;
        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send telemetry: {:?}", e);
        }
    }
}
