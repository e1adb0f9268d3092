//! Fault alert task
//!
//! Plays the configured pulse pattern on the buzzer (and LED) when the
//! controller reports a fault. A `Stop` command or a restart interrupts a
//! pattern in progress.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use faultline_core::alert::AlertPlayer;
use faultline_core::config::AlertConfig;
use faultline_core::traits::AlertOutput;
use faultline_drivers::alert::BuzzerAlert;
use faultline_hal_rp2040::HalOutput;

use crate::channels::{AlertCommand, ALERT_CMD};
use crate::tasks::tick::now_ms;

/// Output update period while a pattern plays
const STEP_MS: u64 = 10;

/// Buzzer and LED on RP2040 GPIO
pub type Alarm = BuzzerAlert<HalOutput<Output<'static>>, HalOutput<Output<'static>>>;

/// Alert task
#[embassy_executor::task]
pub async fn alert_task(mut output: Alarm, config: AlertConfig) {
    info!("Alert task started");

    let mut player = AlertPlayer::new(config);

    loop {
        let mut command = ALERT_CMD.wait().await;

        // A command received mid-pattern is handled without waiting again
        while command == AlertCommand::Start {
            debug!("Alert pattern start ({} ms)", player.duration_ms());
            player.start(now_ms());
            command = play(&mut player, &mut output).await;
        }

        player.stop();
        output.set_active(false);
    }
}

/// Play until the pattern ends or another command arrives
async fn play(player: &mut AlertPlayer, output: &mut Alarm) -> AlertCommand {
    let mut ticker = Ticker::every(Duration::from_millis(STEP_MS));

    loop {
        let now = now_ms();
        if !player.is_active(now) {
            return AlertCommand::Stop;
        }

        let level = player.output_at(now);
        if level != output.is_active() {
            output.set_active(level);
        }

        match select(ALERT_CMD.wait(), ticker.next()).await {
            Either::First(command) => return command,
            Either::Second(()) => {}
        }
    }
}
