//! Main controller task
//!
//! Owns the test controller. Receives button presses and tick signals,
//! samples the reflectometer while a run is active, and drives the
//! display, alert and telemetry tasks.

use defmt::*;
use embassy_futures::select::{select, Either};

use faultline_core::config::DeviceConfig;
use faultline_core::controller::TestController;
use faultline_core::measurement::Measurement;
use faultline_core::report::{format_telemetry, Renderer};
use faultline_core::state::{Event, State};
use faultline_drivers::sensor::Reflectometer;
use faultline_hal_rp2040::Rp2040Adc;

use crate::channels::{AlertCommand, ALERT_CMD, BUTTON_PRESSED, SCREEN_UPDATE, TELEMETRY_CHANNEL};
use crate::tasks::display::SCREEN_BUFFER;
use crate::tasks::tick::{now_ms, TICK_SIGNAL};

/// Reflectometer on the RP2040 ADC
pub type Probe = Reflectometer<Rp2040Adc<'static>>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: DeviceConfig, mut probe: Probe) {
    info!("Controller task started");

    let mut controller = TestController::new(&config);
    let mut renderer = Renderer::new();

    render_current_state(&controller, &mut renderer, now_ms()).await;

    loop {
        match select(BUTTON_PRESSED.wait(), TICK_SIGNAL.wait()).await {
            Either::First(()) => {
                let now = now_ms();
                if let Some(event) = controller.button_pressed(now) {
                    info!("Event: {:?} -> {:?}", event, controller.state());
                    ALERT_CMD.signal(AlertCommand::Stop);
                    render_current_state(&controller, &mut renderer, now).await;
                } else {
                    debug!("Button ignored in {:?}", controller.state());
                }
            }

            Either::Second(now) => {
                if controller.state().sampling_allowed() {
                    sample(&mut controller, &mut probe);
                }

                if let Some(event) = controller.tick(now) {
                    handle_transition(&controller, event);
                    render_current_state(&controller, &mut renderer, now).await;
                } else if controller.state() == State::Running {
                    // Progress refresh
                    render_current_state(&controller, &mut renderer, now).await;
                }
            }
        }
    }
}

/// Take one reading; ADC errors skip this tick
fn sample(controller: &mut TestController, probe: &mut Probe) {
    let raw = match probe.sample() {
        Ok(raw) => raw,
        Err(e) => {
            warn!("ADC read failed: {:?}", e);
            return;
        }
    };

    if let Some(m) = controller.record_sample(raw.forward, raw.reflected) {
        publish_telemetry(&m);
    }
}

fn publish_telemetry(m: &Measurement) {
    let line = format_telemetry(m);
    info!("{=str}", line.trim_end());

    if TELEMETRY_CHANNEL.try_send(line).is_err() {
        trace!("Telemetry queue full, line dropped");
    }
}

fn handle_transition(controller: &TestController, event: Event) {
    info!("Event: {:?} -> {:?}", event, controller.state());

    match controller.state() {
        State::Reporting => {
            match controller.last_measurement() {
                Some(m) if m.fault_detected => {
                    warn!("Fault at {} m (VSWR {})", m.fault_distance_m, m.vswr);
                }
                Some(m) => info!("Cable OK (VSWR {})", m.vswr),
                None => warn!("Run finished without a sample"),
            }
            if controller.alert_required() {
                ALERT_CMD.signal(AlertCommand::Start);
            }
        }
        State::Idle => ALERT_CMD.signal(AlertCommand::Stop),
        State::Running => {}
    }
}

/// Render the current state and notify the display task
async fn render_current_state(controller: &TestController, renderer: &mut Renderer, now: u32) {
    match controller.state() {
        State::Idle => renderer.render_idle(),
        State::Running => {
            renderer.render_running(controller.elapsed_ms(now), controller.timing().test_duration_ms)
        }
        State::Reporting => renderer.render_report(controller.last_measurement()),
    }

    {
        let mut screen = SCREEN_BUFFER.lock().await;
        screen.clone_from(renderer.screen());
    }
    SCREEN_UPDATE.signal(());
}
