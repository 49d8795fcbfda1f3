//! Monitor task
//!
//! Owns the render engine and the command channel. Every tick it picks up
//! the newest sensor outcome, then serves at most one host command.

use defmt::*;
use embassy_time::{Duration, Ticker};

use envmon_core::channel::CommandChannel;
use envmon_core::config::MonitorConfig;
use envmon_core::controller::{status_text, Controller, Dispatch, Effect, ReadingAction, Reply};
use envmon_core::traits::SensorError;
use envmon_core::Sample;
use envmon_display::{color, DisplayError, RenderEngine};

use crate::board::{HostPort, Screen};
use crate::channels::SENSOR_READING;

/// Banner shown when a reading fails
const SENSOR_ERROR_TEXT: &str = "Sensor error";

/// Banner shown until the first reading
const WAITING_TEXT: &str = "Waiting for sensor...";

type Channel = CommandChannel<HostPort>;
type Engine = RenderEngine<Screen>;

/// Monitor task - renders readings and serves the host
#[embassy_executor::task]
pub async fn monitor_task(mut channel: Channel, mut engine: Engine, config: MonitorConfig) {
    info!("Monitor task started");

    if let Err(e) = draw_frame(&mut engine, &config) {
        warn!("Display bring-up failed: {:?}", e);
    }
    if let Err(e) = channel.begin() {
        warn!("Failed to announce channel: {:?}", e);
    }

    let mut controller = Controller::new();
    let mut ticker = Ticker::every(Duration::from_millis(config.control.tick_ms as u64));

    loop {
        ticker.next().await;

        if let Some(result) = SENSOR_READING.try_take() {
            handle_reading(&mut controller, &mut channel, &mut engine, result);
        }

        if channel.poll_for_command() {
            debug!("Command: {}", channel.command());
            let dispatch = controller.dispatch(channel.command());
            apply(dispatch, &mut channel, &mut engine);
        }
    }
}

/// Splash, then the static frame
fn draw_frame(engine: &mut Engine, config: &MonitorConfig) -> Result<(), DisplayError> {
    engine.begin()?;
    engine.clear_screen()?;
    engine.draw_header()?;
    engine.draw_footer(&config.display.status)?;
    engine.display_message(WAITING_TEXT, color::YELLOW)
}

fn handle_reading(
    controller: &mut Controller,
    channel: &mut Channel,
    engine: &mut Engine,
    result: Result<Sample, SensorError>,
) {
    let action = controller.record_reading(result);

    match action {
        ReadingAction::Recover(_) => {
            info!("Sensor recovered");
            engine.invalidate();
        }
        ReadingAction::ShowError => {
            if let Err(e) = engine.display_message(SENSOR_ERROR_TEXT, color::RED) {
                warn!("Banner failed: {:?}", e);
            }
        }
        ReadingAction::Render(_) | ReadingAction::Skip => {}
    }

    if let Err(e) = result {
        warn!(
            "Sensor unavailable ({} in a row): {:?}",
            controller.consecutive_failures(),
            e
        );
    }

    if let Some(sample) = action.sample() {
        if let Err(e) = engine.render(sample) {
            warn!("Render failed: {:?}", e);
        }
        if let Err(e) = channel.send_telemetry(sample.temperature, sample.humidity) {
            warn!("Telemetry failed: {:?}", e);
        }
    }
}

fn apply(dispatch: Dispatch, channel: &mut Channel, engine: &mut Engine) {
    match dispatch.effect {
        Effect::None => {}
        Effect::SetConnection(connected) => {
            info!("Host {}", status_text(connected));
            if let Err(e) = channel.set_connection_state(connected) {
                warn!("Connection notice failed: {:?}", e);
            }
            if let Err(e) = engine.draw_footer(status_text(connected)) {
                warn!("Footer failed: {:?}", e);
            }
        }
        Effect::ApplyThresholds(t) => {
            info!("Thresholds updated: {:?}", t);
            engine.configure_thresholds(
                t.temperature.min,
                t.temperature.max,
                t.humidity.min,
                t.humidity.max,
            );
        }
        Effect::ToggleThresholdDisplay => engine.toggle_threshold_display(),
    }

    let sent = match dispatch.reply {
        Reply::None => Ok(()),
        Reply::Telemetry(sample) => channel.send_telemetry(sample.temperature, sample.humidity),
        Reply::Response(text) => channel.send_response(text),
    };
    if let Err(e) = sent {
        warn!("Reply failed: {:?}", e);
    }
}
