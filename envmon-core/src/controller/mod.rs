//! Monitor controller
//!
//! Pure decision logic between the peripherals:
//! - Tracks the latest valid sample and the sensor failure streak, and
//!   decides when the error banner goes up and when the screen must be
//!   repainted after it
//! - Maps each host command line to an effect on the monitor and a reply
//!
//! The controller never touches hardware. The firmware's monitor task
//! applies the returned [`Effect`] to the render engine and channel, then
//! sends the [`Reply`].

use envmon_protocol::messages::{
    RESP_ERR_BAD_ARGS, RESP_ERR_UNKNOWN, RESP_NO_DATA, RESP_OK, RESP_PONG, RESP_THRESHOLD_OK,
};
use envmon_protocol::{CommandError, HostCommand};

use crate::sample::Sample;
use crate::threshold::Thresholds;
use crate::traits::SensorError;

/// Footer text while a host is attached
pub const STATUS_CONNECTED: &str = "Connected";

/// Footer text after the host detaches
pub const STATUS_DISCONNECTED: &str = "Disconnected";

/// Footer text for a connection state
pub fn status_text(connected: bool) -> &'static str {
    if connected {
        STATUS_CONNECTED
    } else {
        STATUS_DISCONNECTED
    }
}

/// Change the monitor must apply for a command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    None,
    /// Update the channel flag (which notifies the host) and the footer
    SetConnection(bool),
    /// Reconfigure the render engine's bands
    ApplyThresholds(Thresholds),
    /// Flip the render engine's reserved threshold flag
    ToggleThresholdDisplay,
}

/// Line the monitor must send back for a command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Nothing beyond what the effect already sends
    None,
    /// `D:` telemetry line
    Telemetry(Sample),
    /// `RESP:` line with this body
    Response(&'static str),
}

/// What the monitor must do with a sensor outcome
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadingAction {
    /// Render and transmit the sample
    Render(Sample),
    /// First valid sample after a failure streak: invalidate the render
    /// engine (the error banner overlaps the data area), then render and
    /// transmit
    Recover(Sample),
    /// First failure of a streak: show the sensor error banner
    ShowError,
    /// Further failure: skip this cycle
    Skip,
}

impl ReadingAction {
    /// Sample to render and transmit, if any
    pub fn sample(&self) -> Option<Sample> {
        match self {
            ReadingAction::Render(sample) | ReadingAction::Recover(sample) => Some(*sample),
            ReadingAction::ShowError | ReadingAction::Skip => None,
        }
    }
}

/// Outcome of dispatching one command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    pub effect: Effect,
    pub reply: Reply,
}

impl Dispatch {
    const fn new(effect: Effect, reply: Reply) -> Self {
        Self { effect, reply }
    }

    const fn reply(text: &'static str) -> Self {
        Self::new(Effect::None, Reply::Response(text))
    }
}

/// Monitor controller state
#[derive(Debug, Default)]
pub struct Controller {
    /// Latest valid sample, if any
    latest: Option<Sample>,
    /// Failed readings since the last valid one
    failures: u32,
    /// Valid readings since boot
    readings: u32,
}

impl Controller {
    /// Create a controller with no readings
    pub const fn new() -> Self {
        Self {
            latest: None,
            failures: 0,
            readings: 0,
        }
    }

    /// Record the outcome of a sensor read
    ///
    /// A failure keeps the previous sample available for `GET_DATA`.
    pub fn record_reading(&mut self, result: Result<Sample, SensorError>) -> ReadingAction {
        match result {
            Ok(sample) => {
                let recovering = self.failures > 0;
                self.latest = Some(sample);
                self.failures = 0;
                self.readings = self.readings.saturating_add(1);
                if recovering {
                    ReadingAction::Recover(sample)
                } else {
                    ReadingAction::Render(sample)
                }
            }
            Err(_) => {
                self.failures = self.failures.saturating_add(1);
                if self.failures == 1 {
                    ReadingAction::ShowError
                } else {
                    ReadingAction::Skip
                }
            }
        }
    }

    /// Latest valid sample
    pub fn latest(&self) -> Option<Sample> {
        self.latest
    }

    /// Number of failed readings since the last valid one
    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    /// Number of valid readings since boot
    pub fn reading_count(&self) -> u32 {
        self.readings
    }

    /// Decide what to do with a finalized command line
    pub fn dispatch(&self, line: &str) -> Dispatch {
        match HostCommand::parse(line) {
            Ok(command) => self.handle(command),
            Err(CommandError::Unknown) => Dispatch::reply(RESP_ERR_UNKNOWN),
            Err(CommandError::BadArguments) => Dispatch::reply(RESP_ERR_BAD_ARGS),
        }
    }

    fn handle(&self, command: HostCommand) -> Dispatch {
        match command {
            HostCommand::Connect => Dispatch::new(Effect::SetConnection(true), Reply::None),
            HostCommand::Disconnect => Dispatch::new(Effect::SetConnection(false), Reply::None),
            HostCommand::GetData => match self.latest {
                Some(sample) => Dispatch::new(Effect::None, Reply::Telemetry(sample)),
                None => Dispatch::reply(RESP_NO_DATA),
            },
            HostCommand::SetThreshold(args) => Dispatch::new(
                Effect::ApplyThresholds(args.into()),
                Reply::Response(RESP_THRESHOLD_OK),
            ),
            HostCommand::ToggleThresholds => {
                Dispatch::new(Effect::ToggleThresholdDisplay, Reply::Response(RESP_OK))
            }
            HostCommand::Ping => Dispatch::reply(RESP_PONG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_sample() -> Controller {
        let mut c = Controller::new();
        c.record_reading(Ok(Sample::new(22.5, 48.0)));
        c
    }

    #[test]
    fn test_connect_and_disconnect() {
        let c = Controller::new();
        assert_eq!(
            c.dispatch("CONNECT"),
            Dispatch::new(Effect::SetConnection(true), Reply::None)
        );
        assert_eq!(
            c.dispatch("disconnect"),
            Dispatch::new(Effect::SetConnection(false), Reply::None)
        );
    }

    #[test]
    fn test_get_data_without_sample() {
        let c = Controller::new();
        assert_eq!(c.dispatch("GET_DATA"), Dispatch::reply(RESP_NO_DATA));
    }

    #[test]
    fn test_get_data_returns_latest() {
        let c = with_sample();
        assert_eq!(
            c.dispatch("GET_DATA").reply,
            Reply::Telemetry(Sample::new(22.5, 48.0))
        );
    }

    #[test]
    fn test_set_threshold() {
        let c = Controller::new();
        let d = c.dispatch("SET_THRESHOLD,15,25,40,60");
        assert_eq!(
            d.effect,
            Effect::ApplyThresholds(Thresholds::new(15.0, 25.0, 40.0, 60.0))
        );
        assert_eq!(d.reply, Reply::Response(RESP_THRESHOLD_OK));
    }

    #[test]
    fn test_set_threshold_bad_args() {
        let c = Controller::new();
        assert_eq!(
            c.dispatch("SET_THRESHOLD,15,25"),
            Dispatch::reply(RESP_ERR_BAD_ARGS)
        );
        assert_eq!(
            c.dispatch("SET_THRESHOLD,a,b,c,d"),
            Dispatch::reply(RESP_ERR_BAD_ARGS)
        );
    }

    #[test]
    fn test_toggle_and_ping() {
        let c = Controller::new();
        assert_eq!(
            c.dispatch("TOGGLE_THRESHOLDS"),
            Dispatch::new(Effect::ToggleThresholdDisplay, Reply::Response(RESP_OK))
        );
        assert_eq!(c.dispatch("PING"), Dispatch::reply(RESP_PONG));
    }

    #[test]
    fn test_unknown_command() {
        let c = Controller::new();
        assert_eq!(c.dispatch("REBOOT"), Dispatch::reply(RESP_ERR_UNKNOWN));
    }

    #[test]
    fn test_failed_reading_keeps_latest() {
        let mut c = with_sample();
        c.record_reading(Err(SensorError::Timeout));
        c.record_reading(Err(SensorError::ChecksumMismatch));
        assert_eq!(c.consecutive_failures(), 2);
        assert_eq!(c.latest(), Some(Sample::new(22.5, 48.0)));
        assert_eq!(
            c.dispatch("GET_DATA").reply,
            Reply::Telemetry(Sample::new(22.5, 48.0))
        );
    }

    #[test]
    fn test_error_banner_once_per_streak() {
        let mut c = with_sample();
        assert_eq!(c.record_reading(Err(SensorError::Timeout)), ReadingAction::ShowError);
        assert_eq!(c.record_reading(Err(SensorError::Timeout)), ReadingAction::Skip);
        assert_eq!(c.record_reading(Err(SensorError::Bus)), ReadingAction::Skip);

        let next = Sample::new(23.0, 47.0);
        assert_eq!(c.record_reading(Ok(next)), ReadingAction::Recover(next));
        assert_eq!(c.consecutive_failures(), 0);
        assert_eq!(c.reading_count(), 2);

        // A new streak shows the banner again
        assert_eq!(c.record_reading(Err(SensorError::Timeout)), ReadingAction::ShowError);
    }

    #[test]
    fn test_steady_readings_render_without_recovery() {
        let mut c = Controller::new();
        let a = Sample::new(20.0, 40.0);
        let b = Sample::new(20.5, 41.0);
        assert_eq!(c.record_reading(Ok(a)), ReadingAction::Render(a));
        assert_eq!(c.record_reading(Ok(b)), ReadingAction::Render(b));
        assert_eq!(ReadingAction::Render(b).sample(), Some(b));
        assert_eq!(ReadingAction::ShowError.sample(), None);
    }

    #[test]
    fn test_failure_before_first_sample() {
        let mut c = Controller::new();
        assert_eq!(
            c.record_reading(Err(SensorError::NotInitialized)),
            ReadingAction::ShowError
        );
        let first = Sample::new(19.0, 35.0);
        assert_eq!(c.record_reading(Ok(first)), ReadingAction::Recover(first));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(true), "Connected");
        assert_eq!(status_text(false), "Disconnected");
    }
}
