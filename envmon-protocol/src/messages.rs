//! Outbound messages from the monitor to the host
//!
//! Two kinds of line are sent:
//! - Telemetry: `D:<temp>,<hum>` with one decimal per field
//! - Responses: `RESP:<text>` for acknowledgements and status changes

use core::fmt::Write;
use heapless::String;

use crate::line::MAX_LINE_LEN;

/// Prefix for telemetry lines
pub const TELEMETRY_PREFIX: &str = "D:";

/// Prefix for response lines
pub const RESPONSE_PREFIX: &str = "RESP:";

// Fixed response bodies
pub const RESP_READY: &str = "READY";
pub const RESP_CONNECTED: &str = "CONNECTED";
pub const RESP_DISCONNECTED: &str = "DISCONNECTED";
pub const RESP_OK: &str = "OK";
pub const RESP_PONG: &str = "PONG";
pub const RESP_NO_DATA: &str = "NO_DATA";
pub const RESP_THRESHOLD_OK: &str = "THRESHOLD_OK";
pub const RESP_ERR_UNKNOWN: &str = "ERR:UNKNOWN";
pub const RESP_ERR_BAD_ARGS: &str = "ERR:BAD_ARGS";

/// Errors that can occur while encoding a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Encoded line does not fit in `MAX_LINE_LEN`
    LineTooLong,
}

impl From<core::fmt::Error> for EncodeError {
    fn from(_: core::fmt::Error) -> Self {
        EncodeError::LineTooLong
    }
}

/// Messages from the monitor to the host
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage<'a> {
    /// Periodic sensor reading
    Telemetry { temperature: f32, humidity: f32 },
    /// Free-form tagged response
    Response(&'a str),
    /// Channel is up (sent once at start)
    Ready,
    /// Host link established
    Connected,
    /// Host link dropped
    Disconnected,
}

impl<'a> DeviceMessage<'a> {
    /// Encode this message as a line (without the terminator)
    pub fn encode(&self) -> Result<String<MAX_LINE_LEN>, EncodeError> {
        let mut line: String<MAX_LINE_LEN> = String::new();
        match self {
            DeviceMessage::Telemetry {
                temperature,
                humidity,
            } => {
                write!(line, "{}{:.1},{:.1}", TELEMETRY_PREFIX, temperature, humidity)?;
            }
            DeviceMessage::Response(text) => {
                write!(line, "{}{}", RESPONSE_PREFIX, text)?;
            }
            DeviceMessage::Ready => write!(line, "{}{}", RESPONSE_PREFIX, RESP_READY)?,
            DeviceMessage::Connected => write!(line, "{}{}", RESPONSE_PREFIX, RESP_CONNECTED)?,
            DeviceMessage::Disconnected => {
                write!(line, "{}{}", RESPONSE_PREFIX, RESP_DISCONNECTED)?
            }
        }
        Ok(line)
    }

    /// Message reporting a connection state change
    pub fn connection(connected: bool) -> Self {
        if connected {
            DeviceMessage::Connected
        } else {
            DeviceMessage::Disconnected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_one_decimal() {
        let msg = DeviceMessage::Telemetry {
            temperature: 21.5,
            humidity: 60.2,
        };
        assert_eq!(msg.encode().unwrap().as_str(), "D:21.5,60.2");
    }

    #[test]
    fn test_telemetry_rounds_and_signs() {
        let msg = DeviceMessage::Telemetry {
            temperature: -5.04,
            humidity: 99.96,
        };
        assert_eq!(msg.encode().unwrap().as_str(), "D:-5.0,100.0");
    }

    #[test]
    fn test_fixed_responses() {
        assert_eq!(DeviceMessage::Ready.encode().unwrap().as_str(), "RESP:READY");
        assert_eq!(
            DeviceMessage::connection(true).encode().unwrap().as_str(),
            "RESP:CONNECTED"
        );
        assert_eq!(
            DeviceMessage::connection(false).encode().unwrap().as_str(),
            "RESP:DISCONNECTED"
        );
    }

    #[test]
    fn test_response_text() {
        let msg = DeviceMessage::Response("THRESHOLD_OK");
        assert_eq!(msg.encode().unwrap().as_str(), "RESP:THRESHOLD_OK");
    }

    #[test]
    fn test_response_too_long() {
        let long = [b'x'; MAX_LINE_LEN];
        let text = core::str::from_utf8(&long).unwrap();
        let msg = DeviceMessage::Response(text);
        assert_eq!(msg.encode(), Err(EncodeError::LineTooLong));
    }
}
