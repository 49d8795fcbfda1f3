//! Line-delimited command channel
//!
//! Owns the serial transport and the inbound line buffer. Inbound bytes
//! are drained without blocking and turned into trimmed commands, at most
//! one per poll. Lines that overflow the buffer or are not UTF-8 are
//! dropped and counted. Outbound telemetry and responses are written as tagged
//! lines and flushed immediately.
//!
//! ```text
//!          byte                 '\n' (non-empty)
//!  Idle ──────────▶ Accumulating ───────────────▶ CommandReady
//!   ▲                   │ '\n' (blank)                 │
//!   └───────────────────┘◀─────────── next poll ───────┘
//! ```

use heapless::String;

use envmon_hal::SerialPort;
use envmon_protocol::{DeviceMessage, EncodeError, LineBuffer, LineError, MAX_LINE_LEN};

/// Channel state as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// No partial line held
    Idle,
    /// Partial line held, waiting for its terminator
    Accumulating,
    /// The last poll finalized a command
    CommandReady,
}

/// Errors from outbound writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError<E> {
    /// Transport rejected the write or flush
    Transport(E),
    /// Message does not fit in one line
    Encode(EncodeError),
}

impl<E> From<EncodeError> for ChannelError<E> {
    fn from(e: EncodeError) -> Self {
        ChannelError::Encode(e)
    }
}

/// Command channel over a serial transport
pub struct CommandChannel<T> {
    port: T,
    line: LineBuffer,
    /// Most recently finalized command
    command: String<MAX_LINE_LEN>,
    /// Set by a poll that finalized a command, cleared by the next poll
    ready: bool,
    connected: bool,
    /// Lines dropped for exceeding `MAX_LINE_LEN` or failing to decode
    dropped: u32,
}

impl<T: SerialPort> CommandChannel<T> {
    /// Create a channel that exclusively owns `port`
    pub fn new(port: T) -> Self {
        Self {
            port,
            line: LineBuffer::new(),
            command: String::new(),
            ready: false,
            connected: false,
            dropped: 0,
        }
    }

    /// Announce the channel to the host (`RESP:READY`)
    pub fn begin(&mut self) -> Result<(), ChannelError<T::Error>> {
        self.send(DeviceMessage::Ready)
    }

    /// Drain available bytes looking for one complete command
    ///
    /// Returns `true` as soon as a non-empty line is finalized; bytes after
    /// its terminator stay in the transport for the next call. Blank lines
    /// are dropped silently. Returns `false` when the available bytes run
    /// out without a complete command.
    pub fn poll_for_command(&mut self) -> bool {
        self.ready = false;

        while self.port.bytes_available() {
            let byte = match self.port.read_byte() {
                Ok(Some(byte)) => byte,
                // Read errors end the drain like an empty receive buffer
                Ok(None) | Err(_) => break,
            };

            match self.line.feed(byte) {
                Ok(Some(line)) => {
                    self.command = line;
                    self.ready = true;
                    return true;
                }
                Ok(None) => {}
                Err(LineError::Overflow | LineError::InvalidUtf8) => {
                    self.dropped = self.dropped.saturating_add(1);
                }
            }
        }

        false
    }

    /// Most recently finalized command
    ///
    /// Only meaningful right after `poll_for_command` returned `true`;
    /// otherwise this is the previous command (or empty before the first).
    pub fn command(&self) -> &str {
        self.command.as_str()
    }

    /// Current channel state
    pub fn state(&self) -> ChannelState {
        if self.ready {
            ChannelState::CommandReady
        } else if !self.line.is_empty() || self.line.is_discarding() {
            ChannelState::Accumulating
        } else {
            ChannelState::Idle
        }
    }

    /// Send a `D:<temp>,<hum>` telemetry line
    pub fn send_telemetry(
        &mut self,
        temperature: f32,
        humidity: f32,
    ) -> Result<(), ChannelError<T::Error>> {
        self.send(DeviceMessage::Telemetry {
            temperature,
            humidity,
        })
    }

    /// Send a `RESP:<text>` line
    pub fn send_response(&mut self, text: &str) -> Result<(), ChannelError<T::Error>> {
        self.send(DeviceMessage::Response(text))
    }

    /// Write a raw line and flush
    pub fn send_line(&mut self, text: &str) -> Result<(), ChannelError<T::Error>> {
        self.port.write_line(text).map_err(ChannelError::Transport)?;
        self.port.flush().map_err(ChannelError::Transport)
    }

    /// Record the host link state and notify the host
    ///
    /// The flag is updated even if the notification cannot be written.
    pub fn set_connection_state(&mut self, connected: bool) -> Result<(), ChannelError<T::Error>> {
        self.connected = connected;
        self.send(DeviceMessage::connection(connected))
    }

    /// Check if a host is attached
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of inbound lines dropped for being too long or not UTF-8
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }

    /// Access the underlying transport
    pub fn port(&self) -> &T {
        &self.port
    }

    /// Mutable access to the underlying transport
    pub fn port_mut(&mut self) -> &mut T {
        &mut self.port
    }

    fn send(&mut self, msg: DeviceMessage<'_>) -> Result<(), ChannelError<T::Error>> {
        let line = msg.encode()?;
        self.send_line(&line)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::string::String as StdString;
    use std::vec::Vec;

    /// Scripted transport: bytes queued in `rx`, writes collected in `tx`
    #[derive(Default)]
    struct MockPort {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
        /// Bytes of `tx` that had been written when each flush happened
        flushes: Vec<usize>,
    }

    impl MockPort {
        fn push(&mut self, bytes: &[u8]) {
            self.rx.extend(bytes.iter().copied());
        }

        fn lines(&self) -> Vec<StdString> {
            StdString::from_utf8(self.tx.clone())
                .unwrap()
                .lines()
                .map(StdString::from)
                .collect()
        }
    }

    impl SerialPort for MockPort {
        type Error = ();

        fn bytes_available(&mut self) -> bool {
            !self.rx.is_empty()
        }

        fn read_byte(&mut self) -> Result<Option<u8>, ()> {
            Ok(self.rx.pop_front())
        }

        fn write_all(&mut self, data: &[u8]) -> Result<(), ()> {
            self.tx.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes.push(self.tx.len());
            Ok(())
        }
    }

    fn channel() -> CommandChannel<MockPort> {
        CommandChannel::new(MockPort::default())
    }

    #[test]
    fn test_command_split_across_polls() {
        let mut ch = channel();
        ch.port_mut().push(b"PI");
        assert!(!ch.poll_for_command());
        assert_eq!(ch.state(), ChannelState::Accumulating);

        ch.port_mut().push(b"NG\n");
        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "PING");
        assert_eq!(ch.state(), ChannelState::CommandReady);
    }

    #[test]
    fn test_empty_line_stays_idle() {
        let mut ch = channel();
        ch.port_mut().push(b"\n");
        assert!(!ch.poll_for_command());
        assert_eq!(ch.state(), ChannelState::Idle);
    }

    #[test]
    fn test_one_command_per_poll() {
        let mut ch = channel();
        ch.port_mut().push(b"A\nB\n");

        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "A");
        // "B\n" is still waiting in the transport
        assert_eq!(ch.port().rx.len(), 2);

        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "B");

        assert!(!ch.poll_for_command());
        assert_eq!(ch.state(), ChannelState::Idle);
    }

    #[test]
    fn test_command_text_is_stale_until_next_line() {
        let mut ch = channel();
        ch.port_mut().push(b"GET_DATA\n");
        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "GET_DATA");
        assert_eq!(ch.command(), "GET_DATA");

        assert!(!ch.poll_for_command());
        assert_eq!(ch.command(), "GET_DATA");
        assert_eq!(ch.state(), ChannelState::Idle);
    }

    #[test]
    fn test_blank_lines_skipped_before_command() {
        let mut ch = channel();
        ch.port_mut().push(b"\r\n  \nCONNECT\r\n");
        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "CONNECT");
    }

    #[test]
    fn test_drain_reaches_command_behind_blank_lines() {
        let mut ch = channel();
        for _ in 0..300 {
            ch.port_mut().push(b"\n");
        }
        ch.port_mut().push(b"PING\n");

        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "PING");
        assert!(ch.port().rx.is_empty());
    }

    #[test]
    fn test_flood_without_terminator_is_drained() {
        let mut ch = channel();
        let flood = [b'x'; 3 * MAX_LINE_LEN];
        ch.port_mut().push(&flood);

        assert!(!ch.poll_for_command());
        assert!(ch.port().rx.is_empty());
        assert_eq!(ch.dropped_count(), 1);
        assert_eq!(ch.state(), ChannelState::Accumulating);
    }

    #[test]
    fn test_utf8_command_is_not_mangled() {
        let mut ch = channel();
        ch.port_mut().push("SET_NAME,é\n".as_bytes());
        assert!(ch.poll_for_command());
        assert_eq!(ch.command().as_bytes(), "SET_NAME,é".as_bytes());
    }

    #[test]
    fn test_undecodable_line_is_dropped() {
        let mut ch = channel();
        ch.port_mut().push(&[b'A', 0xA0, b'\n']);
        ch.port_mut().push(b"PING\n");

        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "PING");
        assert_eq!(ch.dropped_count(), 1);
    }

    #[test]
    fn test_overlong_line_never_surfaces() {
        let mut ch = channel();
        let long = [b'y'; MAX_LINE_LEN + 5];
        ch.port_mut().push(&long);
        ch.port_mut().push(b"\nPING\n");

        assert!(ch.poll_for_command());
        assert_eq!(ch.command(), "PING");
        assert_eq!(ch.dropped_count(), 1);
    }

    #[test]
    fn test_send_telemetry_format_and_flush() {
        let mut ch = channel();
        ch.send_telemetry(21.5, 60.2).unwrap();

        assert_eq!(ch.port().lines(), ["D:21.5,60.2"]);
        assert_eq!(ch.port().flushes, [ch.port().tx.len()]);
    }

    #[test]
    fn test_send_response_is_tagged() {
        let mut ch = channel();
        ch.send_response("PONG").unwrap();
        assert_eq!(ch.port().lines(), ["RESP:PONG"]);
        assert_eq!(ch.port().flushes.len(), 1);
    }

    #[test]
    fn test_begin_announces_ready() {
        let mut ch = channel();
        ch.begin().unwrap();
        assert_eq!(ch.port().lines(), ["RESP:READY"]);
    }

    #[test]
    fn test_connection_state_notifies_once() {
        let mut ch = channel();
        assert!(!ch.is_connected());

        ch.set_connection_state(true).unwrap();
        assert!(ch.is_connected());
        assert_eq!(ch.port().lines(), ["RESP:CONNECTED"]);

        ch.set_connection_state(false).unwrap();
        assert!(!ch.is_connected());
        assert_eq!(ch.port().lines(), ["RESP:CONNECTED", "RESP:DISCONNECTED"]);
    }

    #[test]
    fn test_oversized_response_is_rejected() {
        let mut ch = channel();
        let text = [b'z'; MAX_LINE_LEN];
        let text = core::str::from_utf8(&text).unwrap();
        assert_eq!(
            ch.send_response(text),
            Err(ChannelError::Encode(EncodeError::LineTooLong))
        );
        assert!(ch.port().tx.is_empty());
    }
}
