//! Serial byte transport abstraction
//!
//! The monitor talks to its host over a UART bridged to a Bluetooth SPP
//! module. The core only needs non-blocking reads of whatever has already
//! arrived and blocking line writes.

/// Byte transport used by the command channel
///
/// Reads never wait for data. Writes may block until the peripheral has
/// accepted the bytes; `flush` blocks until they have left the wire.
pub trait SerialPort {
    /// Error type for transport operations
    type Error;

    /// Check whether at least one received byte is waiting
    fn bytes_available(&mut self) -> bool;

    /// Take one received byte
    ///
    /// Returns `Ok(None)` when nothing is waiting. Never blocks.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write all bytes to the transport
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until buffered output has been transmitted
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write `text` followed by a `\n` terminator
    fn write_line(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_all(text.as_bytes())?;
        self.write_all(b"\n")
    }
}

impl<T: SerialPort + ?Sized> SerialPort for &mut T {
    type Error = T::Error;

    fn bytes_available(&mut self) -> bool {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).read_byte()
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        // HC-05 / JDY-31 modules ship at 9600 8N1
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl SerialConfig {
    /// Default framing with a custom baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
