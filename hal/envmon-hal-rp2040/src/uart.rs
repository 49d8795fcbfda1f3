//! UART serial transport
//!
//! Wraps any blocking `embedded-io` port that can report pending input.
//! On the board this is embassy-rp's `BufferedUart`: the UART interrupt
//! fills a ring buffer in the background, so `read_ready` is a cheap
//! check of that buffer and draining it never waits on the wire.

use embassy_rp::uart;
use embedded_io::{Read, ReadReady, Write};

use envmon_hal::serial::{DataBits, Parity, SerialConfig, SerialPort, StopBits};

/// Build an embassy-rp UART configuration from link settings
pub fn uart_config(settings: &SerialConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = settings.baudrate;
    config.data_bits = match settings.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match settings.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match settings.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}

/// `SerialPort` over a buffered UART
pub struct UartSerial<U> {
    uart: U,
}

impl<U> UartSerial<U>
where
    U: Read + ReadReady + Write,
{
    /// Wrap a UART
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Release the UART
    pub fn release(self) -> U {
        self.uart
    }
}

impl<U> SerialPort for UartSerial<U>
where
    U: Read + ReadReady + Write,
{
    type Error = U::Error;

    fn bytes_available(&mut self) -> bool {
        // Receive faults (overrun, framing) end the drain like an empty buffer
        self.uart.read_ready().unwrap_or(false)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.uart.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.uart.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.uart.flush()
    }
}
