//! Reading source trait

use crate::sample::Sample;

/// Errors that can occur while reading the climate sensor
///
/// Any of these means "sensor unavailable" for the current cycle: the
/// controller skips rendering and telemetry until a valid sample arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor has not been started yet
    NotInitialized,
    /// Sensor did not answer within the protocol timing
    Timeout,
    /// Data frame checksum mismatch
    ChecksumMismatch,
    /// Decoded value outside the sensor's physical range
    OutOfRange,
    /// GPIO access failed
    Bus,
}

/// Source of temperature/humidity samples
pub trait ReadingSource {
    /// Attempt a reading
    ///
    /// Takes `&mut self` because a reading drives the sensor bus.
    fn try_read(&mut self) -> Result<Sample, SensorError>;

    /// Check if the source has been started
    fn is_available(&self) -> bool {
        true
    }
}
