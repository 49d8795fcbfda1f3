//! Sensor sample

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One temperature/humidity reading
///
/// Temperature is in °C, humidity in %RH. Samples are plain values: they
/// are passed by copy and superseded by the next reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub temperature: f32,
    pub humidity: f32,
}

impl Sample {
    /// Create a sample
    pub const fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// Renders as `TEMP:<t>,HUM:<h>` with one decimal per field
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TEMP:{:.1},HUM:{:.1}", self.temperature, self.humidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_display_format() {
        let mut s: String<32> = String::new();
        write!(s, "{}", Sample::new(23.44, 51.0)).unwrap();
        assert_eq!(s.as_str(), "TEMP:23.4,HUM:51.0");
    }
}
