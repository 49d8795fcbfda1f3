//! Configuration type definitions

use heapless::String;

use crate::threshold::Thresholds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum footer status length (160 px / 6 px per glyph at size 1)
pub const MAX_STATUS_LEN: usize = 26;

/// Sensor sampling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Interval between readings in milliseconds
    pub period_ms: u32,
    /// Settling time after power-up before the first reading
    pub warmup_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            // DHT22 needs at least 2 s between conversions
            period_ms: 2000,
            warmup_ms: 1000,
        }
    }
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialSettings {
    /// Baud rate of the Bluetooth module UART
    pub baudrate: u32,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Footer text shown until a host connects
    pub status: String<MAX_STATUS_LEN>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut status = String::new();
        let _ = status.push_str("Waiting for host");
        Self { status }
    }
}

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopConfig {
    /// Control loop period in milliseconds
    pub tick_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { tick_ms: 50 }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonitorConfig {
    pub sensor: SensorConfig,
    pub thresholds: Thresholds,
    pub serial: SerialSettings,
    pub display: DisplayConfig,
    pub control: LoopConfig,
}

impl MonitorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}
