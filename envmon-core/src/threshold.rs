//! Threshold policy
//!
//! Maps a value and its configured band to a display classification.
//! The bounds are inclusive: a value exactly at `min` or `max` is normal.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default temperature band (°C)
pub const DEFAULT_TEMP_MIN: f32 = 18.0;
pub const DEFAULT_TEMP_MAX: f32 = 30.0;

/// Default humidity band (%RH)
pub const DEFAULT_HUM_MIN: f32 = 30.0;
pub const DEFAULT_HUM_MAX: f32 = 80.0;

/// Display classification of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// Inside the band
    Normal,
    /// Below `min` or above `max`
    Alert,
}

/// Closed `[min, max]` band
///
/// No ordering is enforced: with `min > max` every value is an alert.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdBand {
    pub min: f32,
    pub max: f32,
}

impl ThresholdBand {
    /// Create a band
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Classify a value against this band
    pub fn classify(&self, value: f32) -> Classification {
        classify(value, self.min, self.max)
    }
}

/// Classify `value` against `[min, max]`
///
/// NaN compares false on both sides and so classifies as normal.
pub fn classify(value: f32, min: f32, max: f32) -> Classification {
    if value < min || value > max {
        Classification::Alert
    } else {
        Classification::Normal
    }
}

/// Bands for both measured quantities
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    pub temperature: ThresholdBand,
    pub humidity: ThresholdBand,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: ThresholdBand::new(DEFAULT_TEMP_MIN, DEFAULT_TEMP_MAX),
            humidity: ThresholdBand::new(DEFAULT_HUM_MIN, DEFAULT_HUM_MAX),
        }
    }
}

impl Thresholds {
    /// Build from the four bounds in wire order
    pub const fn new(temp_min: f32, temp_max: f32, hum_min: f32, hum_max: f32) -> Self {
        Self {
            temperature: ThresholdBand::new(temp_min, temp_max),
            humidity: ThresholdBand::new(hum_min, hum_max),
        }
    }
}

impl From<envmon_protocol::ThresholdArgs> for Thresholds {
    fn from(args: envmon_protocol::ThresholdArgs) -> Self {
        Self::new(args.temp_min, args.temp_max, args.hum_min, args.hum_max)
    }
}
