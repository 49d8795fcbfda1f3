//! Inter-task communication
//!
//! The sensor task publishes each reading outcome; the monitor task takes
//! the newest one on its next tick. Older unread outcomes are overwritten.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use envmon_core::traits::SensorError;
use envmon_core::Sample;

/// Latest sensor outcome (sample or failure)
pub static SENSOR_READING: Signal<CriticalSectionRawMutex, Result<Sample, SensorError>> =
    Signal::new();
