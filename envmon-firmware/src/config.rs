//! Embedded configuration
//!
//! `monitor.toml` is compiled into the image and validated by the build
//! script, so a parse failure here means the two parsers disagree.

use defmt::*;

use envmon_core::config::{parse_config, MonitorConfig};

/// Embedded configuration (compiled into firmware)
const EMBEDDED_CONFIG: &str = include_str!("../monitor.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load() -> MonitorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: sample every {} ms, {} baud, tick {} ms",
                config.sensor.period_ms, config.serial.baudrate, config.control.tick_ms
            );
            config
        }
        Err(e) => {
            error!("Invalid embedded monitor.toml: {:?}, using defaults", e);
            MonitorConfig::default()
        }
    }
}
