//! Board-agnostic core logic for the environmental monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor sample type and the reading-source trait
//! - Threshold policy (normal vs. alert classification)
//! - Line-delimited command channel over a serial transport
//! - Monitor controller (sampling cadence and host command dispatch)
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod controller;
pub mod sample;
pub mod threshold;
pub mod traits;

pub use sample::Sample;
pub use threshold::{Classification, ThresholdBand, Thresholds};
