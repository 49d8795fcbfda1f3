//! envmon Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the monitor logic is written
//! against, so the same core and display code runs on the RP2040 board
//! and on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (envmon-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  envmon-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  envmon-hal-  │       │  test mocks   │
//! │    rp2040     │       │   (host)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialPort`] - Line-oriented byte transport (Bluetooth SPP UART)

#![no_std]
#![deny(unsafe_code)]

pub mod serial;

pub use serial::{SerialConfig, SerialPort};
