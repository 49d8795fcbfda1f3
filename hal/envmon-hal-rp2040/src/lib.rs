//! RP2040-specific HAL for the envmon monitor
//!
//! This crate provides RP2040 implementations of the shared `envmon-hal`
//! traits:
//!
//! - Serial transport over the interrupt-driven buffered UART
//! - Mapping of `SerialConfig` onto embassy-rp UART settings

#![no_std]

pub mod uart;

pub use uart::{uart_config, UartSerial};
