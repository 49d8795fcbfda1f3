//! Monitor ↔ host serial protocol
//!
//! This crate defines the text protocol spoken over the Bluetooth serial
//! link between the monitor and a paired host application. Every message
//! is a single UTF-8 line terminated by `\n`.
//!
//! # Protocol Overview
//!
//! ```text
//! monitor → host   D:<temp>,<hum>        telemetry, one decimal each
//! monitor → host   RESP:<text>           acknowledgement / status
//! host → monitor   <COMMAND>[,<arg>...]  command, trimmed, case-insensitive
//! ```
//!
//! Inbound bytes are accumulated by [`LineBuffer`] until a newline arrives.
//! Outbound lines are produced by [`DeviceMessage::encode`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod messages;

pub use command::{CommandError, HostCommand, ThresholdArgs};
pub use line::{LineBuffer, LineError, MAX_LINE_LEN};
pub use messages::{DeviceMessage, EncodeError, RESPONSE_PREFIX, TELEMETRY_PREFIX};
