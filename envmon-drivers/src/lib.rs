//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in envmon-core and envmon-display:
//!
//! - Climate sensor (DHT22 / AM2302 single-wire)
//! - Pixel canvas over any embedded-graphics RGB565 draw target

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod sensor;
