//! Pixel display abstraction and incremental renderer for envmon
//!
//! This crate provides:
//! - `PixelDisplay` trait for Adafruit-GFX style color panels
//! - RGB565 color constants
//! - The fixed 160x128 screen layout
//! - `RenderEngine`, which repaints only the value boxes that changed
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  RenderEngine (last values, thresholds)    │
//! ├────────────────────────────────────────────┤
//! │  PixelDisplay trait                        │
//! ├────────────────────────────────────────────┤
//! │  envmon-drivers::GraphicsCanvas            │
//! │  (embedded-graphics over an ST7735 panel)  │
//! └────────────────────────────────────────────┘
//! ```
//!
//! The engine never clears the whole screen during normal operation: the
//! first render paints static labels once, later renders erase and reprint
//! only the value boxes whose value moved by at least the deadband.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod color;
pub mod layout;
pub mod renderer;

// Re-export key types
pub use backend::{DisplayError, PixelDisplay};
pub use color::Color;
pub use renderer::{RenderEngine, DEADBAND};
