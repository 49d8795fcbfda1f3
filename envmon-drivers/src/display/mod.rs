//! Pixel display adapters

pub mod canvas;

pub use canvas::GraphicsCanvas;
