//! Pixel display trait
//!
//! Defines the drawing primitives the renderer consumes. The model is a
//! text cursor plus filled rectangles, as on Adafruit GFX panels: text is
//! printed at the cursor with the current color and size, and the cursor
//! advances past what was printed.

use core::fmt::Write;
use heapless::String;

use crate::color::Color;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Text does not fit the formatting buffer
    BufferOverflow,
}

impl From<core::fmt::Error> for DisplayError {
    fn from(_: core::fmt::Error) -> Self {
        DisplayError::BufferOverflow
    }
}

/// Maximum characters produced by `print_number`
pub const NUMBER_BUF_LEN: usize = 16;

/// Color pixel display with a text cursor
///
/// Rectangles that extend past the panel edge are clipped by the
/// implementation, not rejected.
pub trait PixelDisplay {
    /// Fill the whole panel with one color
    fn fill_screen(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Move the text cursor (top-left of the next glyph)
    fn set_cursor(&mut self, x: i16, y: i16);

    /// Set the color used by subsequent prints
    fn set_text_color(&mut self, color: Color);

    /// Set the text scale (1 = 6x8 pixel cell)
    fn set_text_size(&mut self, size: u8);

    /// Print text at the cursor
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Print a number with `precision` decimal places
    fn print_number(&mut self, value: f32, precision: u8) -> Result<(), DisplayError> {
        let mut buf: String<NUMBER_BUF_LEN> = String::new();
        write!(buf, "{:.*}", precision as usize, value)?;
        self.print(&buf)
    }
}

impl<T: PixelDisplay + ?Sized> PixelDisplay for &mut T {
    fn fill_screen(&mut self, color: Color) -> Result<(), DisplayError> {
        (**self).fill_screen(color)
    }

    fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        (**self).fill_rect(x, y, width, height, color)
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        (**self).set_cursor(x, y)
    }

    fn set_text_color(&mut self, color: Color) {
        (**self).set_text_color(color)
    }

    fn set_text_size(&mut self, size: u8) {
        (**self).set_text_size(size)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).print(text)
    }

    fn print_number(&mut self, value: f32, precision: u8) -> Result<(), DisplayError> {
        (**self).print_number(value, precision)
    }
}
