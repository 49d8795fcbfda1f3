//! `PixelDisplay` over an embedded-graphics draw target
//!
//! Adapts any `DrawTarget<Color = Rgb565>` (the ST7735 driver on the
//! board, a framebuffer in tests) to the cursor-based text model the
//! renderer uses. Text sizes map to built-in mono fonts:
//!
//! | size | font     | cell  |
//! |------|----------|-------|
//! | 1    | 6x10     | 6x10  |
//! | 2    | 9x15     | 9x15  |
//! | 3+   | 10x20    | 10x20 |
//!
//! Every draw is clipped to the target's bounding box, so layout regions
//! that reach past the panel edge are cut off instead of rejected.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use envmon_display::{Color, DisplayError, PixelDisplay};

/// Font used for a text size
pub fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        2 => &FONT_9X15,
        _ => &FONT_10X20,
    }
}

fn to_rgb565(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color.raw()))
}

/// Cursor-based text canvas over a draw target
pub struct GraphicsCanvas<D> {
    target: D,
    cursor: Point,
    text_color: Rgb565,
    text_size: u8,
}

impl<D> GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target (cursor at origin, white size-1 text)
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            text_color: Rgb565::WHITE,
            text_size: 1,
        }
    }

    /// Current text cursor
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Access the draw target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable access to the draw target
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Release the draw target
    pub fn release(self) -> D {
        self.target
    }
}

impl<D> PixelDisplay for GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_screen(&mut self, color: Color) -> Result<(), DisplayError> {
        self.target
            .clear(to_rgb565(color))
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let area = Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .intersection(&self.target.bounding_box());

        if area.is_zero_sized() {
            return Ok(());
        }
        self.target
            .fill_solid(&area, to_rgb565(color))
            .map_err(|_| DisplayError::Communication)
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor = Point::new(x as i32, y as i32);
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = to_rgb565(color);
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font_for_size(self.text_size), self.text_color);
        let bounds = self.target.bounding_box();
        let mut clipped = self.target.clipped(&bounds);

        // Top baseline: the cursor is the glyph's top-left corner
        self.cursor = Text::with_baseline(text, self.cursor, style, Baseline::Top)
            .draw(&mut clipped)
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }
}
