//! Screen layout for a 160x128 landscape panel
//!
//! All coordinates are pixels from the top-left corner. The data region
//! and footer reach past the bottom edge; the panel clips them.

/// Panel width in pixels
pub const SCREEN_WIDTH: u16 = 160;

/// Panel height in pixels
pub const SCREEN_HEIGHT: u16 = 128;

/// Text cell at size 1 (glyph plus spacing)
pub const CELL_WIDTH: u16 = 6;
pub const CELL_HEIGHT: u16 = 8;

/// Inked part of a glyph at size 1
pub const GLYPH_WIDTH: u16 = 5;
pub const GLYPH_HEIGHT: u16 = 7;

/// Text size for labels, banner and status lines
pub const LABEL_TEXT_SIZE: u8 = 1;

/// Text size for the measured values and their units
pub const VALUE_TEXT_SIZE: u8 = 2;

/// Widest value string the value boxes must cover
pub const MAX_VALUE_CHARS: u16 = 5;

/// Printable value range; wider values would overrun their box
pub const DISPLAY_MIN: f32 = -99.9;
pub const DISPLAY_MAX: f32 = 999.9;

/// Text cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that `chars` glyphs at `size` printed from `cursor` stay inside
    pub const fn fits_text(&self, cursor: Point, chars: u16, size: u8) -> bool {
        let size = size as i32;
        let right = cursor.x as i32 + (chars.saturating_sub(1) * CELL_WIDTH + GLYPH_WIDTH) as i32 * size;
        let bottom = cursor.y as i32 + GLYPH_HEIGHT as i32 * size;
        cursor.x >= self.x
            && cursor.y >= self.y
            && right <= self.x as i32 + self.width as i32
            && bottom <= self.y as i32 + self.height as i32
    }
}

/// One measured field on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub label: &'static str,
    pub label_at: Point,
    /// Region erased before each repaint
    pub value_box: Rect,
    pub value_at: Point,
    pub unit: &'static str,
    pub unit_at: Point,
}

pub const HEADER: Rect = Rect::new(0, 0, 160, 20);
pub const TITLE: &str = "ENV MONITOR";
pub const TITLE_AT: Point = Point::new(30, 5);

pub const DATA_AREA: Rect = Rect::new(0, 20, 160, 120);

pub const TEMPERATURE: FieldLayout = FieldLayout {
    label: "Tem:",
    label_at: Point::new(10, 30),
    value_box: Rect::new(40, 45, 60, 20),
    value_at: Point::new(40, 50),
    unit: "C",
    unit_at: Point::new(100, 50),
};

pub const HUMIDITY: FieldLayout = FieldLayout {
    label: "Hum:",
    label_at: Point::new(10, 80),
    value_box: Rect::new(40, 95, 60, 20),
    value_at: Point::new(40, 100),
    unit: "%",
    unit_at: Point::new(100, 100),
};

pub const BANNER: Rect = Rect::new(0, 60, 160, 20);
pub const BANNER_AT: Point = Point::new(5, 70);

pub const FOOTER: Rect = Rect::new(0, 140, 160, 20);
pub const STATUS_AT: Point = Point::new(5, 145);

pub const SPLASH_TEXT: &str = "Initializing...";
pub const SPLASH_AT: Point = Point::new(10, 50);

// An erased box must cover every value string, otherwise old digits ghost
const _: () = assert!(TEMPERATURE.value_box.fits_text(
    TEMPERATURE.value_at,
    MAX_VALUE_CHARS,
    VALUE_TEXT_SIZE
));
const _: () = assert!(HUMIDITY.value_box.fits_text(
    HUMIDITY.value_at,
    MAX_VALUE_CHARS,
    VALUE_TEXT_SIZE
));

/// Clamp a value to what fits in `MAX_VALUE_CHARS` at one decimal
pub fn displayable(value: f32) -> f32 {
    // NaN passes through and prints as "NaN"
    value.clamp(DISPLAY_MIN, DISPLAY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_boxes_fit_widest_value() {
        assert!(TEMPERATURE
            .value_box
            .fits_text(TEMPERATURE.value_at, MAX_VALUE_CHARS, VALUE_TEXT_SIZE));
        // One more glyph would overrun the box
        assert!(!TEMPERATURE
            .value_box
            .fits_text(TEMPERATURE.value_at, MAX_VALUE_CHARS + 1, VALUE_TEXT_SIZE));
    }

    #[test]
    fn test_displayable_saturates() {
        assert_eq!(displayable(1234.5), DISPLAY_MAX);
        assert_eq!(displayable(-150.0), DISPLAY_MIN);
        assert_eq!(displayable(21.5), 21.5);
        assert!(displayable(f32::NAN).is_nan());
    }
}
