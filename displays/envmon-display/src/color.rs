//! RGB565 colors

/// 16-bit RGB565 color as sent to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    /// Build from 5/6/5-bit channels (excess bits are masked)
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r & 0x1F) as u16) << 11) | (((g & 0x3F) as u16) << 5) | (b & 0x1F) as u16)
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel (5 bits)
    pub const fn r(self) -> u8 {
        (self.0 >> 11) as u8 & 0x1F
    }

    /// Green channel (6 bits)
    pub const fn g(self) -> u8 {
        (self.0 >> 5) as u8 & 0x3F
    }

    /// Blue channel (5 bits)
    pub const fn b(self) -> u8 {
        self.0 as u8 & 0x1F
    }
}

pub const BLACK: Color = Color(0x0000);
pub const WHITE: Color = Color(0xFFFF);
pub const RED: Color = Color(0xF800);
pub const GREEN: Color = Color(0x07E0);
pub const BLUE: Color = Color(0x001F);
pub const YELLOW: Color = Color(0xFFE0);
