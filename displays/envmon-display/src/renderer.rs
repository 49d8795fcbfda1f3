//! Incremental render engine
//!
//! Keeps the last rendered values and repaints a value box only when its
//! value moved by at least [`DEADBAND`]. Static elements (labels, units)
//! are painted once, on the first render. A failed static paint is retried
//! by the next render.
//!
//! The comparison is anchored to the last *input*, not the last painted
//! value: a slow drift in steps smaller than the deadband is never
//! repainted, even once the screen is far behind.

use envmon_core::threshold::Classification;
use envmon_core::{Sample, ThresholdBand, Thresholds};

use crate::backend::{DisplayError, PixelDisplay};
use crate::color::{self, Color};
use crate::layout::{self, FieldLayout, Point, Rect};

/// Minimum change before a value box is repainted
pub const DEADBAND: f32 = 0.1;

/// Value color inside the band
pub const NORMAL_COLOR: Color = color::WHITE;

/// Value color outside the band
pub const ALERT_COLOR: Color = color::RED;

/// Check whether a field must be repainted
///
/// `None` means the field was never rendered. NaN on either side repaints.
pub fn needs_repaint(last: Option<f32>, value: f32) -> bool {
    match last {
        None => true,
        Some(last) => !((value - last).abs() < DEADBAND),
    }
}

/// Incremental renderer over a pixel display
pub struct RenderEngine<D> {
    display: D,
    last_temperature: Option<f32>,
    last_humidity: Option<f32>,
    /// Labels and units are on screen
    static_drawn: bool,
    thresholds: Thresholds,
    /// Reserved: toggled by the host, not drawn
    show_thresholds: bool,
}

impl<D: PixelDisplay> RenderEngine<D> {
    /// Create an engine with default thresholds that has never rendered
    pub fn new(display: D) -> Self {
        Self::with_thresholds(display, Thresholds::default())
    }

    /// Create an engine with the given thresholds
    pub fn with_thresholds(display: D, thresholds: Thresholds) -> Self {
        Self {
            display,
            last_temperature: None,
            last_humidity: None,
            static_drawn: false,
            thresholds,
            show_thresholds: false,
        }
    }

    /// Bring-up paint: black screen with a splash line
    pub fn begin(&mut self) -> Result<(), DisplayError> {
        self.display.fill_screen(color::BLACK)?;
        self.text_at(layout::SPLASH_AT, color::WHITE, layout::LABEL_TEXT_SIZE, layout::SPLASH_TEXT)
    }

    /// Replace both threshold bands
    ///
    /// No validation. Values already on screen keep their color until
    /// their next repaint.
    pub fn configure_thresholds(&mut self, temp_min: f32, temp_max: f32, hum_min: f32, hum_max: f32) {
        self.set_thresholds(Thresholds::new(temp_min, temp_max, hum_min, hum_max));
    }

    /// Replace both threshold bands from a `Thresholds` value
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    /// Render a sample, repainting only what changed
    ///
    /// The sample becomes the last rendered state before any painting, so
    /// a display error leaves the engine anchored to its input. Static
    /// elements stay pending until they have been painted without error;
    /// painting them clears the data area, so both values follow.
    pub fn render(&mut self, sample: Sample) -> Result<(), DisplayError> {
        let last_temperature = self.last_temperature.replace(sample.temperature);
        let last_humidity = self.last_humidity.replace(sample.humidity);

        let full = !self.static_drawn;
        if full {
            self.draw_static_elements()?;
            self.static_drawn = true;
        }

        if full || needs_repaint(last_temperature, sample.temperature) {
            let band = self.thresholds.temperature;
            self.paint_value(&layout::TEMPERATURE, sample.temperature, band)?;
        }
        if full || needs_repaint(last_humidity, sample.humidity) {
            let band = self.thresholds.humidity;
            self.paint_value(&layout::HUMIDITY, sample.humidity, band)?;
        }
        Ok(())
    }

    /// Show a one-line message in the banner region
    pub fn display_message(&mut self, text: &str, color: Color) -> Result<(), DisplayError> {
        self.fill(layout::BANNER, color::BLACK)?;
        self.text_at(layout::BANNER_AT, color, layout::LABEL_TEXT_SIZE, text)
    }

    /// Flip the reserved threshold flag (no visual effect)
    pub fn toggle_threshold_display(&mut self) {
        self.show_thresholds = !self.show_thresholds;
    }

    /// Paint the whole screen black
    pub fn clear_screen(&mut self) -> Result<(), DisplayError> {
        self.display.fill_screen(color::BLACK)
    }

    /// Paint the title band
    pub fn draw_header(&mut self) -> Result<(), DisplayError> {
        self.fill(layout::HEADER, color::BLUE)?;
        self.text_at(layout::TITLE_AT, color::WHITE, layout::LABEL_TEXT_SIZE, layout::TITLE)
    }

    /// Paint the status band
    pub fn draw_footer(&mut self, status: &str) -> Result<(), DisplayError> {
        self.fill(layout::FOOTER, color::BLUE)?;
        self.text_at(layout::STATUS_AT, color::WHITE, layout::LABEL_TEXT_SIZE, status)
    }

    /// Paint the region between header and footer black
    pub fn clear_data_area(&mut self) -> Result<(), DisplayError> {
        self.fill(layout::DATA_AREA, color::BLACK)
    }

    /// Forget the rendered values so the next render repaints everything
    ///
    /// Used after something else has drawn over the data region.
    pub fn invalidate(&mut self) {
        self.last_temperature = None;
        self.last_humidity = None;
        self.static_drawn = false;
    }

    /// Check if nothing has been rendered yet
    pub fn is_first_render(&self) -> bool {
        self.last_temperature.is_none()
    }

    /// Last rendered sample
    pub fn last_sample(&self) -> Option<Sample> {
        match (self.last_temperature, self.last_humidity) {
            (Some(t), Some(h)) => Some(Sample::new(t, h)),
            _ => None,
        }
    }

    /// Current threshold bands
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Reserved threshold flag
    pub fn show_thresholds(&self) -> bool {
        self.show_thresholds
    }

    /// Access the underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the underlying display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Release the display
    pub fn release(self) -> D {
        self.display
    }

    fn draw_static_elements(&mut self) -> Result<(), DisplayError> {
        self.clear_data_area()?;
        for field in [&layout::TEMPERATURE, &layout::HUMIDITY] {
            self.text_at(field.label_at, color::WHITE, layout::LABEL_TEXT_SIZE, field.label)?;
            self.text_at(field.unit_at, color::WHITE, layout::VALUE_TEXT_SIZE, field.unit)?;
        }
        Ok(())
    }

    fn paint_value(
        &mut self,
        field: &FieldLayout,
        value: f32,
        band: ThresholdBand,
    ) -> Result<(), DisplayError> {
        let color = match band.classify(value) {
            Classification::Normal => NORMAL_COLOR,
            Classification::Alert => ALERT_COLOR,
        };

        self.display.set_text_size(layout::VALUE_TEXT_SIZE);
        self.display.set_text_color(color);
        self.fill(field.value_box, color::BLACK)?;
        self.display.set_cursor(field.value_at.x, field.value_at.y);
        self.display.print_number(layout::displayable(value), 1)
    }

    fn fill(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        self.display
            .fill_rect(rect.x, rect.y, rect.width, rect.height, color)
    }

    fn text_at(&mut self, at: Point, color: Color, size: u8, text: &str) -> Result<(), DisplayError> {
        self.display.set_cursor(at.x, at.y);
        self.display.set_text_color(color);
        self.display.set_text_size(size);
        self.display.print(text)
    }
}
