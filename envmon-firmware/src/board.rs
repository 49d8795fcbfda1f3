//! Board wiring and peripheral bring-up
//!
//! Raspberry Pi Pico with:
//! - JDY-31 Bluetooth SPP module on UART0 (GPIO0 TX, GPIO1 RX)
//! - 1.8" ST7735 160x128 TFT on SPI1 (GPIO10 SCK, GPIO11 MOSI, GPIO9 CS,
//!   GPIO8 DC, GPIO12 RST)
//! - DHT22 data line on GPIO15 (open drain, 10k pull-up on the module)

use defmt::*;
use embassy_rp::gpio::{Level, Output, OutputOpenDrain};
use embassy_rp::peripherals::{PIN_10, PIN_11, PIN_12, PIN_15, PIN_8, PIN_9, SPI1};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::uart::BufferedUart;
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use st7735_lcd::{Orientation, ST7735};

use envmon_display::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use envmon_drivers::display::GraphicsCanvas;
use envmon_drivers::sensor::Dht22;
use envmon_hal_rp2040::UartSerial;

/// SPI clock for the panel
const DISPLAY_SPI_HZ: u32 = 16_000_000;

/// ST7735 panel on an exclusive SPI bus
pub type Panel = ST7735<
    ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>,
    Output<'static>,
    Output<'static>,
>;

/// Drawing surface handed to the render engine
pub type Screen = GraphicsCanvas<Panel>;

/// Host link
pub type HostPort = UartSerial<BufferedUart>;

/// Climate sensor
pub type Sensor = Dht22<OutputOpenDrain<'static>, Delay>;

/// Bring up the TFT in landscape
///
/// Init failures are logged; the panel then shows nothing but the rest
/// of the monitor keeps running.
pub fn init_screen(
    spi: Peri<'static, SPI1>,
    sck: Peri<'static, PIN_10>,
    mosi: Peri<'static, PIN_11>,
    cs: Peri<'static, PIN_9>,
    dc: Peri<'static, PIN_8>,
    rst: Peri<'static, PIN_12>,
) -> Screen {
    let mut config = spi::Config::default();
    config.frequency = DISPLAY_SPI_HZ;
    let bus = Spi::new_blocking_txonly(spi, sck, mosi, config);

    let cs = Output::new(cs, Level::High);
    let device = match ExclusiveDevice::new(bus, cs, Delay) {
        Ok(device) => device,
        Err(e) => match e {},
    };

    let mut panel = ST7735::new(
        device,
        Output::new(dc, Level::Low),
        Output::new(rst, Level::High),
        true,
        false,
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
    );

    if panel.init(&mut Delay).is_err() {
        error!("ST7735 init failed");
    }
    if panel.set_orientation(&Orientation::LandscapeSwapped).is_err() {
        warn!("ST7735 orientation failed");
    }

    GraphicsCanvas::new(panel)
}

/// DHT22 on its open-drain data pin, line released
pub fn init_sensor(pin: Peri<'static, PIN_15>) -> Sensor {
    Dht22::new(OutputOpenDrain::new(pin, Level::High), Delay)
}
