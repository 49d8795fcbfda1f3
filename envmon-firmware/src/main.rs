//! envmon - environmental monitor firmware
//!
//! Main firmware binary for an RP2040 board with a DHT22 sensor, an
//! ST7735 TFT and a Bluetooth serial module.
//!
//! Two tasks run on the embassy executor:
//! - `sensor_task` samples the DHT22 on a fixed period
//! - `monitor_task` renders readings, sends telemetry and serves host
//!   commands

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use envmon_core::channel::CommandChannel;
use envmon_display::RenderEngine;
use envmon_hal::SerialConfig;
use envmon_hal_rp2040::{uart_config, UartSerial};

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("envmon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Host link over the Bluetooth module
    let serial = SerialConfig::with_baudrate(config.serial.baudrate);
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&serial));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let channel = CommandChannel::new(UartSerial::new(uart));
    info!("UART initialized at {} baud", serial.baudrate);

    // Display
    let screen = board::init_screen(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_9, p.PIN_8, p.PIN_12);
    let engine = RenderEngine::with_thresholds(screen, config.thresholds);
    info!("Display initialized");

    // Sensor
    let sensor = board::init_sensor(p.PIN_15);

    spawner
        .spawn(tasks::sensor_task(sensor, config.sensor))
        .unwrap();
    spawner
        .spawn(tasks::monitor_task(channel, engine, config))
        .unwrap();

    info!("All tasks spawned");
}
