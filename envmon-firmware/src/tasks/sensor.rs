//! Sensor sampling task
//!
//! Reads the DHT22 on the configured period and publishes each outcome.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use envmon_core::config::SensorConfig;
use envmon_core::traits::ReadingSource;

use crate::board::Sensor;
use crate::channels::SENSOR_READING;

/// Sensor task - samples the DHT22 and signals the monitor task
#[embassy_executor::task]
pub async fn sensor_task(mut sensor: Sensor, config: SensorConfig) {
    info!("Sensor task started, period {} ms", config.period_ms);

    // Settle without blocking the executor, then mark the driver ready
    Timer::after_millis(config.warmup_ms as u64).await;
    if let Err(e) = sensor.begin(0) {
        error!("DHT22 start failed: {:?}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms as u64));

    loop {
        // Bit timing is a few microseconds; keep interrupts out of it
        let result = cortex_m::interrupt::free(|_| sensor.try_read());

        match &result {
            Ok(sample) => debug!("Reading: {}", sample),
            Err(e) => debug!("Reading failed: {:?}", e),
        }
        SENSOR_READING.signal(result);

        ticker.next().await;
    }
}
