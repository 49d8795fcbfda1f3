//! DHT22 (AM2302) temperature/humidity sensor
//!
//! Single-wire protocol on an open-drain pin with a pull-up:
//!
//! ```text
//! host   ‾‾‾\_______/‾‾‾‾ (release)
//! sensor                  \__80us__/‾‾80us‾‾\ 40 bits ... \__50us__/‾‾‾
//! bit      \__50us__/‾‾ 26-28us ‾‾\   = 0
//!          \__50us__/‾‾‾‾‾ 70us ‾‾‾‾‾\   = 1
//! ```
//!
//! Bits are sampled a fixed time after each rising edge: still high means
//! a 1. The frame is 16 bits humidity x10, 16 bits temperature x10 (sign
//! in the top bit) and an 8-bit checksum.
//!
//! The sensor needs at least 2 s between conversions; pacing reads is the
//! caller's job.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use envmon_core::traits::{ReadingSource, SensorError};
use envmon_core::Sample;

/// Host start pulse (datasheet minimum is 1 ms)
const START_LOW_US: u32 = 1_100;

/// Longest wait for any single edge
const EDGE_TIMEOUT_US: u32 = 100;

/// Delay after a rising edge before sampling the bit
const BIT_SAMPLE_US: u32 = 35;

/// Frame length in bytes
pub const FRAME_LEN: usize = 5;

/// Measurement range from the datasheet
const TEMP_MIN: f32 = -40.0;
const TEMP_MAX: f32 = 80.0;
const HUM_MAX: f32 = 100.0;

/// Decode a raw frame into a sample
///
/// Checks the checksum and the physical range.
pub fn decode(frame: &[u8; FRAME_LEN]) -> Result<Sample, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = u16::from_be_bytes([frame[0], frame[1]]) as f32 / 10.0;

    let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]) as f32 / 10.0;
    let temperature = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    if !(TEMP_MIN..=TEMP_MAX).contains(&temperature) || humidity > HUM_MAX {
        return Err(SensorError::OutOfRange);
    }

    Ok(Sample::new(temperature, humidity))
}

/// DHT22 driver
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
    initialized: bool,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a driver on an open-drain pin
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            initialized: false,
        }
    }

    /// Release the bus and wait for the sensor to settle
    pub fn begin(&mut self, warmup_ms: u32) -> Result<(), SensorError> {
        self.pin.set_high().map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(warmup_ms);
        self.initialized = true;
        Ok(())
    }

    /// Check if `begin` has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run one conversion and return the raw frame
    pub fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], SensorError> {
        if !self.initialized {
            return Err(SensorError::NotInitialized);
        }

        // Start pulse, then release
        self.pin.set_low().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| SensorError::Bus)?;

        // Response: low 80us, high 80us, then the first bit's low phase
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; FRAME_LEN];
        for byte in frame.iter_mut() {
            for _ in 0..8 {
                *byte = (*byte << 1) | self.read_bit()? as u8;
            }
        }
        Ok(frame)
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn read_bit(&mut self) -> Result<bool, SensorError> {
        self.wait_for(true)?;
        self.delay.delay_us(BIT_SAMPLE_US);
        let bit = self.is_high()?;
        if bit {
            self.wait_for(false)?;
        }
        Ok(bit)
    }

    /// Poll until the line reaches `level`
    fn wait_for(&mut self, level: bool) -> Result<(), SensorError> {
        for _ in 0..EDGE_TIMEOUT_US {
            if self.is_high()? == level {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }

    fn is_high(&mut self) -> Result<bool, SensorError> {
        self.pin.is_high().map_err(|_| SensorError::Bus)
    }
}

impl<P, D> ReadingSource for Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn try_read(&mut self) -> Result<Sample, SensorError> {
        let frame = self.read_frame()?;
        decode(&frame)
    }

    fn is_available(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Simulated bus: a clock advanced by the delay, and a waveform the
    /// sensor drives once the host releases the line
    #[derive(Default)]
    struct Bus {
        now_ns: u64,
        released_at: Option<u64>,
        /// (duration in us, level) segments after release
        waveform: Vec<(u32, bool)>,
        /// Sensor stays silent
        dead: bool,
    }

    impl Bus {
        fn level(&self) -> bool {
            let Some(start) = self.released_at else {
                return false;
            };
            if self.dead {
                return true;
            }
            let mut t = start;
            for &(us, level) in &self.waveform {
                t += us as u64 * 1_000;
                if self.now_ns < t {
                    return level;
                }
            }
            true
        }
    }

    struct MockPin(Rc<RefCell<Bus>>);
    struct MockDelay(Rc<RefCell<Bus>>);

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().released_at = None;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut bus = self.0.borrow_mut();
            bus.released_at = Some(bus.now_ns);
            Ok(())
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0.borrow().level())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0.borrow().level())
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().now_ns += ns as u64;
        }
    }

    /// Waveform a healthy sensor drives for `frame`
    fn waveform(frame: &[u8; FRAME_LEN]) -> Vec<(u32, bool)> {
        let mut w = std::vec![(30, true), (80, false), (80, true)];
        for byte in frame {
            for i in (0..8).rev() {
                let one = byte & (1 << i) != 0;
                w.push((50, false));
                w.push((if one { 70 } else { 27 }, true));
            }
        }
        w.push((50, false));
        w
    }

    fn sensor(bus: &Rc<RefCell<Bus>>) -> Dht22<MockPin, MockDelay> {
        Dht22::new(MockPin(bus.clone()), MockDelay(bus.clone()))
    }

    fn frame(h: u16, t: u16) -> [u8; FRAME_LEN] {
        let [h0, h1] = h.to_be_bytes();
        let [t0, t1] = t.to_be_bytes();
        let sum = h0.wrapping_add(h1).wrapping_add(t0).wrapping_add(t1);
        [h0, h1, t0, t1, sum]
    }

    #[test]
    fn test_decode_positive() {
        // 65.2 %RH, 35.1 °C
        let s = decode(&[0x02, 0x8C, 0x01, 0x5F, 0xEE]).unwrap();
        assert!((s.humidity - 65.2).abs() < 0.01);
        assert!((s.temperature - 35.1).abs() < 0.01);
    }

    #[test]
    fn test_decode_negative_temperature() {
        // Sign bit set: -10.1 °C
        let s = decode(&frame(500, 0x8000 | 101)).unwrap();
        assert!((s.temperature + 10.1).abs() < 0.01);
        assert!((s.humidity - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let mut f = frame(500, 215);
        f[4] = f[4].wrapping_add(1);
        assert_eq!(decode(&f), Err(SensorError::ChecksumMismatch));
    }

    #[test]
    fn test_decode_out_of_range() {
        assert_eq!(decode(&frame(1001, 200)), Err(SensorError::OutOfRange));
        assert_eq!(decode(&frame(500, 801)), Err(SensorError::OutOfRange));
        assert_eq!(
            decode(&frame(500, 0x8000 | 401)),
            Err(SensorError::OutOfRange)
        );
    }

    #[test]
    fn test_read_before_begin() {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let mut dht = sensor(&bus);
        assert!(!dht.is_available());
        assert_eq!(dht.try_read(), Err(SensorError::NotInitialized));
    }

    #[test]
    fn test_begin_waits_for_warmup() {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let mut dht = sensor(&bus);
        dht.begin(1000).unwrap();
        assert!(dht.is_initialized());
        assert_eq!(bus.borrow().now_ns, 1_000_000_000);
    }

    #[test]
    fn test_read_full_conversion() {
        let raw = frame(487, 0x8000 | 55);
        let bus = Rc::new(RefCell::new(Bus {
            waveform: waveform(&raw),
            ..Bus::default()
        }));
        let mut dht = sensor(&bus);
        dht.begin(0).unwrap();

        assert_eq!(dht.read_frame().unwrap(), raw);

        // Second conversion on a fresh waveform
        bus.borrow_mut().waveform = waveform(&frame(600, 230));
        let s = dht.try_read().unwrap();
        assert!((s.humidity - 60.0).abs() < 0.01);
        assert!((s.temperature - 23.0).abs() < 0.01);
    }

    #[test]
    fn test_silent_sensor_times_out() {
        let bus = Rc::new(RefCell::new(Bus {
            dead: true,
            ..Bus::default()
        }));
        let mut dht = sensor(&bus);
        dht.begin(0).unwrap();
        assert_eq!(dht.try_read(), Err(SensorError::Timeout));
    }
}
