//! Hardware abstraction traits
//!
//! These traits define the interface between the monitor logic
//! and hardware-specific implementations.

pub mod sensor;

pub use sensor::{ReadingSource, SensorError};
