//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod monitor;
pub mod sensor;

pub use monitor::monitor_task;
pub use sensor::sensor_task;
