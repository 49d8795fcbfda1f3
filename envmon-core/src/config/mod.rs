//! Configuration types
//!
//! Board-agnostic configuration structures and the parser for the
//! embedded `monitor.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
