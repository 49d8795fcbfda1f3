//! Minimal TOML reader for the monitor configuration
//!
//! Handles only the subset `monitor.toml` uses, not the whole TOML
//! grammar.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs (integer, float, quoted string)
//! - Comments (`# ...`), including trailing comments after a value
//!
//! Keys left out of the file keep their default values.

use heapless::String;

use super::types::MonitorConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String value longer than its field allows
    ValueTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Thresholds,
    Serial,
    Display,
    Control,
}

/// Parse TOML text into a `MonitorConfig`
pub fn parse_config(input: &str) -> Result<MonitorConfig, ParseError> {
    let mut config = MonitorConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        let value = strip_comment(value.trim());
        apply_key(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = strip_comment(line)
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    match name {
        "sensor" => Ok(Section::Sensor),
        "thresholds" => Ok(Section::Thresholds),
        "serial" => Ok(Section::Serial),
        "display" => Ok(Section::Display),
        "control" => Ok(Section::Control),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_key(
    config: &mut MonitorConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Sensor, "period_ms") => config.sensor.period_ms = parse_period(value)?,
        (Section::Sensor, "warmup_ms") => config.sensor.warmup_ms = parse_u32(value)?,

        (Section::Thresholds, "temp_min") => config.thresholds.temperature.min = parse_f32(value)?,
        (Section::Thresholds, "temp_max") => config.thresholds.temperature.max = parse_f32(value)?,
        (Section::Thresholds, "hum_min") => config.thresholds.humidity.min = parse_f32(value)?,
        (Section::Thresholds, "hum_max") => config.thresholds.humidity.max = parse_f32(value)?,

        (Section::Serial, "baudrate") => config.serial.baudrate = parse_period(value)?,

        (Section::Display, "status") => config.display.status = parse_string(value)?,

        (Section::Control, "tick_ms") => config.control.tick_ms = parse_period(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Remove a trailing `# comment` that is not inside a quoted string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim_end(),
            _ => {}
        }
    }
    value
}

fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut acc: u32 = 0;
    let mut digits = 0;
    for ch in value.chars() {
        // TOML allows `_` as a digit separator
        if ch == '_' {
            continue;
        }
        let d = ch.to_digit(10).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(d))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(acc)
}

/// Non-zero integer (periods and rates)
fn parse_period(value: &str) -> Result<u32, ParseError> {
    match parse_u32(value)? {
        0 => Err(ParseError::InvalidValue),
        v => Ok(v),
    }
}

fn parse_f32(value: &str) -> Result<f32, ParseError> {
    let v: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)?;
    // No escape sequences
    if inner.contains(['"', '\\']) {
        return Err(ParseError::InvalidValue);
    }
    let mut out = String::new();
    out.push_str(inner).map_err(|_| ParseError::ValueTooLong)?;
    Ok(out)
}
