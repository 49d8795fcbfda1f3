//! Build script for envmon-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates monitor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use envmon_core::config::parse_config;

/// Footer width in characters at text size 1
const MAX_STATUS_LEN: usize = 26;

/// Minimum interval between DHT22 conversions
const MIN_SENSOR_PERIOD_MS: i64 = 2000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate monitor.toml at compile time
///
/// The firmware reads the file with a small line parser that accepts only
/// a subset of TOML. The file is checked against the full grammar for
/// readable messages, then run through that same parser so nothing it
/// would reject at boot gets flashed.
fn validate_config() {
    println!("cargo:rerun-if-changed=monitor.toml");

    let config_path = Path::new("monitor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: monitor.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a monitor.toml configuration file.          ║\n\
            ║  Please create one in the envmon-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read monitor.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in monitor.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    validate_sections(&config, &mut errors);
    validate_values(&config, &mut errors, &mut warnings);
    validate_firmware_parse(&config_content, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid monitor configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    for warning in warnings {
        println!("cargo:warning=monitor.toml: {}", warning);
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sections and keys the firmware parser accepts
const SCHEMA: &[(&str, &[&str])] = &[
    ("sensor", &["period_ms", "warmup_ms"]),
    ("thresholds", &["temp_min", "temp_max", "hum_min", "hum_max"]),
    ("serial", &["baudrate"]),
    ("display", &["status"]),
    ("control", &["tick_ms"]),
];

/// Reject unknown sections, unknown keys and nested tables
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(keys) = SCHEMA.iter().find(|(s, _)| s == name).map(|(_, k)| *k) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("'{}' must be a [section]", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn validate_values(config: &toml::Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    for (section, key) in [
        ("sensor", "period_ms"),
        ("sensor", "warmup_ms"),
        ("serial", "baudrate"),
        ("control", "tick_ms"),
    ] {
        match get(config, section, key) {
            None => {}
            Some(toml::Value::Integer(v)) if key == "warmup_ms" && (0..=u32::MAX as i64).contains(v) => {}
            Some(toml::Value::Integer(v)) if *v > 0 && *v <= u32::MAX as i64 => {}
            Some(_) => errors.push(format!("[{}] {} must be a positive integer", section, key)),
        }
    }

    if let Some(toml::Value::Integer(period)) = get(config, "sensor", "period_ms") {
        if *period < MIN_SENSOR_PERIOD_MS {
            warnings.push(format!(
                "[sensor] period_ms = {} is below the DHT22 minimum of {} ms",
                period, MIN_SENSOR_PERIOD_MS
            ));
        }
    }

    let mut bound = |key: &str| match get(config, "thresholds", key) {
        None => None,
        Some(toml::Value::Integer(v)) => Some(*v as f64),
        Some(toml::Value::Float(v)) if v.is_finite() => Some(*v),
        Some(_) => {
            errors.push(format!("[thresholds] {} must be a number", key));
            None
        }
    };
    let temp = (bound("temp_min"), bound("temp_max"));
    let hum = (bound("hum_min"), bound("hum_max"));
    for (name, band) in [("temp", temp), ("hum", hum)] {
        if let (Some(min), Some(max)) = band {
            if min > max {
                warnings.push(format!(
                    "[thresholds] {name}_min > {name}_max: every value will show as an alert"
                ));
            }
        }
    }

    match get(config, "display", "status") {
        None => {}
        Some(toml::Value::String(s)) if s.len() <= MAX_STATUS_LEN => {}
        Some(toml::Value::String(_)) => errors.push(format!(
            "[display] status longer than {} characters",
            MAX_STATUS_LEN
        )),
        Some(_) => errors.push("[display] status must be a string".to_string()),
    }
}

/// Reject TOML forms the firmware parser does not read (hex or octal
/// integers, escapes, literal strings, dotted keys, inline tables)
fn validate_firmware_parse(content: &str, errors: &mut Vec<String>) {
    let Err(e) = parse_config(content) else {
        return;
    };

    // Grow the input line by line to locate the first rejected line
    let mut prefix = String::new();
    for (n, line) in content.lines().enumerate() {
        prefix.push_str(line);
        prefix.push('\n');
        if parse_config(&prefix).is_err() {
            errors.push(format!(
                "line {}: {:?} (unsupported by firmware): {}",
                n + 1,
                e,
                line.trim()
            ));
            return;
        }
    }
    errors.push(format!("{:?} (unsupported by firmware)", e));
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section)?.get(key)
}
