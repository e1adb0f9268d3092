//! Build script for faultline-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates locator.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Config schema version understood by the firmware
const CONFIG_VERSION: i64 = 1;

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
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate locator.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=locator.toml");

    let config_path = Path::new("locator.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: locator.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a locator.toml configuration file.          ║\n\
            ║  Please create one in the faultline-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read locator.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in locator.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_version(&config, &mut errors);
    validate_keys(&config, &mut errors);
    validate_estimator(&config, &mut errors);
    validate_fault(&config, &mut errors);
    validate_alert(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid locator.toml configuration                       ║\n\
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

    println!("cargo:warning=locator.toml validated successfully");
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

/// Known keys per section; the firmware parser rejects anything else
const SCHEMA: &[(&str, &[&str])] = &[
    (
        "estimator",
        &[
            "reference_voltage",
            "adc_resolution",
            "velocity_factor",
            "cable_length_max_m",
            "speed_of_light",
        ],
    ),
    (
        "fault",
        &[
            "forward_floor_v",
            "vswr_threshold",
            "reflected_floor_v",
            "vswr_sentinel",
        ],
    ),
    (
        "timing",
        &[
            "poll_interval_ms",
            "test_duration_ms",
            "report_hold_ms",
            "debounce_ms",
        ],
    ),
    ("alert", &["pulses", "on_ms", "off_ms", "led"]),
];

fn validate_version(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("version") {
        Some(toml::Value::Integer(v)) if *v == CONFIG_VERSION => {}
        Some(toml::Value::Integer(v)) => errors.push(format!(
            "version {} is not supported (expected {})",
            v, CONFIG_VERSION
        )),
        Some(_) => errors.push("version must be an integer".to_string()),
        None => {}
    }
}

/// Reject unknown sections and keys
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if name == "version" {
            continue;
        }

        let Some((_, keys)) = SCHEMA.iter().find(|(section, _)| section == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };

        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };

        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }

        // Nested tables are not understood by the firmware parser
        for (key, v) in table {
            if v.is_table() || v.is_array() {
                errors.push(format!("[{}] '{}' must be a scalar", name, key));
            }
        }
    }
}

/// Numeric value as f64, accepting integer or float literals
fn number(section: &toml::Value, key: &str) -> Option<f64> {
    match section.get(key)? {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn validate_estimator(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(est) = config.get("estimator") else {
        return;
    };

    if let Some(v) = number(est, "reference_voltage") {
        if v <= 0.0 {
            errors.push("[estimator] reference_voltage must be positive".to_string());
        }
    }

    if let Some(toml::Value::Integer(res)) = est.get("adc_resolution") {
        if *res <= 0 || *res > u16::MAX as i64 {
            errors.push("[estimator] adc_resolution must be 1-65535".to_string());
        }
    }

    if let Some(vf) = number(est, "velocity_factor") {
        if vf <= 0.0 || vf > 1.0 {
            errors.push("[estimator] velocity_factor must be in (0, 1]".to_string());
        }
    }

    if let Some(len) = number(est, "cable_length_max_m") {
        if len <= 0.0 {
            errors.push("[estimator] cable_length_max_m must be positive".to_string());
        }
    }

    if let Some(c) = number(est, "speed_of_light") {
        if c <= 0.0 {
            errors.push("[estimator] speed_of_light must be positive".to_string());
        }
    }
}

fn validate_fault(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(fault) = config.get("fault") else {
        return;
    };

    if let Some(floor) = number(fault, "forward_floor_v") {
        if floor < 0.0 {
            errors.push("[fault] forward_floor_v must not be negative".to_string());
        }
    }

    for key in ["vswr_threshold", "reflected_floor_v", "vswr_sentinel"] {
        if fault.get(key).is_some() && number(fault, key).is_none() {
            errors.push(format!("[fault] {} must be a number", key));
        }
    }
}

/// Pulse timings must fit the firmware's u8/u32 fields
fn validate_alert(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(alert) = config.get("alert") else {
        return;
    };

    if let Some(toml::Value::Integer(pulses)) = alert.get("pulses") {
        if *pulses < 0 || *pulses > u8::MAX as i64 {
            errors.push("[alert] pulses must be 0-255".to_string());
        }
    }

    for key in ["on_ms", "off_ms"] {
        if let Some(toml::Value::Integer(ms)) = alert.get(key) {
            if *ms < 0 || *ms > u32::MAX as i64 {
                errors.push(format!("[alert] {} must be 0-4294967295", key));
            }
        }
    }

    if let Some(led) = alert.get("led") {
        if !led.is_bool() {
            errors.push("[alert] led must be true or false".to_string());
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing") else {
        return;
    };

    let poll = number(timing, "poll_interval_ms").unwrap_or(100.0);
    let duration = number(timing, "test_duration_ms").unwrap_or(5000.0);

    if poll <= 0.0 {
        errors.push("[timing] poll_interval_ms must be positive".to_string());
    }
    if duration < poll {
        errors.push("[timing] test_duration_ms must be >= poll_interval_ms".to_string());
    }
}
