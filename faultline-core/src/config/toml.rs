//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the locator configuration. It does NOT support the full TOML spec and
//! needs no allocator.
//!
//! Supported features:
//! - Key = value pairs (float, integer, boolean)
//! - `[section]` headers
//! - Comments (`# ...`), including trailing comments
//!
//! NOT supported:
//! - Strings, arrays, inline tables
//! - Dotted keys or nested sections
//!
//! Keys that are absent keep their defaults, so a config file only needs
//! to list what differs from [`DeviceConfig::default`].

use super::types::{DeviceConfig, CONFIG_VERSION};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header (line number)
    InvalidSection(u16),
    /// Unknown key for the current section (line number)
    UnknownKey(u16),
    /// Value could not be parsed as the expected type (line number)
    InvalidValue(u16),
    /// Line is neither a header nor `key = value` (line number)
    Syntax(u16),
    /// Config version is not supported
    VersionMismatch(u8),
    /// Values parse but are physically meaningless
    OutOfRange(&'static str),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Estimator,
    Fault,
    Timing,
    Alert,
}

/// Parse TOML configuration into DeviceConfig
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = u16::try_from(index + 1).unwrap_or(u16::MAX);
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax(line_no))?;
        apply_value(section, key, value, &mut config, line_no)?;
    }

    if config.version != CONFIG_VERSION {
        return Err(ParseError::VersionMismatch(config.version));
    }

    validate(&config)?;
    Ok(config)
}

/// Reject configurations that would make the estimator divide by zero or
/// the controller never leave a state
///
/// A negative forward floor lets a zero forward channel through the Γ guard.
#[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN must fail these checks
pub fn validate(config: &DeviceConfig) -> Result<(), ParseError> {
    let est = &config.estimator;
    if !(est.reference_voltage > 0.0) {
        return Err(ParseError::OutOfRange("estimator.reference_voltage"));
    }
    if est.adc_resolution == 0 {
        return Err(ParseError::OutOfRange("estimator.adc_resolution"));
    }
    if !(est.velocity_factor > 0.0 && est.velocity_factor <= 1.0) {
        return Err(ParseError::OutOfRange("estimator.velocity_factor"));
    }
    if !(est.cable_length_max_m > 0.0) {
        return Err(ParseError::OutOfRange("estimator.cable_length_max_m"));
    }
    if !(est.speed_of_light > 0.0) {
        return Err(ParseError::OutOfRange("estimator.speed_of_light"));
    }
    if !(config.thresholds.forward_floor_v >= 0.0) {
        return Err(ParseError::OutOfRange("fault.forward_floor_v"));
    }
    if config.timing.poll_interval_ms == 0 {
        return Err(ParseError::OutOfRange("timing.poll_interval_ms"));
    }
    if config.timing.test_duration_ms < config.timing.poll_interval_ms {
        return Err(ParseError::OutOfRange("timing.test_duration_ms"));
    }
    Ok(())
}

/// Parse section header like "estimator" or "timing"
fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "estimator" => Some(Section::Estimator),
        "fault" => Some(Section::Fault),
        "timing" => Some(Section::Timing),
        "alert" => Some(Section::Alert),
        _ => None,
    }
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a numeric value (TOML allows `_` separators)
fn parse_number<T: core::str::FromStr>(value: &str, line_no: u16) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue(line_no))?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue(line_no))
}

/// Parse a float value; integers and exponents are accepted
fn parse_float(value: &str, line_no: u16) -> Result<f32, ParseError> {
    let v: f32 = parse_number(value, line_no)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidValue(line_no))
    }
}

/// Parse a boolean value
fn parse_bool(value: &str, line_no: u16) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue(line_no)),
    }
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
    line_no: u16,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "version") => config.version = parse_number(value, line_no)?,

        (Section::Estimator, "reference_voltage") => {
            config.estimator.reference_voltage = parse_float(value, line_no)?
        }
        (Section::Estimator, "adc_resolution") => {
            config.estimator.adc_resolution = parse_number(value, line_no)?
        }
        (Section::Estimator, "velocity_factor") => {
            config.estimator.velocity_factor = parse_float(value, line_no)?
        }
        (Section::Estimator, "cable_length_max_m") => {
            config.estimator.cable_length_max_m = parse_float(value, line_no)?
        }
        (Section::Estimator, "speed_of_light") => {
            config.estimator.speed_of_light = parse_float(value, line_no)?
        }

        (Section::Fault, "forward_floor_v") => {
            config.thresholds.forward_floor_v = parse_float(value, line_no)?
        }
        (Section::Fault, "vswr_threshold") => {
            config.thresholds.vswr_threshold = parse_float(value, line_no)?
        }
        (Section::Fault, "reflected_floor_v") => {
            config.thresholds.reflected_floor_v = parse_float(value, line_no)?
        }
        (Section::Fault, "vswr_sentinel") => {
            config.thresholds.vswr_sentinel = parse_float(value, line_no)?
        }

        (Section::Timing, "poll_interval_ms") => {
            config.timing.poll_interval_ms = parse_number(value, line_no)?
        }
        (Section::Timing, "test_duration_ms") => {
            config.timing.test_duration_ms = parse_number(value, line_no)?
        }
        (Section::Timing, "report_hold_ms") => {
            config.timing.report_hold_ms = parse_number(value, line_no)?
        }
        (Section::Timing, "debounce_ms") => config.timing.debounce_ms = parse_number(value, line_no)?,

        (Section::Alert, "pulses") => config.alert.pulses = parse_number(value, line_no)?,
        (Section::Alert, "on_ms") => config.alert.on_ms = parse_number(value, line_no)?,
        (Section::Alert, "off_ms") => config.alert.off_ms = parse_number(value, line_no)?,
        (Section::Alert, "led") => config.alert.led = parse_bool(value, line_no)?,

        _ => return Err(ParseError::UnknownKey(line_no)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Locator on an RP2040 board
version = 1

[estimator]
reference_voltage = 3.3
adc_resolution = 4_096   # 12-bit
velocity_factor = 0.66
cable_length_max_m = 500
speed_of_light = 3e8

[fault]
vswr_threshold = 2.5

[timing]
poll_interval_ms = 50
test_duration_ms = 2000

[alert]
pulses = 5
led = false
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.estimator.reference_voltage, 3.3);
        assert_eq!(config.estimator.adc_resolution, 4096);
        assert_eq!(config.estimator.cable_length_max_m, 500.0);
        assert_eq!(config.estimator.speed_of_light, 3.0e8);
        assert_eq!(config.thresholds.vswr_threshold, 2.5);
        assert_eq!(config.timing.poll_interval_ms, 50);
        assert_eq!(config.timing.test_duration_ms, 2000);
        assert_eq!(config.alert.pulses, 5);
        assert!(!config.alert.led);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[timing]\nreport_hold_ms = 1000\n").unwrap();
        let defaults = DeviceConfig::default();
        assert_eq!(config.timing.report_hold_ms, 1000);
        assert_eq!(config.estimator, defaults.estimator);
        assert_eq!(config.thresholds, defaults.thresholds);
        assert_eq!(config.alert, defaults.alert);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), DeviceConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[motor]\nrpm = 3\n"),
            Err(ParseError::InvalidSection(1))
        );
    }

    #[test]
    fn test_unknown_key_reports_line() {
        assert_eq!(
            parse_config("[alert]\npulses = 2\nvolume = 9\n"),
            Err(ParseError::UnknownKey(3))
        );
    }

    #[test]
    fn test_invalid_value() {
        assert_eq!(
            parse_config("[estimator]\nvelocity_factor = fast\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[alert]\nled = yes\n"),
            Err(ParseError::InvalidValue(2))
        );
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(
            parse_config("[timing]\npoll_interval_ms\n"),
            Err(ParseError::Syntax(2))
        );
    }

    #[test]
    fn test_version_mismatch() {
        assert_eq!(
            parse_config("version = 7\n"),
            Err(ParseError::VersionMismatch(7))
        );
    }

    #[test]
    fn test_rejects_zero_resolution() {
        assert_eq!(
            parse_config("[estimator]\nadc_resolution = 0\n"),
            Err(ParseError::OutOfRange("estimator.adc_resolution"))
        );
    }

    #[test]
    fn test_rejects_run_shorter_than_poll() {
        assert_eq!(
            parse_config("[timing]\npoll_interval_ms = 500\ntest_duration_ms = 100\n"),
            Err(ParseError::OutOfRange("timing.test_duration_ms"))
        );
    }

    #[test]
    fn test_rejects_negative_forward_floor() {
        assert_eq!(
            parse_config("[fault]\nforward_floor_v = -0.5\n"),
            Err(ParseError::OutOfRange("fault.forward_floor_v"))
        );
        // Zero is the tightest floor that still guards 0 / 0
        let config = parse_config("[fault]\nforward_floor_v = 0\n").unwrap();
        let m = crate::measurement::Estimator::new(config.estimator, config.thresholds).estimate(0, 0);
        assert_eq!(m.reflection_coefficient, 0.0);
        assert!(m.low_confidence);
    }

    #[test]
    fn test_line_numbers_saturate() {
        let mut input = "\n".repeat(66_000);
        input.push_str("bogus\n");
        assert_eq!(parse_config(&input), Err(ParseError::Syntax(u16::MAX)));
    }

    #[test]
    fn test_rejects_velocity_factor_above_one() {
        assert_eq!(
            parse_config("[estimator]\nvelocity_factor = 1.5\n"),
            Err(ParseError::OutOfRange("estimator.velocity_factor"))
        );
    }
}
