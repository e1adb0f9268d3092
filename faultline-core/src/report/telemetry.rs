//! Line-oriented debug telemetry
//!
//! One line per sample, for a serial terminal next to the bench:
//!
//! ```text
//! F=2.00V R=1.00V G=0.500 VSWR=3.00 D=250.0m FAULT
//! ```
//!
//! The line is informational only; the screen and the alert are what
//! the operator acts on.

use core::fmt::Write;

use heapless::String;

use crate::measurement::Measurement;

/// Maximum telemetry line length, including the trailing CRLF
pub const TELEMETRY_LINE_LEN: usize = 80;

/// One formatted telemetry line
pub type TelemetryLine = String<TELEMETRY_LINE_LEN>;

/// Format a measurement as a CRLF-terminated telemetry line
pub fn format_telemetry(m: &Measurement) -> TelemetryLine {
    let mut line = TelemetryLine::new();
    let _ = write!(
        line,
        "F={:.2}V R={:.2}V G={:.3} VSWR={:.2} D={:.1}m",
        m.forward_voltage, m.reflected_voltage, m.reflection_coefficient, m.vswr, m.fault_distance_m
    );
    if m.fault_detected {
        let _ = line.push_str(" FAULT");
    }
    if m.low_confidence {
        let _ = line.push_str(" LOW");
    }
    let _ = line.push_str("\r\n");
    line
}
