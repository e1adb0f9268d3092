//! Screen rendering
//!
//! Builds screens for the controller states. The panel is a 16x2
//! character LCD.

use core::fmt::Write;

use heapless::String;

use crate::measurement::Measurement;

/// Characters per row
pub const SCREEN_COLS: usize = 16;

/// Text rows
pub const SCREEN_ROWS: usize = 2;

/// A screen buffer that can be sent to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
        }
    }

    /// Clear the screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Number of rows
    pub fn rows(&self) -> u8 {
        SCREEN_ROWS as u8
    }

    /// Set text at a specific row, cut to the panel width
    pub fn set_line(&mut self, row: u8, text: &str) {
        if let Some(line) = self.lines.get_mut(row as usize) {
            line.clear();
            let end = text
                .char_indices()
                .nth(SCREEN_COLS)
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            let _ = line.push_str(&text[..end]);
        }
    }

    /// Get a line of text
    pub fn get_line(&self, row: u8) -> &str {
        self.lines
            .get(row as usize)
            .map(|l| l.as_str())
            .unwrap_or("")
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen renderer for the controller states
#[derive(Debug, Default)]
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the idle prompt
    pub fn render_idle(&mut self) {
        self.screen.clear();
        self.screen.set_line(0, "CABLE LOCATOR");
        self.screen.set_line(1, "Press to test");
    }

    /// Render run progress
    ///
    /// # Arguments
    /// - `elapsed_ms`: Time since the run started
    /// - `total_ms`: Run length
    pub fn render_running(&mut self, elapsed_ms: u32, total_ms: u32) {
        self.screen.clear();
        self.screen.set_line(0, "Testing...");

        let mut line: String<32> = String::new();
        let _ = write!(
            line,
            "{}/{} s",
            elapsed_ms.min(total_ms) / 1000,
            total_ms / 1000
        );
        self.screen.set_line(1, &line);
    }

    /// Render the result of a finished run
    pub fn render_report(&mut self, measurement: Option<&Measurement>) {
        self.screen.clear();

        let Some(m) = measurement else {
            self.screen.set_line(0, "NO DATA");
            self.screen.set_line(1, "Check probe");
            return;
        };

        let mut top: String<32> = String::new();
        if m.fault_detected {
            let _ = write!(top, "FAULT {:.1}m", m.fault_distance_m);
        } else {
            let _ = top.push_str("CABLE OK");
        }
        self.screen.set_line(0, &top);

        let mut bottom: String<32> = String::new();
        if m.low_confidence {
            let _ = bottom.push_str("LOW SIGNAL");
        } else {
            let _ = write!(bottom, "VSWR {:.2}", m.vswr);
        }
        self.screen.set_line(1, &bottom);
    }
}
