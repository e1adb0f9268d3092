//! Character display trait

use crate::report::Screen;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed (I2C NACK, arbitration, ...)
    Bus,
    /// Row or column outside the panel
    OutOfBounds,
}

/// Trait for text displays
///
/// The locator uses a small character LCD; all layout decisions are made
/// by the renderer, the driver only places text.
pub trait DisplayDriver {
    /// Number of text rows
    fn rows(&self) -> u8;

    /// Number of characters per row
    fn cols(&self) -> u8;

    /// Clear the entire screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a position
    ///
    /// Text running past the last column is cut off.
    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;
}

/// Helper trait for drawing complete screens
pub trait DisplayExt: DisplayDriver {
    /// Draw every row of `screen`, padding with spaces
    ///
    /// Overwriting in place avoids the flicker of a full clear.
    fn draw_screen(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        let cols = self.cols() as usize;
        for row in 0..self.rows().min(screen.rows()) {
            let mut buf = [b' '; 40];
            let width = cols.min(buf.len());
            let line = screen.get_line(row).as_bytes();
            let len = line.len().min(width);
            buf[..len].copy_from_slice(&line[..len]);

            // Screen lines are ASCII
            let text = core::str::from_utf8(&buf[..width]).unwrap_or("");
            self.text(row, 0, text)?;
        }
        Ok(())
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver> DisplayExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{String, Vec};

    struct Recorder {
        writes: Vec<(u8, String<40>), 4>,
    }

    impl DisplayDriver for Recorder {
        fn rows(&self) -> u8 {
            2
        }

        fn cols(&self) -> u8 {
            16
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            self.writes.clear();
            Ok(())
        }

        fn text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            let mut s = String::new();
            s.push_str(text).map_err(|_| DisplayError::OutOfBounds)?;
            self.writes
                .push((row, s))
                .map_err(|_| DisplayError::OutOfBounds)
        }

        fn set_backlight(&mut self, _on: bool) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    #[test]
    fn test_draw_screen_pads_rows() {
        let mut screen = Screen::new();
        screen.set_line(0, "CABLE OK");
        let mut display = Recorder { writes: Vec::new() };

        display.draw_screen(&screen).unwrap();

        assert_eq!(display.writes.len(), 2);
        assert_eq!(display.writes[0].1.as_str(), "CABLE OK        ");
        assert_eq!(display.writes[1].1.as_str(), "                ");
    }
}
