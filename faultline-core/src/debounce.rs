//! Button debouncing
//!
//! Integrating counter: every sample where the raw level is active moves
//! the counter up, every inactive sample moves it down. A press is reported
//! once the counter saturates, a release once it drains back to zero, so
//! contact bounce shorter than the debounce time never produces an edge.

/// Debounced transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Input became stably active
    Pressed,
    /// Input became stably inactive
    Released,
}

/// Counter-based debouncer for a sampled digital input
#[derive(Debug, Clone)]
pub struct Debouncer {
    counter: u32,
    threshold: u32,
    pressed: bool,
}

impl Debouncer {
    /// Create a debouncer for an input sampled every `sample_period_ms`
    ///
    /// At least one sample is always required.
    pub fn new(debounce_ms: u32, sample_period_ms: u32) -> Self {
        let threshold = (debounce_ms / sample_period_ms.max(1)).max(1);
        Self {
            counter: 0,
            threshold,
            pressed: false,
        }
    }

    /// Feed one raw sample, returning an edge when the debounced level flips
    pub fn update(&mut self, active: bool) -> Option<Edge> {
        if active {
            self.counter = (self.counter + 1).min(self.threshold);
            if self.counter >= self.threshold && !self.pressed {
                self.pressed = true;
                return Some(Edge::Pressed);
            }
        } else {
            self.counter = self.counter.saturating_sub(1);
            if self.counter == 0 && self.pressed {
                self.pressed = false;
                return Some(Edge::Released);
            }
        }
        None
    }

    /// Current debounced level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Samples needed to register a press
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
