//! Traffic-signal phase timing.
//!
//! Every intersection's color is a pure function of the driver's global
//! signal step and the node's phase offset; there is no per-node timer
//! state and no randomness after construction.

use super::types::SignalColor;

/// Durations (in ticks) of the green, yellow and red phases of the signal
/// cycle shared by every intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTiming {
    pub green: u64,
    pub yellow: u64,
    pub red: u64,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self::with_default_red(2, 1)
    }
}

impl SignalTiming {
    /// Timing with explicit phase durations. All durations must be at least
    /// one tick; zero durations are clamped up so the cycle stays well
    /// defined.
    pub fn new(green: u64, yellow: u64, red: u64) -> Self {
        Self {
            green: green.max(1),
            yellow: yellow.max(1),
            red: red.max(1),
        }
    }

    /// Timing where the red phase lasts as long as the green phase.
    pub fn with_default_red(green: u64, yellow: u64) -> Self {
        Self::new(green, yellow, green)
    }

    pub fn cycle_length(&self) -> u64 {
        self.green + self.yellow + self.red
    }

    /// The global step value before any tick has run. Chosen so the first
    /// signal update puts every zero-offset intersection at the start of
    /// its red phase.
    pub fn initial_step(&self) -> u64 {
        self.green + self.yellow - 1
    }

    /// Color shown by a node with the given phase offset at the given
    /// global step.
    pub fn color_at(&self, step: u64, offset: u64) -> SignalColor {
        let phase = (step + offset) % self.cycle_length();
        if phase < self.green {
            SignalColor::Green
        } else if phase < self.green + self.yellow {
            SignalColor::Yellow
        } else {
            SignalColor::Red
        }
    }
}
