//! Beat offsets and the input snapping policy

use std::fmt;
use std::str::FromStr;

use crate::error::ShiftError;
use crate::grid::Grid;

/// A signed, possibly fractional, number of beats to move notes by.
///
/// The raw value is kept as entered. [`BeatOffset::snap`] applies the
/// sanitization every caller must share, so the same entry always produces
/// the same shift.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeatOffset(pub f64);

/// Round half toward positive infinity
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

impl BeatOffset {
    pub fn new(beats: f64) -> Self {
        Self(beats)
    }

    pub fn beats(&self) -> f64 {
        self.0
    }

    /// Snapped offset in beats.
    ///
    /// Rounds to the nearest grid part, then to two decimal places, then
    /// clamps to one bar in either direction. Non-finite values snap to 0.
    pub fn snap(&self, grid: &Grid) -> f64 {
        if !self.0.is_finite() {
            return 0.0;
        }
        let parts_per_beat = grid.parts_per_beat() as f64;
        let beats_per_bar = grid.beats_per_bar() as f64;

        let mut value = round_half_up(self.0 * parts_per_beat) / parts_per_beat;
        value = round_half_up(value * 100.0) / 100.0;
        value.clamp(-beats_per_bar, beats_per_bar)
    }

    /// Snapped offset converted to whole parts
    pub fn to_parts(&self, grid: &Grid) -> i64 {
        round_half_up(self.snap(grid) * grid.parts_per_beat() as f64) as i64
    }
}

impl From<f64> for BeatOffset {
    fn from(beats: f64) -> Self {
        Self(beats)
    }
}

impl FromStr for BeatOffset {
    type Err = ShiftError;

    /// Parse free-text input. Blank input means no movement.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self(0.0));
        }
        match trimmed.parse::<f64>() {
            Ok(beats) if beats.is_finite() => Ok(Self(beats)),
            _ => Err(ShiftError::InvalidOffset(s.to_string())),
        }
    }
}

impl fmt::Display for BeatOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} beats", self.0)
    }
}
