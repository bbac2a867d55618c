//! Discrete time grid: parts, beats and bars

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// Time coordinate system shared by every bar of a sequence.
///
/// A part is the smallest addressable time unit. Positions are either
/// bar-relative (`bar`, `part` within that bar) or absolute parts counted
/// from the start of bar 0. Absolute positions are signed so that notes
/// shifted left of the first bar can still be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    parts_per_beat: u32,
    beats_per_bar: u32,
}

#[derive(Deserialize)]
struct RawGrid {
    parts_per_beat: u32,
    beats_per_bar: u32,
}

impl TryFrom<RawGrid> for Grid {
    type Error = ShiftError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Grid::new(raw.parts_per_beat, raw.beats_per_bar)
    }
}

impl Grid {
    /// Create a grid. Both values must be positive and a bar must fit in
    /// a `u32` number of parts.
    pub fn new(parts_per_beat: u32, beats_per_bar: u32) -> Result<Self> {
        if parts_per_beat == 0 || beats_per_bar == 0 || parts_per_beat.checked_mul(beats_per_bar).is_none() {
            return Err(ShiftError::InvalidGrid { parts_per_beat, beats_per_bar });
        }
        Ok(Self { parts_per_beat, beats_per_bar })
    }

    pub fn parts_per_beat(&self) -> u32 {
        self.parts_per_beat
    }

    pub fn beats_per_bar(&self) -> u32 {
        self.beats_per_bar
    }

    /// Length of one bar in parts
    pub fn parts_per_bar(&self) -> u32 {
        self.parts_per_beat * self.beats_per_bar
    }

    /// Bar-relative position to absolute part index
    pub fn to_absolute(&self, bar: i64, part: i64) -> i64 {
        bar * self.parts_per_bar() as i64 + part
    }

    /// Absolute part index to `(bar, part_within_bar)`.
    ///
    /// Uses floored division, so the part is always in `[0, parts_per_bar)`
    /// and negative positions land in negative bars.
    pub fn to_bar_relative(&self, absolute: i64) -> (i64, u32) {
        let ppb = self.parts_per_bar() as i64;
        (absolute.div_euclid(ppb), absolute.rem_euclid(ppb) as u32)
    }

    /// Floored modulo of a part position into a single bar
    pub fn wrap_part(&self, part: i64) -> u32 {
        part.rem_euclid(self.parts_per_bar() as i64) as u32
    }
}

impl Default for Grid {
    /// Four parts per beat, four beats per bar
    fn default() -> Self {
        Self { parts_per_beat: 4, beats_per_bar: 4 }
    }
}
