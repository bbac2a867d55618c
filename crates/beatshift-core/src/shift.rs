//! Note-timing shift: move every note by a fixed number of parts
//!
//! Two boundary policies decide what happens to notes pushed across a bar
//! line. `Overflow` relocates them into neighbouring bars, growing the
//! sequence at either end as needed. `WrapAround` folds them back into their
//! own bar, leaving the sequence length alone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShiftError;
use crate::grid::Grid;
use crate::offset::BeatOffset;
use crate::sequence::{Bar, Note, Sequence};

/// How notes crossing a bar boundary are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftStrategy {
    /// Notes spill into adjacent bars; bars are added at either end as needed
    #[default]
    Overflow,
    /// Notes leaving a bar re-enter from the other side of the same bar
    WrapAround,
}

impl ShiftStrategy {
    pub const ALL: [ShiftStrategy; 2] = [ShiftStrategy::Overflow, ShiftStrategy::WrapAround];

    /// Stable identifier used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overflow => "overflow",
            Self::WrapAround => "wrapAround",
        }
    }

    /// Human readable description
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overflow => "Overflow notes across bars.",
            Self::WrapAround => "Wrap notes around within bars.",
        }
    }
}

impl fmt::Display for ShiftStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftStrategy {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overflow" => Ok(Self::Overflow),
            "wrapAround" | "wrap-around" | "wrap" => Ok(Self::WrapAround),
            other => Err(ShiftError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Result of a shift
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftOutcome {
    pub sequence: Sequence,
    /// Empty bars inserted before the original first bar
    pub bars_prepended: usize,
    /// Empty bars added after the original last bar
    pub bars_appended: usize,
}

impl ShiftOutcome {
    fn unchanged(sequence: &Sequence) -> Self {
        Self {
            sequence: sequence.clone(),
            bars_prepended: 0,
            bars_appended: 0,
        }
    }

    /// True when the bar count differs from the input sequence
    pub fn bar_count_changed(&self) -> bool {
        self.bars_prepended > 0 || self.bars_appended > 0
    }
}

/// Shift every note of `sequence` by `offset_parts` parts.
///
/// Note durations are preserved, except under `WrapAround` where a note
/// that would run past its bar's end is cut at the bar line. The input is
/// never modified.
pub fn shift_notes(
    sequence: &Sequence,
    grid: &Grid,
    offset_parts: i64,
    strategy: ShiftStrategy,
) -> ShiftOutcome {
    if offset_parts == 0 {
        return ShiftOutcome::unchanged(sequence);
    }
    match strategy {
        ShiftStrategy::Overflow => shift_overflow(sequence, grid, offset_parts),
        ShiftStrategy::WrapAround => shift_wrap_around(sequence, grid, offset_parts),
    }
}

/// Snap `offset` to the grid and shift by the resulting number of parts
pub fn shift_by_beats(
    sequence: &Sequence,
    grid: &Grid,
    offset: BeatOffset,
    strategy: ShiftStrategy,
) -> ShiftOutcome {
    shift_notes(sequence, grid, offset.to_parts(grid), strategy)
}

/// Channel width actually used by the bars, never less than declared
fn channel_width(sequence: &Sequence) -> usize {
    sequence
        .bars
        .iter()
        .map(|b| b.channels.len())
        .max()
        .unwrap_or(0)
        .max(sequence.channel_count)
}

fn shift_overflow(sequence: &Sequence, grid: &Grid, offset_parts: i64) -> ShiftOutcome {
    let channel_count = channel_width(sequence);
    let original_bars = sequence.bar_count() as i64;

    // (target bar, channel, note); bar may be negative until the front is padded
    let mut placed: Vec<(i64, usize, Note)> = Vec::with_capacity(sequence.note_count());
    let mut min_bar = 0i64;
    let mut max_bar = original_bars - 1;

    for (bar_idx, channel, note) in sequence.iter_notes() {
        let start = grid.to_absolute(bar_idx as i64, note.start as i64) + offset_parts;
        let (bar, part) = grid.to_bar_relative(start);
        // part < parts_per_bar <= u32::MAX, so a saturated end still follows start
        let end = part.saturating_add(note.duration());

        min_bar = min_bar.min(bar);
        max_bar = max_bar.max(bar);
        placed.push((bar, channel, Note { start: part, end, ..*note }));
    }

    let bars_prepended = (-min_bar) as usize;
    let bar_count = (max_bar + 1 + bars_prepended as i64).max(0) as usize;
    let mut bars = vec![Bar::empty(channel_count); bar_count];

    for (bar, channel, note) in placed {
        bars[(bar + bars_prepended as i64) as usize].channels[channel].notes.push(note);
    }
    for bar in &mut bars {
        reassemble(bar);
    }

    ShiftOutcome {
        bars_appended: bar_count - bars_prepended - original_bars as usize,
        bars_prepended,
        sequence: Sequence { channel_count, bars },
    }
}

fn shift_wrap_around(sequence: &Sequence, grid: &Grid, offset_parts: i64) -> ShiftOutcome {
    let parts_per_bar = grid.parts_per_bar() as i64;

    let bars = sequence
        .bars
        .iter()
        .map(|bar| {
            let mut bar = bar.clone();
            for track in &mut bar.channels {
                for note in &mut track.notes {
                    let start = grid.wrap_part(note.start as i64 + offset_parts);
                    // Cut at the bar line rather than wrap the tail
                    let end = (start as i64 + note.duration() as i64).min(parts_per_bar);
                    note.start = start;
                    note.end = end as u32;
                }
            }
            reassemble(&mut bar);
            bar
        })
        .collect();

    ShiftOutcome {
        sequence: Sequence {
            channel_count: sequence.channel_count,
            bars,
        },
        bars_prepended: 0,
        bars_appended: 0,
    }
}

/// Drop notes with no remaining length and restore start order
fn reassemble(bar: &mut Bar) {
    for track in &mut bar.channels {
        track.notes.retain(|n| n.end > n.start);
        track.notes.sort_by_key(|n| n.start);
    }
}
