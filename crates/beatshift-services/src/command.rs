//! Move-notes-sideways edit: shifts every note of the song as one undo step

use beatshift_core::{shift_notes, BeatOffset, ShiftStrategy};

use crate::error::{DocumentError, Result};
use crate::history::Change;
use crate::song::{Song, SongLayout};

/// Summary of a committed shift
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftReport {
    pub strategy: ShiftStrategy,
    /// Offset in beats after snapping and clamping
    pub beats: f64,
    pub offset_parts: i64,
    pub bars_before: usize,
    pub bars_after: usize,
    pub bars_prepended: usize,
    pub bars_appended: usize,
    pub note_count: usize,
}

impl ShiftReport {
    pub fn bar_count_changed(&self) -> bool {
        self.bars_before != self.bars_after
    }
}

/// Before and after layouts of one shift.
///
/// Everything is computed up front in [`MoveNotesSideways::new`], so a
/// change that exists can always be applied and reverted in full.
#[derive(Debug, Clone)]
pub struct MoveNotesSideways {
    before: SongLayout,
    after: SongLayout,
    report: ShiftReport,
}

impl MoveNotesSideways {
    /// Plan a shift of `song` without touching it.
    ///
    /// Fails with [`DocumentError::BarLimitExceeded`] when overflow would
    /// grow the song past its bar limit.
    pub fn new(song: &Song, offset: BeatOffset, strategy: ShiftStrategy) -> Result<Self> {
        let grid = song.grid;
        let beats = offset.snap(&grid);
        let offset_parts = offset.to_parts(&grid);
        let outcome = shift_notes(&song.sequence, &grid, offset_parts, strategy);

        let bars_after = outcome.sequence.bar_count();
        if bars_after > song.max_bars && bars_after > song.bar_count() {
            return Err(DocumentError::BarLimitExceeded {
                needed: bars_after,
                max: song.max_bars,
            });
        }

        let report = ShiftReport {
            strategy,
            beats,
            offset_parts,
            bars_before: song.bar_count(),
            bars_after,
            bars_prepended: outcome.bars_prepended,
            bars_appended: outcome.bars_appended,
            note_count: outcome.sequence.note_count(),
        };

        let mut shifted = song.clone();
        shifted.sequence = outcome.sequence;
        // Leading bars push the loop along with the music it covered
        shifted.loop_start += outcome.bars_prepended;
        shifted.clamp_loop();

        Ok(Self {
            before: song.layout(),
            after: shifted.layout(),
            report,
        })
    }

    pub fn report(&self) -> ShiftReport {
        self.report
    }

    /// True when applying the change leaves the song as it was
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

impl Change for MoveNotesSideways {
    fn description(&self) -> &str {
        "Move notes sideways"
    }

    fn apply(&self, song: &mut Song) {
        song.set_layout(self.after.clone());
    }

    fn revert(&self, song: &mut Song) {
        song.set_layout(self.before.clone());
    }
}
