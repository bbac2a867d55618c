//! Song document: song state, edit history and user preferences

use beatshift_core::{BeatOffset, ShiftStrategy};
use tracing::{info, warn};

use crate::command::{MoveNotesSideways, ShiftReport};
use crate::error::Result;
use crate::history::{Change, History};
use crate::preferences::{self, MemoryPreferences, PreferenceStore};
use crate::song::Song;

/// Owns the song and is the only place edits are committed from
pub struct SongDocument {
    song: Song,
    history: History,
    preferences: Box<dyn PreferenceStore>,
}

impl SongDocument {
    pub fn new(song: Song) -> Self {
        Self::with_preferences(song, Box::new(MemoryPreferences::new()))
    }

    pub fn with_preferences(song: Song, preferences: Box<dyn PreferenceStore>) -> Self {
        Self {
            song,
            history: History::default(),
            preferences,
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_song(self) -> Song {
        self.song
    }

    /// Strategy to offer by default: the last one used, else overflow
    pub fn preferred_strategy(&self) -> ShiftStrategy {
        preferences::load_strategy(self.preferences.as_ref(), ShiftStrategy::default())
    }

    /// Shift every note by `offset` beats as a single undoable edit.
    ///
    /// The offset is snapped and clamped the same way for every caller.
    /// On error the song and history are left untouched. A shift that
    /// changes nothing is not recorded.
    pub fn move_notes_sideways(
        &mut self,
        offset: impl Into<BeatOffset>,
        strategy: ShiftStrategy,
    ) -> Result<ShiftReport> {
        let offset = offset.into();
        if let Err(e) = preferences::save_strategy(self.preferences.as_mut(), strategy) {
            warn!("Failed to remember shift strategy: {}", e);
        }

        let change = MoveNotesSideways::new(&self.song, offset, strategy)?;
        let report = change.report();
        if change.is_noop() {
            info!("Shift by {} with {} left the song unchanged", offset, strategy);
            return Ok(report);
        }

        change.apply(&mut self.song);
        self.history.record(Box::new(change));
        info!(
            "Moved {} notes by {} beats ({} parts) with {}, bars {} -> {}",
            report.note_count,
            report.beats,
            report.offset_parts,
            strategy,
            report.bars_before,
            report.bars_after
        );
        Ok(report)
    }

    pub fn undo(&mut self) -> Result<String> {
        self.history.undo(&mut self.song)
    }

    pub fn redo(&mut self) -> Result<String> {
        self.history.redo(&mut self.song)
    }
}
