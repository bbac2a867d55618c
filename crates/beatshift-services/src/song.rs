//! Song state owned by a document

use std::path::Path;

use beatshift_core::{Grid, Sequence};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, Result};

/// Upper bound on song length in bars
pub const DEFAULT_MAX_BARS: usize = 256;

fn default_max_bars() -> usize {
    DEFAULT_MAX_BARS
}

fn default_loop_length() -> usize {
    1
}

/// A song: grid, bars of notes and the playback loop region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grid: Grid,
    pub sequence: Sequence,
    /// First bar of the loop region
    #[serde(default)]
    pub loop_start: usize,
    /// Loop region length in bars
    #[serde(default = "default_loop_length")]
    pub loop_length: usize,
    /// Largest bar count edits may produce
    #[serde(default = "default_max_bars")]
    pub max_bars: usize,
}

/// The bar-count dependent parts of a song, swapped as a unit by edits
#[derive(Debug, Clone, PartialEq)]
pub struct SongLayout {
    pub sequence: Sequence,
    pub loop_start: usize,
    pub loop_length: usize,
}

impl Song {
    pub fn new(name: impl Into<String>, grid: Grid, channel_count: usize, bar_count: usize) -> Self {
        Self {
            name: name.into(),
            grid,
            sequence: Sequence::new(channel_count, bar_count),
            loop_start: 0,
            loop_length: bar_count.max(1),
            max_bars: DEFAULT_MAX_BARS,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.sequence.bar_count()
    }

    pub fn layout(&self) -> SongLayout {
        SongLayout {
            sequence: self.sequence.clone(),
            loop_start: self.loop_start,
            loop_length: self.loop_length,
        }
    }

    pub fn set_layout(&mut self, layout: SongLayout) {
        self.sequence = layout.sequence;
        self.loop_start = layout.loop_start;
        self.loop_length = layout.loop_length;
    }

    /// Keep the loop region inside the song and at least one bar long
    pub fn clamp_loop(&mut self) {
        let bars = self.bar_count().max(1);
        self.loop_start = self.loop_start.min(bars - 1);
        self.loop_length = self.loop_length.clamp(1, bars - self.loop_start);
    }

    /// Pad short bars with empty channels, sort every track by start and
    /// check the song is usable.
    ///
    /// Notes may extend past their bar line, but must start inside it.
    /// Overlapping notes in one track are allowed: overflow shifts can
    /// produce them from a note that already spanned the next bar.
    pub fn validate(&mut self) -> Result<()> {
        let channel_count = self.sequence.channel_count;
        for (idx, bar) in self.sequence.bars.iter_mut().enumerate() {
            if bar.channels.len() > channel_count {
                return Err(DocumentError::InvalidSong(format!(
                    "bar {} has {} channels, song declares {}",
                    idx,
                    bar.channels.len(),
                    channel_count
                )));
            }
            bar.channels.resize_with(channel_count, Default::default);
            for track in &mut bar.channels {
                track.notes.sort_by_key(|n| n.start);
            }
        }
        if self.bar_count() > self.max_bars {
            return Err(DocumentError::InvalidSong(format!(
                "{} bars exceeds the limit of {}",
                self.bar_count(),
                self.max_bars
            )));
        }
        let parts_per_bar = self.grid.parts_per_bar();
        for (bar, channel, note) in self.sequence.iter_notes() {
            if note.end <= note.start {
                return Err(DocumentError::InvalidSong(format!(
                    "empty note at bar {} channel {} (start {}, end {})",
                    bar, channel, note.start, note.end
                )));
            }
            if note.start >= parts_per_bar {
                return Err(DocumentError::InvalidSong(format!(
                    "note at bar {} channel {} starts at part {}, bar has {} parts",
                    bar, channel, note.start, parts_per_bar
                )));
            }
        }
        self.clamp_loop();
        Ok(())
    }

    /// Load a song from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let mut song: Song = serde_json::from_str(&text)?;
        song.validate()?;
        Ok(song)
    }

    /// Save the song as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

impl Default for Song {
    fn default() -> Self {
        Self::new("Untitled", Grid::default(), 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatshift_core::{Bar, Note};

    #[test]
    fn test_clamp_loop() {
        let mut song = Song::new("a", Grid::default(), 1, 4);
        song.loop_start = 10;
        song.loop_length = 10;
        song.clamp_loop();
        assert_eq!((song.loop_start, song.loop_length), (3, 1));

        song.loop_start = 1;
        song.loop_length = 0;
        song.clamp_loop();
        assert_eq!((song.loop_start, song.loop_length), (1, 1));
    }

    #[test]
    fn test_validate_pads_channels() {
        let mut song = Song::new("a", Grid::default(), 3, 2);
        song.sequence.bars[1].channels.truncate(1);
        song.validate().unwrap();
        assert_eq!(song.sequence.bars[1].channels.len(), 3);
    }

    #[test]
    fn test_validate_rejects_extra_channels() {
        let mut song = Song::new("a", Grid::default(), 1, 1);
        song.sequence.bars[0] = Bar::empty(2);
        assert!(matches!(song.validate(), Err(DocumentError::InvalidSong(_))));
    }

    #[test]
    fn test_validate_rejects_empty_notes() {
        let mut song = Song::new("a", Grid::default(), 1, 1);
        song.sequence.bars[0].channels[0].notes.push(Note::new(4, 4, 60, 100));
        assert!(song.validate().is_err());
    }

    #[test]
    fn test_validate_sorts_notes() {
        let mut song = Song::new("a", Grid::default(), 1, 1);
        let notes = &mut song.sequence.bars[0].channels[0].notes;
        notes.push(Note::new(8, 12, 62, 100));
        notes.push(Note::new(0, 4, 60, 100));
        notes.push(Note::new(4, 20, 61, 100));
        song.validate().unwrap();

        let starts: Vec<u32> = song.sequence.bars[0].channels[0].notes.iter().map(|n| n.start).collect();
        assert_eq!(starts, vec![0, 4, 8]);
    }

    #[test]
    fn test_validate_rejects_start_past_bar_end() {
        let mut song = Song::new("a", Grid::default(), 1, 1);
        song.sequence.bars[0].channels[0].notes.push(Note::new(16, 20, 60, 100));
        assert!(matches!(song.validate(), Err(DocumentError::InvalidSong(_))));

        song.sequence.bars[0].channels[0].notes[0] = Note::new(15, 40, 60, 100);
        assert!(song.validate().is_ok());
    }

    #[test]
    fn test_load_sorts_unsorted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.json");
        std::fs::write(
            &path,
            r#"{"sequence":{"channel_count":1,"bars":[{"channels":[{"notes":[
                {"start":12,"end":16,"pitch":64,"velocity":80},
                {"start":0,"end":4,"pitch":60,"velocity":100}
            ]}]}]}}"#,
        )
        .unwrap();

        let song = Song::load(&path).unwrap();
        let track = song.sequence.channel(0, 0).unwrap();
        assert_eq!(track.notes, vec![Note::new(0, 4, 60, 100), Note::new(12, 16, 64, 80)]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs").join("song.json");

        let mut song = Song::new("Demo", Grid::new(4, 3).unwrap(), 2, 2);
        song.sequence.add_note(1, 1, Note::new(0, 6, 64, 90));
        song.save(&path).unwrap();

        let loaded = Song::load(&path).unwrap();
        assert_eq!(loaded, song);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Song::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.json");
        std::fs::write(
            &path,
            r#"{"sequence":{"channel_count":1,"bars":[{"channels":[{"notes":[]}]}]}}"#,
        )
        .unwrap();

        let song = Song::load(&path).unwrap();
        assert_eq!(song.grid, Grid::default());
        assert_eq!(song.max_bars, DEFAULT_MAX_BARS);
        assert_eq!(song.loop_length, 1);
    }
}
