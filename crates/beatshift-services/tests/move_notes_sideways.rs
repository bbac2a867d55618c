//! Move-notes-sideways integration tests: document edits, undo and persistence.

use beatshift_core::{Grid, Note, ShiftStrategy};
use beatshift_services::{FilePreferences, Song, SongDocument};

fn demo_song() -> Song {
    let mut song = Song::new("Demo", Grid::new(4, 4).unwrap(), 2, 3);
    song.sequence.add_note(0, 0, Note::new(0, 4, 60, 100));
    song.sequence.add_note(0, 0, Note::new(8, 16, 62, 100));
    song.sequence.add_note(1, 1, Note::new(4, 6, 36, 127));
    song.sequence.add_note(2, 0, Note::new(12, 16, 64, 80));
    song.loop_start = 0;
    song.loop_length = 3;
    song
}

#[test]
fn overflow_left_then_right_restores_timing() {
    let mut doc = SongDocument::new(demo_song());
    let original = doc.song().clone();

    let left = doc.move_notes_sideways(-1.0, ShiftStrategy::Overflow).unwrap();
    assert_eq!(left.bars_prepended, 1);
    assert_eq!(doc.song().bar_count(), 4);
    assert_eq!(doc.song().loop_start, 1);

    let right = doc.move_notes_sideways(1.0, ShiftStrategy::Overflow).unwrap();
    assert_eq!(right.bars_prepended, 0);

    // The leading bar added by the first shift stays behind, empty
    let song = doc.song();
    assert_eq!(song.bar_count(), 4);
    assert!(song.sequence.bars[0].is_empty());
    assert_eq!(&song.sequence.bars[1..], &original.sequence.bars[..]);
    assert_eq!(song.sequence.note_count(), original.sequence.note_count());
}

#[test]
fn wrap_round_trip_is_exact() {
    let mut song = demo_song();
    // Drop the long note that would be cut at the bar line
    song.sequence.bars[0].channels[0].notes.retain(|n| n.pitch != 62);
    let mut doc = SongDocument::new(song);
    let original = doc.song().clone();

    doc.move_notes_sideways(1.5, ShiftStrategy::WrapAround).unwrap();
    assert_eq!(doc.song().bar_count(), 3);
    doc.move_notes_sideways(-1.5, ShiftStrategy::WrapAround).unwrap();
    assert_eq!(doc.song(), &original);
}

#[test]
fn wrap_truncates_long_note() {
    let mut doc = SongDocument::new(demo_song());
    doc.move_notes_sideways(1.0, ShiftStrategy::WrapAround).unwrap();

    let track = doc.song().sequence.channel(0, 0).unwrap();
    assert_eq!(track.notes, vec![Note::new(4, 8, 60, 100), Note::new(12, 16, 62, 100)]);
}

#[test]
fn undo_and_redo_whole_shift() {
    let mut doc = SongDocument::new(demo_song());
    let original = doc.song().clone();

    doc.move_notes_sideways(-3.25, ShiftStrategy::Overflow).unwrap();
    let shifted = doc.song().clone();
    assert_ne!(shifted, original);

    doc.undo().unwrap();
    assert_eq!(doc.song(), &original);
    doc.redo().unwrap();
    assert_eq!(doc.song(), &shifted);
    assert!(doc.undo().is_ok());
    assert!(doc.undo().is_err());
}

#[test]
fn unsanitized_offset_is_clamped() {
    let mut doc = SongDocument::new(demo_song());
    let report = doc.move_notes_sideways(1000.0, ShiftStrategy::Overflow).unwrap();
    assert_eq!(report.beats, 4.0);
    assert_eq!(report.offset_parts, 16);
    assert_eq!(report.bars_appended, 1);
}

#[test]
fn strategy_preference_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.toml");

    let mut doc = SongDocument::with_preferences(demo_song(), Box::new(FilePreferences::open(&path)));
    assert_eq!(doc.preferred_strategy(), ShiftStrategy::Overflow);
    doc.move_notes_sideways(0.25, ShiftStrategy::WrapAround).unwrap();

    let reopened = SongDocument::with_preferences(demo_song(), Box::new(FilePreferences::open(&path)));
    assert_eq!(reopened.preferred_strategy(), ShiftStrategy::WrapAround);
}

#[test]
fn shifted_song_saves_and_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.json");

    let mut doc = SongDocument::new(demo_song());
    doc.move_notes_sideways(0.5, ShiftStrategy::Overflow).unwrap();
    doc.song().save(&path).unwrap();

    let loaded = Song::load(&path).unwrap();
    assert_eq!(&loaded, doc.song());
}
