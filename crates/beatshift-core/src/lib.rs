//! beatshift-core: Bar grid, note sequence and the note-timing shift transform

mod error;
pub mod grid;
pub mod offset;
pub mod sequence;
pub mod shift;

pub use error::{Result, ShiftError};
pub use grid::Grid;
pub use offset::BeatOffset;
pub use sequence::{Bar, ChannelTrack, Note, Sequence};
pub use shift::{shift_by_beats, shift_notes, ShiftOutcome, ShiftStrategy};
