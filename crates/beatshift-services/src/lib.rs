//! beatshift-services: Song document, undo history and preference storage

pub mod command;
pub mod document;
mod error;
pub mod history;
pub mod preferences;
pub mod song;

pub use command::{MoveNotesSideways, ShiftReport};
pub use document::SongDocument;
pub use error::{DocumentError, Result};
pub use history::{Change, History};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore, STRATEGY_KEY};
pub use song::{Song, SongLayout, DEFAULT_MAX_BARS};
