//! Document-level error types

use std::path::PathBuf;

use beatshift_core::ShiftError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Shift error: {0}")]
    Shift(#[from] ShiftError),
    #[error("Shift needs {needed} bars, song allows at most {max}")]
    BarLimitExceeded { needed: usize, max: usize },
    #[error("Invalid song: {0}")]
    InvalidSong(String),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("Song file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Preferences parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Preferences write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
