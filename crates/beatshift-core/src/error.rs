//! Error types for beatshift

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ShiftError {
    #[error("Invalid grid: {parts_per_beat} parts per beat, {beats_per_bar} beats per bar")]
    InvalidGrid { parts_per_beat: u32, beats_per_bar: u32 },
    #[error("Invalid beat offset: {0:?}")]
    InvalidOffset(String),
    #[error("Unknown shift strategy: {0:?}")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, ShiftError>;
