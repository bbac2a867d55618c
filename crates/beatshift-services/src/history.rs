//! Undo/redo history of reversible song changes

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::error::{DocumentError, Result};
use crate::song::Song;

const DEFAULT_MAX_DEPTH: usize = 100;

/// A reversible edit. `apply` and `revert` must be exact inverses on the
/// song state the change was built from.
pub trait Change: fmt::Debug {
    fn description(&self) -> &str;
    fn apply(&self, song: &mut Song);
    fn revert(&self, song: &mut Song);
}

/// Bounded undo stack with a redo stack that is cleared by new changes
#[derive(Debug)]
pub struct History {
    undo: VecDeque<Box<dyn Change>>,
    redo: Vec<Box<dyn Change>>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a change that has already been applied
    pub fn record(&mut self, change: Box<dyn Change>) {
        debug!("Recorded change: {}", change.description());
        self.undo.push_back(change);
        if self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Revert the most recent change, returning its description
    pub fn undo(&mut self, song: &mut Song) -> Result<String> {
        let change = self.undo.pop_back().ok_or(DocumentError::NothingToUndo)?;
        change.revert(song);
        let description = change.description().to_string();
        debug!("Undid change: {}", description);
        self.redo.push(change);
        Ok(description)
    }

    /// Re-apply the most recently undone change, returning its description
    pub fn redo(&mut self, song: &mut Song) -> Result<String> {
        let change = self.redo.pop().ok_or(DocumentError::NothingToRedo)?;
        change.apply(song);
        let description = change.description().to_string();
        debug!("Redid change: {}", description);
        self.undo.push_back(change);
        Ok(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
