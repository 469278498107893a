//! The live puzzle surface, as seen by the engine
//!
//! Finding elements and synthesizing input events belong to implementors.
//! The engine only reads rows and asks for relocations.

use crate::core::Word;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Identifier for one row, as positioned in the most recent read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowRef(pub usize);

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// One way of expressing "move this row there", by priority index
///
/// The engine does not know what a technique does; the board decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Technique(pub usize);

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "technique #{}", self.0 + 1)
    }
}

/// A row as read from the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    /// Letters currently shown; may be empty or partial
    pub word: String,
    pub locked: bool,
    pub position: usize,
}

impl BoardRow {
    #[must_use]
    pub fn new(word: impl Into<String>, locked: bool, position: usize) -> Self {
        Self {
            word: word.into(),
            locked,
            position,
        }
    }

    #[must_use]
    pub const fn row_ref(&self) -> RowRef {
        RowRef(self.position)
    }
}

/// Result of typing a word into a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    pub ok: bool,
    pub letters_applied: usize,
}

/// Board operation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{0} does not exist")]
    NoSuchRow(RowRef),
    #[error("{0} is locked")]
    Locked(RowRef),
    #[error("{0} is not supported")]
    UnsupportedTechnique(Technique),
    #[error("Board operation timed out")]
    Timeout,
    #[error("Board unavailable: {0}")]
    Unavailable(String),
}

/// The external puzzle surface
///
/// Every method is a suspension point; callers await each one before issuing
/// the next.
#[async_trait]
pub trait Board: Send {
    /// Current rows, top to bottom
    async fn read_arrangement(&mut self) -> Result<Vec<BoardRow>, BoardError>;

    /// Clue shown while `row` is active, if any
    async fn read_active_clue(&mut self, row: RowRef) -> Result<Option<String>, BoardError>;

    /// Try to move `source` to `dest` using `technique`
    ///
    /// The returned flag is the board's own opinion; callers verify by
    /// re-reading.
    async fn attempt_relocate(
        &mut self,
        source: RowRef,
        dest: RowRef,
        technique: Technique,
    ) -> Result<bool, BoardError>;

    /// Type `word` into `row`
    async fn fill_row(&mut self, row: RowRef, word: &Word) -> Result<FillOutcome, BoardError>;

    /// Give `row` focus so its clue is shown
    async fn activate_row(&mut self, row: RowRef) -> Result<(), BoardError>;

    /// Number of relocation techniques, tried in index order
    fn technique_count(&self) -> usize {
        1
    }
}
