//! Core domain types for word ladders
//!
//! Words, ladder invariants, puzzle data and the tunable config. Everything
//! here is pure and free of I/O apart from loading a config file.

mod config;
mod ladder;
mod puzzle;
mod word;

pub use config::SolverConfig;
pub use ladder::{LADDER_LEN, find_ladder_window, is_chain, is_valid_ladder};
pub use puzzle::{ClueAnswerPair, PuzzleData};
pub use word::{MAX_WORD_LEN, MIN_WORD_LEN, Word, WordError, words_from_slice};
