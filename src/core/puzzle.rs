//! Puzzle data handed from extraction to the board-driving stages

use super::ladder::is_valid_ladder;
use super::Word;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A clue paired with its answer word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueAnswerPair {
    pub clue: String,
    pub answer: Word,
}

impl ClueAnswerPair {
    #[must_use]
    pub fn new(clue: impl Into<String>, answer: Word) -> Self {
        Self {
            clue: clue.into(),
            answer,
        }
    }
}

/// Everything known about one day's puzzle
///
/// Built once per solve attempt. The only mutation after construction is
/// [`PuzzleData::backfill_endpoints`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleData {
    pub puzzle_number: Option<u32>,
    pub start_word: Option<Word>,
    pub end_word: Option<Word>,
    pub word_ladder: Vec<Word>,
    pub clue_answer_pairs: Vec<ClueAnswerPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl PuzzleData {
    /// Whether the ladder holds `len` words forming a valid chain
    #[must_use]
    pub fn has_complete_ladder(&self, len: usize) -> bool {
        is_valid_ladder(&self.word_ladder, len)
    }

    /// Interior ladder words (empty unless the ladder is complete)
    #[must_use]
    pub fn middle_words(&self, len: usize) -> &[Word] {
        if self.has_complete_ladder(len) {
            &self.word_ladder[1..len - 1]
        } else {
            &[]
        }
    }

    /// Answers from the clue pairs, in pair order
    #[must_use]
    pub fn answers(&self) -> Vec<Word> {
        self.clue_answer_pairs
            .iter()
            .map(|pair| pair.answer.clone())
            .collect()
    }

    /// Make the endpoints agree with a complete ladder
    ///
    /// Missing endpoints are filled from the ladder ends. A verified ladder
    /// outranks a page cue, so an endpoint that disagrees with it is
    /// replaced, unless both endpoints name the ends in reverse, in which
    /// case the ladder is flipped instead.
    pub fn backfill_endpoints(&mut self, len: usize) {
        if !self.has_complete_ladder(len) {
            return;
        }
        let (Some(first), Some(last)) = (self.word_ladder.first(), self.word_ladder.last())
        else {
            return;
        };

        if self.start_word.as_ref() == Some(last) && self.end_word.as_ref() == Some(first) {
            self.word_ladder.reverse();
            return;
        }
        let (first, last) = (first.clone(), last.clone());
        if self.start_word.as_ref().is_some_and(|start| start != &first) {
            warn!(start = ?self.start_word, ladder = %first, "start word disagrees with ladder");
        }
        if self.end_word.as_ref().is_some_and(|end| end != &last) {
            warn!(end = ?self.end_word, ladder = %last, "end word disagrees with ladder");
        }
        self.start_word = Some(first);
        self.end_word = Some(last);
    }

    /// Keep only pairs whose answer sits in the ladder's middle, ordered by rung
    ///
    /// A no-op until the ladder is complete.
    pub fn validate_pairs(&mut self, len: usize) {
        let middle = self.middle_words(len).to_vec();
        if middle.is_empty() {
            return;
        }

        let mut ordered = Vec::with_capacity(middle.len());
        for word in &middle {
            if let Some(pair) = self
                .clue_answer_pairs
                .iter()
                .find(|pair| &pair.answer == word)
            {
                ordered.push(pair.clone());
            }
        }
        self.clue_answer_pairs = ordered;
    }

    /// Fill fields missing here from another extraction of the same puzzle
    ///
    /// Present fields are never overwritten. Pairs are appended when their
    /// answer is new.
    pub fn merge(&mut self, other: Self) {
        if self.puzzle_number.is_none() {
            self.puzzle_number = other.puzzle_number;
        }
        if self.start_word.is_none() {
            self.start_word = other.start_word;
        }
        if self.end_word.is_none() {
            self.end_word = other.end_word;
        }
        if self.word_ladder.len() < other.word_ladder.len() {
            self.word_ladder = other.word_ladder;
        }
        if self.theme.is_none() {
            self.theme = other.theme;
        }
        for pair in other.clue_answer_pairs {
            if !self
                .clue_answer_pairs
                .iter()
                .any(|known| known.answer == pair.answer)
            {
                self.clue_answer_pairs.push(pair);
            }
        }
    }
}
