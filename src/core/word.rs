//! Ladder word representation
//!
//! A Word is an uppercase ASCII string of 3 to 7 letters. All words within one
//! puzzle share the same length; Hamming distance is only defined between
//! words of equal length.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shortest word a ladder may use
pub const MIN_WORD_LEN: usize = 3;

/// Longest word a ladder may use
pub const MAX_WORD_LEN: usize = 7;

/// An uppercase ladder word
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be {MIN_WORD_LEN}-{MAX_WORD_LEN} letters, got {0}")]
    InvalidLength(usize),
    #[error("Word must contain only ASCII letters")]
    NonAscii,
    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is ignored and the text is uppercased.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is outside 3..=7
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use ladder_solver::core::Word;
    ///
    /// let word = Word::new("horns").unwrap();
    /// assert_eq!(word.text(), "HORNS");
    ///
    /// assert!(Word::new("toolonger").is_err());
    /// assert!(Word::new("h0rns").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = text.as_ref().trim();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&text.len()) {
            return Err(WordError::InvalidLength(text.len()));
        }

        if !text.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self {
            text: text.to_ascii_uppercase(),
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false; a valid word has at least three letters
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of positions at which the two words differ
    ///
    /// Returns `None` when the lengths differ.
    #[must_use]
    pub fn hamming(&self, other: &Self) -> Option<usize> {
        (self.len() == other.len()).then(|| {
            self.text
                .bytes()
                .zip(other.text.bytes())
                .filter(|(a, b)| a != b)
                .count()
        })
    }

    /// Whether the two words are one letter apart (a valid ladder step)
    #[inline]
    #[must_use]
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.hamming(other) == Some(1)
    }

    /// Case-insensitive comparison against raw observed text
    #[must_use]
    pub fn matches(&self, observed: &str) -> bool {
        self.text.eq_ignore_ascii_case(observed.trim())
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Convert string slices to Words, skipping invalid entries
#[must_use]
pub fn words_from_slice<S: AsRef<str>>(slice: &[S]) -> Vec<Word> {
    slice.iter().filter_map(|s| Word::new(s).ok()).collect()
}
