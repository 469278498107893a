//! Word ladder invariants

use super::Word;

/// Words in a complete daily ladder
pub const LADDER_LEN: usize = 7;

/// Check that `words` is a complete ladder of `len` words
///
/// Every adjacent pair must differ in exactly one letter position.
///
/// # Examples
/// ```
/// use ladder_solver::core::{is_valid_ladder, words_from_slice};
///
/// let ladder = words_from_slice(&["cat", "cot", "dot"]);
/// assert!(is_valid_ladder(&ladder, 3));
/// assert!(!is_valid_ladder(&ladder, 7));
/// ```
#[must_use]
pub fn is_valid_ladder(words: &[Word], len: usize) -> bool {
    words.len() == len && is_chain(words)
}

/// Check that every adjacent pair is one letter apart, regardless of length
#[must_use]
pub fn is_chain(words: &[Word]) -> bool {
    words.windows(2).all(|pair| pair[0].is_adjacent(&pair[1]))
}

/// Find the first `len`-word window of `words` that forms a valid ladder
///
/// The first `len` words are tried first, then every later sliding window, so
/// stray matches before or after the ladder are tolerated.
#[must_use]
pub fn find_ladder_window(words: &[Word], len: usize) -> Option<Vec<Word>> {
    if words.len() < len || len == 0 {
        return None;
    }

    words
        .windows(len)
        .find(|window| is_valid_ladder(window, len))
        .map(<[Word]>::to_vec)
}
