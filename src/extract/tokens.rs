//! Word-shaped tokens and small metadata patterns in free text

use crate::core::{MAX_WORD_LEN, MIN_WORD_LEN, Word};
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::LazyLock;

static UPPERCASE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,7}\b").expect("bad regex"));

static PUZZLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:#\s*|\b(?:no\.?|number|puzzle|ladder)\s*#?\s*)(\d{1,5})\b")
        .expect("bad regex")
});

static THEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*theme\s*[:\-–]\s*(.+?)\s*$").expect("bad regex"));

/// Uppercase tokens that are page furniture rather than answers
const STOP_WORDS: &[&str] = &[
    "THE", "AND", "TOP", "BOTTOM", "FAQ", "HTML", "JSON", "CSS", "URL", "API", "NYT", "USA",
    "EST", "PST", "GMT", "TODAY", "DAILY", "ANSWER", "ANSWERS", "LADDER", "PUZZLE", "SPOILER",
    "SPOILERS", "INTO",
];

/// Headings that are also real ladder words; only kept out of answer cells
const HEADING_WORDS: &[&str] = &[
    "HINT", "HINTS", "CLUE", "CLUES", "WORD", "WORDS", "START", "THEME",
];

/// Whether `token` is a common non-answer uppercase word
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Whether `token` cannot be the answer in a clue/answer cell
#[must_use]
pub fn is_label_word(token: &str) -> bool {
    is_stop_word(token) || HEADING_WORDS.contains(&token)
}

/// Every standalone uppercase token of plausible word length, with byte offsets
pub fn uppercase_tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    UPPERCASE_TOKEN
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .filter(|(_, token)| !is_stop_word(token))
}

/// Deduplicated uppercase tokens of exactly `len` letters, in order of first appearance
#[must_use]
pub fn tokens_of_length(text: &str, len: usize) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    uppercase_tokens(text)
        .filter(|(_, token)| token.len() == len && seen.insert(*token))
        .filter_map(|(_, token)| Word::new(token).ok())
        .collect()
}

/// Word length with the most unique uppercase tokens
///
/// Ties prefer the longer length, since short tokens are mostly noise.
/// `None` if the text has no tokens at all.
#[must_use]
pub fn dominant_length(text: &str) -> Option<usize> {
    let mut buckets: FxHashMap<usize, FxHashSet<&str>> = FxHashMap::default();
    for (_, token) in uppercase_tokens(text) {
        buckets.entry(token.len()).or_default().insert(token);
    }

    (MIN_WORD_LEN..=MAX_WORD_LEN)
        .filter_map(|len| buckets.get(&len).map(|set| (set.len(), len)))
        .max()
        .map(|(_, len)| len)
}

/// Puzzle number from `#123`, `No. 123` or `Puzzle 123` style text
#[must_use]
pub fn puzzle_number(text: &str) -> Option<u32> {
    PUZZLE_NUMBER
        .captures_iter(text)
        .find_map(|caps| caps[1].parse().ok())
}

/// Theme from a `Theme: ...` line
#[must_use]
pub fn theme(text: &str) -> Option<String> {
    THEME
        .captures(text)
        .map(|caps| caps[1].to_string())
        .filter(|theme| !theme.is_empty())
}
