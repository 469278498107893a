//! Clue-to-answer matching
//!
//! Assigns every observed board row an answer in one global pass over the
//! fully-collected observations. Four stages run in order, each over all rows
//! still unassigned:
//!
//! 1. exact match of normalized clue text
//! 2. containment (either string contains the other)
//! 3. Jaccard token similarity above the configured threshold
//! 4. positional fallback from the known middle words
//!
//! An answer leaves the pool as soon as it is assigned, so the resulting
//! [`Assignment`] is always injective.

mod normalize;

pub use normalize::{jaccard, normalize};

use crate::core::{ClueAnswerPair, SolverConfig, Word};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Whole words or phrases marking an observation as a status or error message
const FAILURE_KEYWORDS: &[&str] = &[
    "error",
    "failed",
    "failure",
    "not found",
    "undefined",
    "timeout",
    "timed out",
    "try again",
];

/// The clue text read from one board row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedClue {
    pub row: usize,
    /// `None` when the board had no readable clue for the row
    pub text: Option<String>,
}

impl ObservedClue {
    #[must_use]
    pub fn new(row: usize, text: impl Into<String>) -> Self {
        Self {
            row,
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub const fn missing(row: usize) -> Self {
        Self { row, text: None }
    }
}

/// Which stage assigned an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    Exact,
    Containment,
    Similarity,
    Positional,
}

impl MatchMethod {
    /// Whether the answer was matched from the clue text
    #[must_use]
    pub const fn is_clue_match(self) -> bool {
        !matches!(self, Self::Positional)
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::Containment => "containment",
            Self::Similarity => "similarity",
            Self::Positional => "positional",
        };
        f.write_str(name)
    }
}

/// One row's answer and how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedAnswer {
    pub answer: Word,
    pub method: MatchMethod,
    /// Jaccard score for similarity matches
    pub score: Option<f64>,
}

/// Injective mapping from row index to answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    entries: BTreeMap<usize, AssignedAnswer>,
}

impl Assignment {
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Word> {
        self.entries.get(&row).map(|entry| &entry.answer)
    }

    #[must_use]
    pub fn entry(&self, row: usize) -> Option<&AssignedAnswer> {
        self.entries.get(&row)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in ascending order with their answers
    pub fn iter(&self) -> impl Iterator<Item = (usize, &AssignedAnswer)> {
        self.entries.iter().map(|(&row, entry)| (row, entry))
    }

    fn contains_answer(&self, answer: &Word) -> bool {
        self.entries.values().any(|entry| &entry.answer == answer)
    }

    fn insert(&mut self, row: usize, answer: Word, method: MatchMethod, score: Option<f64>) {
        debug_assert!(!self.contains_answer(&answer), "answer assigned twice");
        debug!(row, answer = %answer, %method, "row assigned");
        self.entries.insert(
            row,
            AssignedAnswer {
                answer,
                method,
                score,
            },
        );
    }

    /// Counts for reporting partial progress
    #[must_use]
    pub fn summary(&self, rows: usize) -> MatchSummary {
        let by_clue = self
            .entries
            .values()
            .filter(|entry| entry.method.is_clue_match())
            .count();
        MatchSummary {
            rows,
            by_clue,
            positional: self.entries.len() - by_clue,
        }
    }
}

/// How many rows were matched, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub rows: usize,
    pub by_clue: usize,
    pub positional: usize,
}

impl MatchSummary {
    #[must_use]
    pub const fn unassigned(&self) -> usize {
        self.rows.saturating_sub(self.by_clue + self.positional)
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matched {} of {} by clue", self.by_clue, self.rows)?;
        if self.positional > 0 {
            write!(f, ", {} positional", self.positional)?;
        }
        if self.unassigned() > 0 {
            write!(f, ", {} unassigned", self.unassigned())?;
        }
        Ok(())
    }
}

/// Whether an observation looks like an error or status message rather than a clue
#[must_use]
pub fn is_suspect(text: Option<&str>, config: &SolverConfig) -> bool {
    let Some(text) = text else {
        return true;
    };
    if text.chars().count() > config.max_clue_length {
        return true;
    }
    let normalized = normalize(text);
    if normalized.is_empty() {
        return true;
    }
    let padded = format!(" {normalized} ");
    FAILURE_KEYWORDS
        .iter()
        .any(|keyword| padded.contains(&format!(" {keyword} ")))
}

/// Assign every observed row an answer
///
/// Suspect rows (see [`is_suspect`]) only take part in the positional
/// fallback, so one garbled read cannot steal an answer from a later row.
/// Rows are left unassigned only when the known middle words run out.
#[must_use]
pub fn match_clues(
    observed: &[ObservedClue],
    pairs: &[ClueAnswerPair],
    known_middle: &[Word],
    config: &SolverConfig,
) -> Assignment {
    let known: Vec<(String, &Word)> = pairs
        .iter()
        .map(|pair| (normalize(&pair.clue), &pair.answer))
        .collect();

    let mut seen_rows = FxHashSet::default();
    let rows: Vec<&ObservedClue> = observed
        .iter()
        .filter(|clue| seen_rows.insert(clue.row))
        .collect();

    let textual: Vec<(usize, String)> = rows
        .iter()
        .filter(|clue| !is_suspect(clue.text.as_deref(), config))
        .filter_map(|clue| clue.text.as_deref().map(|text| (clue.row, normalize(text))))
        .collect();

    let mut assignment = Assignment::default();

    // Exact, then containment
    let stages: [(MatchMethod, fn(&str, &str) -> bool); 2] = [
        (MatchMethod::Exact, |text, clue| text == clue),
        (MatchMethod::Containment, |text, clue| {
            !clue.is_empty() && (text.contains(clue) || clue.contains(text))
        }),
    ];
    for (method, matches) in stages {
        for (row, text) in &textual {
            if assignment.entries.contains_key(row) {
                continue;
            }
            let found = known
                .iter()
                .find(|(clue, answer)| !assignment.contains_answer(answer) && matches(text, clue));
            if let Some((_, answer)) = found {
                assignment.insert(*row, (*answer).clone(), method, None);
            }
        }
    }

    for (row, text) in &textual {
        if assignment.entries.contains_key(row) {
            continue;
        }
        let mut best: Option<(f64, &Word)> = None;
        for (clue, answer) in &known {
            if assignment.contains_answer(answer) {
                continue;
            }
            let score = jaccard(text, clue);
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, *answer));
            }
        }
        if let Some((score, answer)) = best {
            if score > config.similarity_threshold {
                assignment.insert(*row, answer.clone(), MatchMethod::Similarity, Some(score));
            }
        }
    }

    for clue in &rows {
        if assignment.entries.contains_key(&clue.row) {
            continue;
        }
        match known_middle
            .iter()
            .find(|word| !assignment.contains_answer(word))
        {
            Some(word) => assignment.insert(clue.row, word.clone(), MatchMethod::Positional, None),
            None => debug!(row = clue.row, "no answers left for positional fallback"),
        }
    }

    assignment
}
