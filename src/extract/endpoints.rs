//! Start and end word strategies
//!
//! Explicit strategies run first and each may supply either endpoint. Only
//! when something is still missing do we fall back to elimination, which tries
//! leftover tokens as endpoints until one pair chains through the answers.

use super::document::Document;
use super::tokens::tokens_of_length;
use super::{Page, as_word};
use crate::core::Word;
use crate::reconstruct::reconstruct_strict;
use itertools::Itertools;
use rayon::prelude::*;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Endpoints found so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub start: Option<Word>,
    pub end: Option<Word>,
}

impl Endpoints {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Take whichever endpoints are still missing from `other`
    fn fill_from(&mut self, other: Self) {
        if self.start.is_none() {
            self.start = other.start;
        }
        if self.end.is_none() {
            self.end = other.end;
        }
    }
}

type EndpointStrategy = fn(&Page<'_>) -> Endpoints;

/// Explicit endpoint strategies in priority order
const ENDPOINT_STRATEGIES: &[(&str, EndpointStrategy)] = &[
    ("structural labels", labelled_cells),
    ("label text", label_text),
    ("arrow", arrow),
    ("into", into_phrase),
];

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(top|bottom|start|end|starting|ending|first|last)(?:\s+word)?\s*:?$")
        .expect("bad regex")
});

static TOP_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:\b(?:top|start(?:ing)?)(?:\s+word)?)\s*[:=]\s*([A-Z]{3,7})\b")
        .expect("bad regex")
});

static BOTTOM_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:\b(?:bottom|end(?:ing)?)(?:\s+word)?)\s*[:=]\s*([A-Z]{3,7})\b")
        .expect("bad regex")
});

static ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{3,7})\s*(?:→|⟶|➜|->|=>|—>)\s*([A-Z]{3,7})\b").expect("bad regex")
});

static INTO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{3,7})\s+(?i:into)\s+([A-Z]{3,7})\b").expect("bad regex")
});

/// Endpoints from explicit page cues, then elimination against `answers`
///
/// Elimination is skipped when `eliminate` is false, for callers that
/// already hold a verified ladder.
#[must_use]
pub fn find_endpoints(page: &Page<'_>, answers: &[Word], eliminate: bool) -> Endpoints {
    let mut found = Endpoints::default();
    for (name, strategy) in ENDPOINT_STRATEGIES {
        if found.is_complete() {
            break;
        }
        let before = found.clone();
        found.fill_from(strategy(page));
        if found != before {
            debug!(strategy = name, start = ?found.start, end = ?found.end, "endpoints updated");
        }
    }

    if eliminate && !found.is_complete() {
        if let Some((start, end)) = eliminate_endpoints(page, answers, &found) {
            debug!(%start, %end, "endpoints found by elimination");
            found.fill_from(Endpoints {
                start: Some(start),
                end: Some(end),
            });
        }
    }

    found
}

/// `Top`/`Bottom` labels in one element with the word in the next sibling
fn labelled_cells(page: &Page<'_>) -> Endpoints {
    let Some(document) = page.document else {
        return Endpoints::default();
    };

    let mut found = Endpoints::default();
    for (label, word) in labelled_pairs(document) {
        let word = Some(word).filter(|w| page.fits_length(w));
        match label.as_str() {
            "top" | "start" | "starting" | "first" => {
                found.fill_from(Endpoints { start: word, end: None });
            }
            _ => found.fill_from(Endpoints { start: None, end: word }),
        }
    }
    found
}

fn labelled_pairs(document: &Document) -> Vec<(String, Word)> {
    document
        .elements()
        .into_iter()
        .flat_map(|parent| {
            parent
                .child_elements()
                .tuple_windows()
                .filter_map(|(label, value)| {
                    let text = label.text();
                    let caps = LABEL.captures(text.trim())?;
                    let word = as_word(&value.text())?;
                    Some((caps[1].to_ascii_lowercase(), word))
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// `Top: WORD` and `Bottom: WORD` in running text
fn label_text(page: &Page<'_>) -> Endpoints {
    let first = |pattern: &Regex| {
        pattern
            .captures_iter(page.text)
            .filter_map(|caps| Word::new(&caps[1]).ok())
            .find(|word| page.fits_length(word))
    };
    Endpoints {
        start: first(&TOP_TEXT),
        end: first(&BOTTOM_TEXT),
    }
}

/// `WORD → WORD`, also written with `->` or `=>`
fn arrow(page: &Page<'_>) -> Endpoints {
    pattern_pair(&ARROW, page)
}

/// `WORD into WORD`
fn into_phrase(page: &Page<'_>) -> Endpoints {
    pattern_pair(&INTO, page)
}

fn pattern_pair(pattern: &Regex, page: &Page<'_>) -> Endpoints {
    pattern
        .captures_iter(page.text)
        .find_map(|caps| {
            let start = Word::new(&caps[1]).ok()?;
            let end = Word::new(&caps[2]).ok()?;
            (start.len() == end.len() && start != end && page.fits_length(&start)).then_some(
                Endpoints {
                    start: Some(start),
                    end: Some(end),
                },
            )
        })
        .unwrap_or_default()
}

/// Try leftover tokens as endpoints until a pair chains through `answers`
///
/// Known endpoints stay fixed. Pairs are tried in token order and the first
/// success in that order wins, whatever order the workers finish in. With
/// both ends free a ladder reads equally well backwards, so it is oriented to
/// put the first answer next to the start.
fn eliminate_endpoints(
    page: &Page<'_>,
    answers: &[Word],
    known: &Endpoints,
) -> Option<(Word, Word)> {
    let config = page.config;
    if answers.len() < config.middle_count() {
        return None;
    }
    let len = page.word_len.or_else(|| answers.first().map(Word::len))?;

    let leftovers: Vec<Word> = tokens_of_length(page.text, len)
        .into_iter()
        .filter(|token| !answers.contains(token))
        .take(config.max_candidates)
        .collect();

    let pairs: Vec<(&Word, &Word)> = match (&known.start, &known.end) {
        (None, None) => leftovers.iter().tuple_combinations().collect(),
        (start, end) => {
            let starts = fixed_or_all(start.as_ref(), &leftovers);
            let ends = fixed_or_all(end.as_ref(), &leftovers);
            starts
                .iter()
                .cartesian_product(&ends)
                .map(|(start, end)| (*start, *end))
                .filter(|(start, end)| start != end)
                .collect()
        }
    };

    let (start, end, path) = pairs.par_iter().find_map_first(|(start, end)| {
        reconstruct_strict(start, end, answers, config).map(|path| (*start, *end, path))
    })?;

    let reversed = known.start.is_none()
        && known.end.is_none()
        && path.get(1) != answers.first()
        && path.iter().rev().nth(1) == answers.first();
    if reversed {
        Some((end.clone(), start.clone()))
    } else {
        Some((start.clone(), end.clone()))
    }
}

fn fixed_or_all<'a>(fixed: Option<&'a Word>, all: &'a [Word]) -> Vec<&'a Word> {
    fixed.map_or_else(|| all.iter().collect(), |word| vec![word])
}
