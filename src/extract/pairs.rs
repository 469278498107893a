//! Clue-answer pair strategies
//!
//! Each strategy is a pure function over the page. They run in priority order
//! and accumulate, but later strategies are only consulted while fewer than
//! `target_pair_count` pairs are known.

use super::document::Element;
use super::tokens::{is_label_word, uppercase_tokens};
use super::{Page, as_word};
use crate::core::{ClueAnswerPair, Word};
use crate::matcher::normalize;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

type PairStrategy = fn(&Page<'_>) -> Vec<ClueAnswerPair>;

/// Pair strategies in priority order
const PAIR_STRATEGIES: &[(&str, PairStrategy)] = &[
    ("structured data", structured_pairs),
    ("table", table_pairs),
    ("proximity", proximity_pairs),
];

const CLUE_KEYS: &[&str] = &["clue", "hint", "question", "prompt", "name"];
const ANSWER_KEYS: &[&str] = &["answer", "word", "solution"];

/// Text that labels a word rather than describing it
const LABELS: &[&str] = &[
    "top", "bottom", "start", "end", "answer", "answers", "solution", "top word", "bottom word",
    "start word", "end word", "starting word", "ending word", "the answer is", "word",
];

static LEADING_ENUMERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\d.)\]#:*•·\-–—]+").expect("bad regex"));

static ANSWER_SHAPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,7}\b").expect("bad regex"));

/// Run pair strategies until enough pairs are known
///
/// Duplicate answers are dropped; the first clue seen for an answer wins.
#[must_use]
pub fn collect_pairs(page: &Page<'_>) -> Vec<ClueAnswerPair> {
    let mut pairs: Vec<ClueAnswerPair> = Vec::new();
    let mut seen: FxHashSet<Word> = FxHashSet::default();

    for (name, strategy) in PAIR_STRATEGIES {
        if pairs.len() >= page.config.target_pair_count {
            break;
        }
        let found = strategy(page);
        let before = pairs.len();
        for pair in found {
            if page.fits_length(&pair.answer) && seen.insert(pair.answer.clone()) {
                pairs.push(pair);
            }
        }
        debug!(strategy = name, added = pairs.len() - before, "pair strategy done");
    }

    pairs
}

/// Pairs from JSON payloads embedded in `<script>` elements
fn structured_pairs(page: &Page<'_>) -> Vec<ClueAnswerPair> {
    let Some(document) = page.document else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for script in document.by_tag("script") {
        let is_json = script
            .attr("type")
            .is_some_and(|kind| kind.to_ascii_lowercase().contains("json"))
            || script.attr("id") == Some("__NEXT_DATA__");
        if !is_json {
            continue;
        }
        match serde_json::from_str::<Value>(script.raw_text().trim()) {
            Ok(value) => walk_json(&value, &mut pairs),
            Err(e) => debug!("unparseable embedded payload: {e}"),
        }
    }
    pairs
}

fn walk_json(value: &Value, out: &mut Vec<ClueAnswerPair>) {
    match value {
        Value::Object(map) => {
            let lookup = |keys: &[&str]| {
                map.iter()
                    .filter(|(key, _)| keys.contains(&key.to_ascii_lowercase().as_str()))
                    .find_map(|(_, value)| value.as_str())
            };
            let answer = lookup(ANSWER_KEYS).or_else(|| {
                map.get("acceptedAnswer")
                    .and_then(|accepted| accepted.get("text"))
                    .and_then(Value::as_str)
            });
            if let (Some(clue), Some(answer)) = (lookup(CLUE_KEYS), answer) {
                if let Some(word) = as_word(answer) {
                    out.push(ClueAnswerPair::new(clue.trim(), word));
                }
            }
            for child in map.values() {
                walk_json(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_json(item, out);
            }
        }
        _ => {}
    }
}

/// Pairs from two-cell table rows
fn table_pairs(page: &Page<'_>) -> Vec<ClueAnswerPair> {
    let Some(document) = page.document else {
        return Vec::new();
    };

    document
        .by_tag("tr")
        .into_iter()
        .filter_map(|row| {
            let cells: Vec<&Element> = row
                .child_elements()
                .filter(|cell| matches!(cell.tag.as_str(), "td" | "th"))
                .collect();
            if cells.len() != 2 || cells.iter().all(|cell| cell.tag == "th") {
                return None;
            }
            split_cells(&cells[0].text(), &cells[1].text())
        })
        .collect()
}

/// Decide which of two cells is the answer
///
/// The second cell wins when both look like single words, unless only the
/// first is written in capitals.
fn split_cells(first: &str, second: &str) -> Option<ClueAnswerPair> {
    let answer_like = |text: &str| as_word(text).filter(|word| !is_label_word(word.text()));
    let is_caps = |text: &str| text.trim().chars().all(|c| !c.is_lowercase());

    let (clue, answer) = match (answer_like(first), answer_like(second)) {
        (Some(word), Some(_)) if is_caps(first) && !is_caps(second) => (second, word),
        (_, Some(word)) => (first, word),
        (Some(word), None) => (second, word),
        (None, None) => return None,
    };

    let clue = clean_clue(clue)?;
    Some(ClueAnswerPair::new(clue, answer))
}

/// Uppercase tokens paired with the descriptive text just before them
fn proximity_pairs(page: &Page<'_>) -> Vec<ClueAnswerPair> {
    let text = page.text;
    uppercase_tokens(text)
        .filter_map(|(offset, token)| {
            let word = Word::new(token).ok()?;
            if !page.fits_length(&word) {
                return None;
            }
            let mut start = offset.saturating_sub(page.config.proximity_window);
            while !text.is_char_boundary(start) {
                start += 1;
            }
            let clue = clue_before(&text[start..offset])?;
            Some(ClueAnswerPair::new(clue, word))
        })
        .collect()
}

/// The descriptive segment closest to the end of `window`
///
/// Looks at the last line with content, drops anything up to and including an
/// earlier answer-shaped token on that line, and rejects bare labels.
fn clue_before(window: &str) -> Option<String> {
    let line = window
        .trim_end_matches(|c: char| c.is_whitespace() || ":=-–—→(".contains(c))
        .lines()
        .next_back()?;
    let segment = ANSWER_SHAPED
        .find_iter(line)
        .last()
        .map_or(line, |m| &line[m.end()..]);
    clean_clue(segment)
}

/// Trim enumeration and separators; `None` unless the text is descriptive
fn clean_clue(text: &str) -> Option<String> {
    let trimmed = LEADING_ENUMERATION
        .replace(text.trim(), "")
        .trim_end_matches(|c: char| c.is_whitespace() || ":=-–—→(".contains(c))
        .trim()
        .to_string();

    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    let has_lowercase = trimmed.chars().any(char::is_lowercase);
    if letters < 3 || !has_lowercase || LABELS.contains(&normalize(&trimmed).as_str()) {
        return None;
    }
    Some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SolverConfig;
    use crate::extract::Document;

    fn page<'a>(
        text: &'a str,
        document: Option<&'a Document>,
        config: &'a SolverConfig,
    ) -> Page<'a> {
        Page {
            text,
            document,
            config,
            word_len: Some(5),
        }
    }

    fn answers(pairs: &[ClueAnswerPair]) -> Vec<&str> {
        pairs.iter().map(|p| p.answer.text()).collect()
    }

    #[test]
    fn structured_payload_pairs() {
        let html = r#"<script type="application/ld+json">
            {"@type": "FAQPage", "mainEntity": [
                {"@type": "Question", "name": "Early parts of the day",
                 "acceptedAnswer": {"@type": "Answer", "text": "MORNS"}},
                {"clue": "Groans", "answer": "moans"},
                {"clue": "Too long", "answer": "SEVERALWORDS HERE"}
            ]}
        </script>"#;
        let doc = Document::parse(html);
        let config = SolverConfig::default();
        let pairs = structured_pairs(&page("", Some(&doc), &config));

        assert_eq!(answers(&pairs), vec!["MORNS", "MOANS"]);
        assert_eq!(pairs[0].clue, "Early parts of the day");
    }

    #[test]
    fn broken_payload_is_skipped() {
        let doc = Document::parse(r#"<script type="application/json">{"clue": </script>"#);
        let config = SolverConfig::default();
        assert!(structured_pairs(&page("", Some(&doc), &config)).is_empty());
    }

    #[test]
    fn table_rows_either_orientation() {
        let html = "<table>\
            <tr><th>Clue</th><th>Answer</th></tr>\
            <tr><td>Ditches around a castle</td><td>MOATS</td></tr>\
            <tr><td>BOATS</td><td>Small sailing vessels</td></tr>\
            <tr><td>Only</td></tr>\
            </table>";
        let doc = Document::parse(html);
        let config = SolverConfig::default();
        let pairs = table_pairs(&page("", Some(&doc), &config));

        assert_eq!(answers(&pairs), vec!["MOATS", "BOATS"]);
        assert_eq!(pairs[1].clue, "Small sailing vessels");
    }

    #[test]
    fn proximity_finds_preceding_clue() {
        let text = "Here are today's answers.\n\
            1. Unruly children: BRATS\n\
            2. Groans - MOANS\n\
            Top: HORNS";
        let config = SolverConfig::default();
        let pairs = proximity_pairs(&page(text, None, &config));

        assert_eq!(answers(&pairs), vec!["BRATS", "MOANS"]);
        assert_eq!(pairs[0].clue, "Unruly children");
        assert_eq!(pairs[1].clue, "Groans");
    }

    #[test]
    fn proximity_splits_same_line_pairs() {
        let text = "Unruly children BRATS Ditches around a castle MOATS";
        let config = SolverConfig::default();
        let pairs = proximity_pairs(&page(text, None, &config));

        assert_eq!(answers(&pairs), vec!["BRATS", "MOATS"]);
        assert_eq!(pairs[1].clue, "Ditches around a castle");
    }

    #[test]
    fn accumulation_stops_at_target() {
        let html = "<table>\
            <tr><td>Early parts of the day</td><td>MORNS</td></tr>\
            <tr><td>Groans</td><td>MOANS</td></tr>\
            <tr><td>Ditches around a castle</td><td>MOATS</td></tr>\
            <tr><td>Small sailing vessels</td><td>BOATS</td></tr>\
            <tr><td>Unruly children</td><td>BRATS</td></tr>\
            </table>";
        let doc = Document::parse(html);
        let text = "Something extra: HORSE";
        let config = SolverConfig::default();
        let pairs = collect_pairs(&page(text, Some(&doc), &config));

        assert_eq!(pairs.len(), 5);
        assert!(!answers(&pairs).contains(&"HORSE"));
    }

    #[test]
    fn accumulation_continues_below_target_and_dedups() {
        let doc = Document::parse(
            "<table><tr><td>Groans</td><td>MOANS</td></tr></table>",
        );
        let text = "Groans again: MOANS\nUnruly children: BRATS";
        let config = SolverConfig::default();
        let pairs = collect_pairs(&page(text, Some(&doc), &config));

        assert_eq!(answers(&pairs), vec!["MOANS", "BRATS"]);
    }

    #[test]
    fn labels_are_not_clues() {
        assert_eq!(clue_before("Top: "), None);
        assert_eq!(clue_before("Bottom word - "), None);
        assert_eq!(clue_before("The answer is "), None);
        assert_eq!(clue_before("A sly look: ").as_deref(), Some("A sly look"));
    }
}
