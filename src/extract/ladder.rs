//! Ladder strategies over the page structure
//!
//! Every strategy yields groups of raw words in document order. A group only
//! counts once [`find_ladder_window`] verifies a full chain inside it.

use super::as_word;
use super::document::{Document, Element};
use crate::core::{Word, find_ladder_window};
use rustc_hash::FxHashSet;
use tracing::debug;

type LadderStrategy = fn(&Document, usize) -> Vec<Vec<Word>>;

/// Ladder strategies in priority order
const LADDER_STRATEGIES: &[(&str, LadderStrategy)] = &[
    ("word container", container_groups),
    ("ladder markers", marker_groups),
    ("decorated cells", decorated_groups),
    ("emphasis", emphasis_groups),
];

const MARKERS: &[&str] = &["ladder", "rung", "step"];
const DECORATIONS: &[&str] = &["border", "box", "tile"];
const EMPHASIS_TAGS: &[&str] = &["strong", "b", "em", "mark"];

/// First verified ladder of `len` words found in the page structure
#[must_use]
pub fn find_ladder(document: &Document, len: usize) -> Option<Vec<Word>> {
    LADDER_STRATEGIES.iter().find_map(|(name, strategy)| {
        let ladder = strategy(document, len)
            .iter()
            .find_map(|group| find_ladder_window(group, len))?;
        debug!(strategy = name, "ladder verified");
        Some(ladder)
    })
}

/// Elements whose element children are all single words
fn container_groups(document: &Document, len: usize) -> Vec<Vec<Word>> {
    document
        .elements()
        .into_iter()
        .filter(|element| element.child_elements().count() >= len)
        .filter_map(|element| {
            element
                .child_elements()
                .map(|child| as_word(&child.text()))
                .collect::<Option<Vec<Word>>>()
        })
        .collect()
}

/// Words under elements whose class or id names a ladder, rung or step
fn marker_groups(document: &Document, _len: usize) -> Vec<Vec<Word>> {
    let marked = document
        .elements()
        .into_iter()
        .filter(|element| MARKERS.iter().any(|marker| element.has_marker(marker)));
    vec![words_within(marked)]
}

/// Words in bordered, boxed or tiled cells
fn decorated_groups(document: &Document, _len: usize) -> Vec<Vec<Word>> {
    let decorated = document.elements().into_iter().filter(|element| {
        element
            .attr("style")
            .is_some_and(|style| style.to_ascii_lowercase().contains("border"))
            || DECORATIONS.iter().any(|marker| element.has_marker(marker))
    });
    vec![words_within(decorated)]
}

/// Words set in bold or otherwise emphasised
fn emphasis_groups(document: &Document, _len: usize) -> Vec<Vec<Word>> {
    let emphasised = document
        .elements()
        .into_iter()
        .filter(|element| EMPHASIS_TAGS.contains(&element.tag.as_str()));
    vec![words_within(emphasised)]
}

/// Single-word texts of the given elements, or of their descendants when an
/// element holds more than one word
///
/// Nested matches repeat the same word, so duplicates are dropped.
fn words_within<'a>(elements: impl Iterator<Item = &'a Element>) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    let mut words = Vec::new();
    for element in elements {
        let found: Vec<Word> = match as_word(&element.text()) {
            Some(word) => vec![word],
            None => element
                .descendants()
                .into_iter()
                .filter_map(|inner| as_word(&inner.text()))
                .collect(),
        };
        words.extend(found.into_iter().filter(|word| seen.insert(word.clone())));
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(words: &[Word]) -> Vec<&str> {
        words.iter().map(Word::text).collect()
    }

    const LADDER: [&str; 7] = ["HORNS", "MORNS", "MOANS", "MOATS", "BOATS", "BRATS", "BRASS"];

    #[test]
    fn plain_list_container() {
        let html = format!(
            "<p>Intro</p><ol>{}</ol>",
            LADDER.map(|w| format!("<li>{w}</li>")).concat()
        );
        let doc = Document::parse(&html);
        assert_eq!(texts(&find_ladder(&doc, 7).unwrap()), LADDER);
    }

    #[test]
    fn container_with_noise_rows_is_windowed() {
        let html = format!(
            "<div><span>CAT</span>{}<span>DOG</span></div>",
            LADDER.map(|w| format!("<span>{w}</span>")).concat()
        );
        let doc = Document::parse(&html);
        assert_eq!(texts(&find_ladder(&doc, 7).unwrap()), LADDER);
    }

    #[test]
    fn rung_markers_with_nested_words() {
        let html = format!(
            "<section id=word-ladder><h2>Today's answer</h2>{}</section>",
            LADDER
                .map(|w| format!("<div class=rung><span class=rung-word>{w}</span> (5)</div>"))
                .concat()
        );
        let doc = Document::parse(&html);
        assert_eq!(texts(&find_ladder(&doc, 7).unwrap()), LADDER);
    }

    #[test]
    fn bordered_cells() {
        let html = format!(
            "<p>{}</p>",
            LADDER
                .map(|w| format!("<span style=\"border: 1px solid\">{w}</span> "))
                .concat()
        );
        let doc = Document::parse(&html);
        assert_eq!(texts(&find_ladder(&doc, 7).unwrap()), LADDER);
    }

    #[test]
    fn bold_words_in_prose() {
        let html = "<p>Start at <b>HORNS</b>, then <b>MORNS</b> and <b>MOANS</b>.</p>\
            <p><strong>MOATS</strong> becomes <strong>BOATS</strong>, \
            <strong>BRATS</strong>, and finally <em>BRASS</em>.</p>";
        let doc = Document::parse(html);
        assert_eq!(texts(&find_ladder(&doc, 7).unwrap()), LADDER);
    }

    #[test]
    fn unchained_words_are_rejected() {
        let html = "<ul><li>COLD</li><li>WARM</li><li>FISH</li><li>BIRD</li>\
            <li>TREE</li><li>LAMP</li><li>DESK</li></ul>";
        let doc = Document::parse(html);
        assert_eq!(find_ladder(&doc, 7), None);
    }
}
