//! Puzzle extraction from scraped answer pages
//!
//! Pages come from third parties and change layout without notice, so every
//! piece of the puzzle is found by a list of strategies tried in priority
//! order. Any strategy may come up empty; extraction itself never fails and
//! at worst returns a mostly empty [`PuzzleData`].

mod document;
mod endpoints;
mod ladder;
mod pairs;
mod tokens;

pub use document::{Document, Element, Node, decode_entities};
pub use endpoints::{Endpoints, find_endpoints};
pub use ladder::find_ladder;
pub use pairs::collect_pairs;
pub use tokens::{dominant_length, puzzle_number, theme, tokens_of_length, uppercase_tokens};

use crate::core::{PuzzleData, SolverConfig, Word};
use crate::reconstruct::reconstruct;
use tracing::{debug, info, warn};

/// One page as seen by the strategies
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Rendered page text
    pub text: &'a str,
    /// Parsed structure, when the source was HTML
    pub document: Option<&'a Document>,
    pub config: &'a SolverConfig,
    /// Word length of this puzzle, once known
    pub word_len: Option<usize>,
}

impl Page<'_> {
    /// Whether `word` has this puzzle's word length (always true while unknown)
    #[must_use]
    pub fn fits_length(&self, word: &Word) -> bool {
        self.word_len.is_none_or(|len| word.len() == len)
    }
}

/// A cell or element text that is exactly one word, ignoring edge punctuation
pub(crate) fn as_word(text: &str) -> Option<Word> {
    Word::new(text.trim_matches(|c: char| !c.is_alphanumeric())).ok()
}

/// Parse an HTML page and extract from both its structure and its text
#[must_use]
pub fn extract_html(html: &str, config: &SolverConfig) -> PuzzleData {
    let document = Document::parse(html);
    let text = document.text();
    extract(&text, Some(&document), config)
}

/// Extract everything recoverable about a puzzle
///
/// Structure-based strategies need `document`; text-based ones work on
/// `text` alone. Endpoints that were not stated on the page are filled from
/// the ladder, and pairs are reduced to the ladder's middle words in rung
/// order once the ladder is complete.
///
/// # Examples
/// ```
/// use ladder_solver::core::SolverConfig;
/// use ladder_solver::extract::extract;
///
/// let text = "HORNS -> BRASS\nMORNS MOANS MOATS BOATS BRATS";
/// let puzzle = extract(text, None, &SolverConfig::default());
/// assert_eq!(puzzle.word_ladder.len(), 7);
/// assert_eq!(puzzle.word_ladder[1].text(), "MORNS");
/// ```
#[must_use]
pub fn extract(text: &str, document: Option<&Document>, config: &SolverConfig) -> PuzzleData {
    let len = config.ladder_length;
    let mut puzzle = PuzzleData {
        puzzle_number: puzzle_number(text),
        theme: theme(text),
        ..PuzzleData::default()
    };

    let structural = document.and_then(|doc| find_ladder(doc, len));
    let word_len = structural
        .as_ref()
        .and_then(|ladder| ladder.first())
        .map(Word::len)
        .or_else(|| dominant_length(text));
    let page = Page {
        text,
        document,
        config,
        word_len,
    };
    debug!(?word_len, structural = structural.is_some(), "page scanned");

    puzzle.clue_answer_pairs = collect_pairs(&page);
    let answers = puzzle.answers();

    let endpoints = find_endpoints(&page, &answers, structural.is_none());
    puzzle.start_word = endpoints.start;
    puzzle.end_word = endpoints.end;

    puzzle.word_ladder = match structural {
        Some(ladder) => ladder,
        None => rebuild_ladder(&page, &puzzle),
    };

    puzzle.backfill_endpoints(len);
    puzzle.validate_pairs(len);

    info!(
        number = ?puzzle.puzzle_number,
        ladder = puzzle.word_ladder.len(),
        pairs = puzzle.clue_answer_pairs.len(),
        "extraction finished"
    );
    puzzle
}

/// Ladder from the answers, then from every same-length token on the page
///
/// The second pass may return a partial chain.
fn rebuild_ladder(page: &Page<'_>, puzzle: &PuzzleData) -> Vec<Word> {
    let config = page.config;
    let len = config.ladder_length;
    let start = puzzle.start_word.as_ref();
    let end = puzzle.end_word.as_ref();
    let mut candidates = puzzle.answers();

    if let Some(found) = reconstruct(start, end, &candidates, config) {
        if found.is_complete(len) {
            debug!(method = %found.method, "ladder rebuilt from answers");
            return found.words;
        }
    }

    let Some(word_len) = page.word_len else {
        warn!("no word-shaped tokens on page");
        return Vec::new();
    };
    for token in tokens_of_length(page.text, word_len) {
        if !candidates.contains(&token) {
            candidates.push(token);
        }
    }
    candidates.truncate(config.max_candidates);

    match reconstruct(start, end, &candidates, config) {
        Some(found) if found.is_complete(len) => {
            debug!(method = %found.method, "ladder rebuilt from page tokens");
            found.words
        }
        Some(found) => {
            warn!(length = found.words.len(), "only a partial ladder could be rebuilt");
            found.words
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{is_valid_ladder, words_from_slice};

    fn texts(words: &[Word]) -> Vec<&str> {
        words.iter().map(Word::text).collect()
    }

    const LADDER: [&str; 7] = ["HORNS", "MORNS", "MOANS", "MOATS", "BOATS", "BRATS", "BRASS"];

    #[test]
    fn table_and_styled_ladder() {
        let html = r#"<html><body>
            <h1>Word Ladder #142</h1>
            <table>
              <tr><th>Clue</th><th>Answer</th></tr>
              <tr><td>Unruly children</td><td>BRATS</td></tr>
              <tr><td>Ditches around a castle</td><td>MOATS</td></tr>
              <tr><td>Early parts of the day</td><td>MORNS</td></tr>
              <tr><td>Small sailing vessels</td><td>BOATS</td></tr>
              <tr><td>Groans</td><td>MOANS</td></tr>
            </table>
            <div class="grid">
              <div class="tile">HORNS</div><div class="tile">MORNS</div>
              <div class="tile">MOANS</div><div class="tile">MOATS</div>
              <div class="tile">BOATS</div><div class="tile">BRATS</div>
              <div class="tile">BRASS</div>
            </div>
        </body></html>"#;

        let puzzle = extract_html(html, &SolverConfig::default());

        assert_eq!(puzzle.puzzle_number, Some(142));
        assert_eq!(texts(&puzzle.word_ladder), LADDER);
        let answers = puzzle.answers();
        assert_eq!(texts(&answers), &LADDER[1..6]);
        assert_eq!(puzzle.clue_answer_pairs[0].clue, "Early parts of the day");
        assert_eq!(puzzle.start_word.as_ref().map(Word::text), Some("HORNS"));
        assert_eq!(puzzle.end_word.as_ref().map(Word::text), Some("BRASS"));
    }

    #[test]
    fn text_only_page_with_arrow_and_clue_list() {
        let text = "Word Ladder #142\n\
            Theme: Brass band\n\
            HORNS → BRASS\n\
            1. Early parts of the day: MORNS\n\
            2. Groans: MOANS\n\
            3. Ditches around a castle: MOATS\n\
            4. Small sailing vessels: BOATS\n\
            5. Unruly children: BRATS";

        let puzzle = extract(text, None, &SolverConfig::default());

        assert_eq!(puzzle.theme.as_deref(), Some("Brass band"));
        assert_eq!(texts(&puzzle.word_ladder), LADDER);
        assert_eq!(texts(&puzzle.answers()), &LADDER[1..6]);
        assert_eq!(puzzle.clue_answer_pairs[4].clue, "Unruly children");
    }

    #[test]
    fn endpoints_agree_with_ladder_despite_label_prose() {
        let text = "Top-rated hints for today\n\
            HORNS → BRASS\n\
            1. Early parts of the day: MORNS\n\
            2. Groans: MOANS\n\
            3. Ditches around a castle: MOATS\n\
            4. Small sailing vessels: BOATS\n\
            5. Unruly children: BRATS";
        let puzzle = extract(text, None, &SolverConfig::default());

        assert_eq!(texts(&puzzle.word_ladder), LADDER);
        assert_eq!(puzzle.start_word.as_ref(), puzzle.word_ladder.first());
        assert_eq!(puzzle.end_word.as_ref(), puzzle.word_ladder.last());

        let html = "<p>Top-rated hints for today</p><ol>\
            <li>HORNS</li><li>MORNS</li><li>MOANS</li><li>MOATS</li>\
            <li>BOATS</li><li>BRATS</li><li>BRASS</li></ol>";
        let puzzle = extract_html(html, &SolverConfig::default());

        assert_eq!(texts(&puzzle.word_ladder), LADDER);
        assert_eq!(puzzle.start_word.as_ref().map(Word::text), Some("HORNS"));
    }

    #[test]
    fn embedded_payload_with_into_phrase() {
        let html = r#"<h1>Puzzle #7</h1><p>Turn HORNS into BRASS.</p>
            <script type="application/json">{"clues": [
                {"clue": "Unruly children", "answer": "BRATS"},
                {"clue": "Groans", "answer": "MOANS"},
                {"clue": "Small sailing vessels", "answer": "BOATS"},
                {"clue": "Early parts of the day", "answer": "MORNS"},
                {"clue": "Ditches around a castle", "answer": "MOATS"}
            ]}</script>"#;

        let puzzle = extract_html(html, &SolverConfig::default());

        assert_eq!(puzzle.puzzle_number, Some(7));
        assert_eq!(texts(&puzzle.word_ladder), LADDER);
        assert_eq!(texts(&puzzle.answers()), &LADDER[1..6]);
    }

    #[test]
    fn bare_tokens_still_chain() {
        let puzzle = extract(
            "BRATS HORNS MOATS BOATS BRASS MORNS MOANS",
            None,
            &SolverConfig::default(),
        );

        assert!(is_valid_ladder(&puzzle.word_ladder, 7));
        let ends = [
            puzzle.word_ladder[0].text(),
            puzzle.word_ladder[6].text(),
        ];
        assert!(ends == ["HORNS", "BRASS"] || ends == ["BRASS", "HORNS"]);
        assert_eq!(puzzle.start_word.as_ref(), puzzle.word_ladder.first());
    }

    #[test]
    fn bare_tokens_may_include_heading_words() {
        let puzzle = extract(
            "SCABS START SMART SLABS STARE SCARS SCARE",
            None,
            &SolverConfig::default(),
        );

        assert!(is_valid_ladder(&puzzle.word_ladder, 7));
        assert!(puzzle.word_ladder.iter().any(|word| word.text() == "START"));
    }

    #[test]
    fn no_uppercase_tokens_gives_empty_puzzle() {
        let puzzle = extract(
            "nothing to see here, just lowercase prose",
            None,
            &SolverConfig::default(),
        );

        assert!(puzzle.word_ladder.is_empty());
        assert!(puzzle.clue_answer_pairs.is_empty());
        assert_eq!(puzzle.start_word, None);
        assert_eq!(puzzle.end_word, None);
    }

    #[test]
    fn unrelated_words_give_partial_ladder() {
        let puzzle = extract("COLD CORD WARM FISH", None, &SolverConfig::default());

        assert!(!puzzle.has_complete_ladder(7));
        assert_eq!(texts(&puzzle.word_ladder), vec!["COLD", "CORD"]);
        assert_eq!(puzzle.start_word, None);
    }

    #[test]
    fn stray_answers_are_dropped_once_ladder_is_known() {
        let html = "<ol><li>HORNS<li>MORNS<li>MOANS<li>MOATS<li>BOATS<li>BRATS<li>BRASS</ol>\
            <table><tr><td>Groans</td><td>MOANS</td></tr>\
            <tr><td>A horse</td><td>STEED</td></tr></table>";

        let puzzle = extract_html(html, &SolverConfig::default());
        assert_eq!(puzzle.clue_answer_pairs.len(), 1);
        assert_eq!(puzzle.clue_answer_pairs[0].answer, words_from_slice(&["moans"])[0]);
    }
}
