//! Reconstruct command
//!
//! Orders a loose set of words into a ladder.

use crate::core::{SolverConfig, Word, WordError};
use crate::reconstruct::{Method, reconstruct};
use serde::Serialize;

/// Result of ordering a word set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconstructResult {
    pub words: Vec<Word>,
    /// `None` when nothing could be chained
    pub method: Option<Method>,
    pub complete: bool,
}

/// Parse the inputs and reconstruct a ladder from them
///
/// # Errors
///
/// Returns `WordError` if any input is not a valid word.
pub fn reconstruct_words<S: AsRef<str>>(
    start: Option<&str>,
    end: Option<&str>,
    candidates: &[S],
    config: &SolverConfig,
) -> Result<ReconstructResult, WordError> {
    let start = start.map(Word::new).transpose()?;
    let end = end.map(Word::new).transpose()?;
    let candidates = candidates
        .iter()
        .map(Word::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(
        match reconstruct(start.as_ref(), end.as_ref(), &candidates, config) {
            Some(found) => ReconstructResult {
                complete: found.is_complete(config.ladder_length),
                method: Some(found.method),
                words: found.words,
            },
            None => ReconstructResult {
                words: Vec::new(),
                method: None,
                complete: false,
            },
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_shuffled_middle() {
        let result = reconstruct_words(
            Some("horns"),
            Some("brass"),
            &["brats", "moans", "morns", "boats", "moats"],
            &SolverConfig::default(),
        )
        .unwrap();

        assert!(result.complete);
        assert_eq!(result.method, Some(Method::Search));
        assert_eq!(result.words[3].text(), "MOATS");
    }

    #[test]
    fn invalid_input_is_rejected() {
        let result = reconstruct_words(None, None, &["cog", "c0g"], &SolverConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn mixed_lengths_give_empty_result() {
        let result =
            reconstruct_words(None, None, &["cog", "horns"], &SolverConfig::default()).unwrap();
        assert!(result.words.is_empty());
        assert_eq!(result.method, None);
    }
}
