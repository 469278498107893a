//! Swap planning between two orderings of the same words

use crate::core::Word;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One swap: `word` goes from `from` to `to`, and whatever was at `to` takes `from`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub word: Word,
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} → {}", self.word, self.from, self.to)
    }
}

/// Orderings that cannot be reconciled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Board has {current} rows but the target has {target}")]
    LengthMismatch { current: usize, target: usize },
    #[error("{word} (target position {position}) is not on the board")]
    MissingWord { word: Word, position: usize },
}

/// Selection-sort plan turning `current` into `target`
///
/// Walks target positions from the top; each mismatch is fixed by swapping the
/// wanted word up from further down. Produces at most `n - 1` moves. Words on
/// the board are compared case-insensitively.
///
/// # Errors
///
/// Returns `PlanError` if the lengths differ or a target word is absent from
/// the unfixed part of `current`.
///
/// # Examples
/// ```
/// use ladder_solver::core::words_from_slice;
/// use ladder_solver::reconcile::plan;
///
/// let target = words_from_slice(&["cog", "con", "car", "can", "dog"]);
/// let moves = plan(&["DOG", "COG", "CON", "CAN", "CAR"], &target).unwrap();
/// assert!(moves.len() <= 4);
/// ```
pub fn plan<S: AsRef<str>>(current: &[S], target: &[Word]) -> Result<Vec<Move>, PlanError> {
    if current.len() != target.len() {
        return Err(PlanError::LengthMismatch {
            current: current.len(),
            target: target.len(),
        });
    }

    let mut working: Vec<&str> = current.iter().map(|s| s.as_ref().trim()).collect();
    let mut moves = Vec::new();

    for (i, wanted) in target.iter().enumerate() {
        if wanted.matches(working[i]) {
            continue;
        }

        let found = (i + 1..working.len())
            .find(|&j| wanted.matches(working[j]))
            .ok_or_else(|| PlanError::MissingWord {
                word: wanted.clone(),
                position: i,
            })?;

        moves.push(Move {
            word: wanted.clone(),
            from: found,
            to: i,
        });
        working.swap(i, found);
    }

    Ok(moves)
}

/// Apply moves as swaps, in order
#[must_use]
pub fn apply_moves<S: AsRef<str>>(current: &[S], moves: &[Move]) -> Vec<String> {
    let mut working: Vec<String> = current.iter().map(|s| s.as_ref().to_string()).collect();
    for step in moves {
        working.swap(step.from, step.to);
    }
    working
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::words_from_slice;

    fn texts(words: &[Word]) -> Vec<String> {
        words.iter().map(|w| w.text().to_string()).collect()
    }

    #[test]
    fn reorders_example() {
        let current = ["DOG", "COG", "CON", "CAN", "CAR"];
        let target = words_from_slice(&["COG", "CON", "CAR", "CAN", "DOG"]);

        let moves = plan(&current, &target).unwrap();
        assert!(moves.len() <= current.len() - 1);
        assert_eq!(apply_moves(&current, &moves), texts(&target));
    }

    #[test]
    fn already_sorted_needs_no_moves() {
        let target = words_from_slice(&["cat", "cot", "dot"]);
        let moves = plan(&["CAT", "cot", " DOT "], &target).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn reversed_order() {
        let target = words_from_slice(&[
            "horns", "morns", "moans", "moats", "boats", "brats", "brass",
        ]);
        let mut current = texts(&target);
        current.reverse();

        let moves = plan(&current, &target).unwrap();
        assert_eq!(moves.len(), 3);
        assert_eq!(apply_moves(&current, &moves), texts(&target));
    }

    #[test]
    fn every_rotation_sorts_within_bound() {
        let target = words_from_slice(&["cat", "cot", "dot", "dog", "dig", "big"]);
        for shift in 0..target.len() {
            let mut current = texts(&target);
            current.rotate_left(shift);

            let moves = plan(&current, &target).unwrap();
            assert!(moves.len() < target.len());
            assert_eq!(apply_moves(&current, &moves), texts(&target));
        }
    }

    #[test]
    fn missing_word_is_an_error() {
        let target = words_from_slice(&["cat", "cot", "dot"]);
        let err = plan(&["CAT", "COT", ""], &target).unwrap_err();
        assert!(matches!(err, PlanError::MissingWord { position: 2, .. }));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let target = words_from_slice(&["cat", "cot", "dot"]);
        assert_eq!(
            plan(&["CAT", "COT"], &target),
            Err(PlanError::LengthMismatch {
                current: 2,
                target: 3
            })
        );
    }
}
