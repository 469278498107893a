//! Plan command
//!
//! Computes the swap plan between two orderings and checks it on paper.

use crate::core::{Word, words_from_slice};
use crate::reconcile::{Move, PlanError, apply_moves, matches_target, plan};
use serde::Serialize;

/// A plan plus the order it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    pub moves: Vec<Move>,
    pub result: Vec<String>,
    pub reaches_target: bool,
}

/// Plan `current` into `target`
///
/// Target entries that are not valid words are dropped before planning, so a
/// typo surfaces as a length mismatch.
///
/// # Errors
///
/// Returns `PlanError` if the orderings do not hold the same words.
pub fn plan_orders<S: AsRef<str>>(current: &[S], target: &[S]) -> Result<PlanResult, PlanError> {
    let target: Vec<Word> = words_from_slice(target);
    let moves = plan(current, &target)?;
    let result = apply_moves(current, &moves);
    Ok(PlanResult {
        reaches_target: matches_target(&result, &target),
        moves,
        result,
    })
}
