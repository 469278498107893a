//! Driving a swap plan against an unreliable board
//!
//! Nothing from the precomputed plan is trusted blindly: the board is re-read
//! before every move and after every relocation attempt, row references are
//! recomputed from the fresh read, and the plan is rebuilt from the latest
//! read once it runs out.

use super::board::{Board, BoardError, BoardRow, RowRef, Technique};
use super::plan::{Move, PlanError, plan};
use crate::core::{SolverConfig, Word};
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One relocation the reconciler tried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub word: Word,
    pub source: RowRef,
    pub dest: RowRef,
    /// Techniques tried, in order
    pub techniques: Vec<Technique>,
    /// Whether the last technique produced an observable change
    pub changed: bool,
}

/// Outcome of a reconcile run
///
/// Failure is a normal outcome: the board stays in its best-reached state and
/// the last observed order is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub success: bool,
    pub iterations: usize,
    pub attempts: Vec<Attempt>,
    pub last_observed: Vec<String>,
    pub expected: Vec<Word>,
    /// Set when the board could not be planned against at all
    pub plan_error: Option<PlanError>,
}

impl ReconcileReport {
    /// Rows already holding their target word
    #[must_use]
    pub fn rows_in_place(&self) -> usize {
        self.expected
            .iter()
            .zip(&self.last_observed)
            .filter(|(want, seen)| want.matches(seen))
            .count()
    }
}

/// Run a board operation under the configured timeout
///
/// A timeout surfaces as [`BoardError::Timeout`], which callers treat like any
/// other failed operation.
pub async fn timed<T>(
    timeout: Duration,
    operation: impl Future<Output = Result<T, BoardError>>,
) -> Result<T, BoardError> {
    tokio::time::timeout(timeout, operation)
        .await
        .unwrap_or(Err(BoardError::Timeout))
}

/// Whether observed row words spell out `target` exactly
#[must_use]
pub fn matches_target<S: AsRef<str>>(observed: &[S], target: &[Word]) -> bool {
    observed.len() == target.len()
        && target
            .iter()
            .zip(observed)
            .all(|(want, seen)| want.matches(seen.as_ref()))
}

fn row_words(rows: &[BoardRow]) -> Vec<String> {
    rows.iter().map(|row| row.word.trim().to_uppercase()).collect()
}

/// Drive `board` toward `target`, starting from `initial_plan`
///
/// Runs at most `target.len() + reconcile_slack` iterations. Each iteration
/// reads the board, stops if it already matches, then takes the next planned
/// move that is still needed and tries every relocation technique in priority
/// order until one changes what the board shows. Move `k + 1` is never
/// started before the verification read of move `k` completes.
pub async fn reconcile<B: Board + ?Sized>(
    board: &mut B,
    target: &[Word],
    initial_plan: Vec<Move>,
    config: &SolverConfig,
) -> ReconcileReport {
    let timeout = config.operation_timeout();
    let max_iterations = target.len() + config.reconcile_slack;
    let mut pending: VecDeque<Move> = initial_plan.into();

    let mut report = ReconcileReport {
        success: false,
        iterations: 0,
        attempts: Vec::new(),
        last_observed: Vec::new(),
        expected: target.to_vec(),
        plan_error: None,
    };

    for iteration in 1..=max_iterations {
        report.iterations = iteration;

        let rows = match timed(timeout, board.read_arrangement()).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(iteration, "board read failed: {e}");
                continue;
            }
        };
        report.last_observed = row_words(&rows);

        if matches_target(&report.last_observed, target) {
            report.success = true;
            break;
        }

        let Some(step) = next_move(
            &mut pending,
            &report.last_observed,
            target,
            &mut report.plan_error,
        ) else {
            break;
        };

        // Row references come from this read, not from the plan
        let source = rows
            .iter()
            .enumerate()
            .find(|(i, row)| *i != step.to && step.word.matches(&row.word))
            .map(|(i, _)| i);
        let (Some(source), Some(dest_row)) = (source, rows.get(step.to)) else {
            debug!(word = %step.word, "planned move is stale, replanning");
            pending.clear();
            continue;
        };
        let source_row = &rows[source];
        if source_row.locked || dest_row.locked {
            warn!(word = %step.word, "move touches a locked row, skipping");
            continue;
        }

        let attempt = relocate(
            board,
            &step.word,
            source_row.row_ref(),
            dest_row.row_ref(),
            timeout,
            &mut report,
            target,
        )
        .await;
        report.attempts.push(attempt);

        if report.success {
            break;
        }
    }

    if report.success {
        info!(
            iterations = report.iterations,
            attempts = report.attempts.len(),
            "board matches target"
        );
    } else {
        warn!(
            iterations = report.iterations,
            in_place = report.rows_in_place(),
            expected = ?report.expected.iter().map(Word::text).collect::<Vec<_>>(),
            observed = ?report.last_observed,
            "board did not reach target"
        );
    }

    report
}

/// Next queued move still needed on the current board, replanning when the queue runs dry
fn next_move(
    pending: &mut VecDeque<Move>,
    observed: &[String],
    target: &[Word],
    plan_error: &mut Option<PlanError>,
) -> Option<Move> {
    while let Some(step) = pending.pop_front() {
        let satisfied = observed
            .get(step.to)
            .is_some_and(|seen| step.word.matches(seen));
        if !satisfied {
            return Some(step);
        }
    }

    match plan(observed, target) {
        Ok(moves) => {
            debug!(moves = moves.len(), "replanned from fresh read");
            pending.extend(moves);
            pending.pop_front()
        }
        Err(e) => {
            warn!("cannot plan against board: {e}");
            *plan_error = Some(e);
            None
        }
    }
}

/// Try each technique until one visibly changes the board
async fn relocate<B: Board + ?Sized>(
    board: &mut B,
    word: &Word,
    source: RowRef,
    dest: RowRef,
    timeout: Duration,
    report: &mut ReconcileReport,
    target: &[Word],
) -> Attempt {
    let before = report.last_observed.clone();
    let mut attempt = Attempt {
        word: word.clone(),
        source,
        dest,
        techniques: Vec::new(),
        changed: false,
    };

    for index in 0..board.technique_count().max(1) {
        let technique = Technique(index);
        attempt.techniques.push(technique);

        let claimed = match timed(timeout, board.attempt_relocate(source, dest, technique)).await {
            Ok(claimed) => claimed,
            Err(e) => {
                debug!(%word, %technique, "relocation failed: {e}");
                false
            }
        };

        match timed(timeout, board.read_arrangement()).await {
            Ok(rows) => report.last_observed = row_words(&rows),
            Err(e) => {
                warn!(%word, %technique, "verification read failed: {e}");
                continue;
            }
        }

        if matches_target(&report.last_observed, target) {
            report.success = true;
            attempt.changed = true;
            return attempt;
        }

        if report.last_observed != before {
            debug!(%word, %source, %dest, %technique, claimed, "relocation took effect");
            attempt.changed = true;
            return attempt;
        }

        debug!(%word, %technique, claimed, "no observable change");
    }

    attempt
}
