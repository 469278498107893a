//! One solve attempt against a live board
//!
//! A session runs in two phases. First every unlocked row is activated and
//! its clue read, and only then are all observations matched in one pass, so
//! an early garbled read cannot claim an answer a later row needs. Then the
//! assigned words are typed in and the rows are reconciled into ladder order.

use crate::core::{PuzzleData, SolverConfig, Word};
use crate::matcher::{Assignment, MatchMethod, MatchSummary, ObservedClue, match_clues};
use crate::reconcile::{
    Board, BoardError, BoardRow, Move, ReconcileReport, RowRef, plan, reconcile, timed,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("puzzle has no complete ladder ({0} words known)")]
    IncompleteLadder(usize),
    #[error("could not read the board")]
    Board(#[from] BoardError),
}

/// A word typed into one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    pub row: RowRef,
    pub word: Word,
    pub method: MatchMethod,
    pub ok: bool,
    pub letters_applied: usize,
}

/// Everything one session did
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub summary: MatchSummary,
    pub fills: Vec<Fill>,
    pub reconcile: ReconcileReport,
}

impl SolveReport {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.reconcile.success
    }
}

/// State of one solve attempt
///
/// Sessions share nothing; run a fresh one per attempt.
#[derive(Debug, Clone)]
pub struct SolveSession {
    config: SolverConfig,
    puzzle: PuzzleData,
    observations: Vec<ObservedClue>,
    assignment: Assignment,
    plan: Vec<Move>,
}

impl SolveSession {
    #[must_use]
    pub fn new(config: SolverConfig, puzzle: PuzzleData) -> Self {
        Self {
            config,
            puzzle,
            observations: Vec::new(),
            assignment: Assignment::default(),
            plan: Vec::new(),
        }
    }

    #[must_use]
    pub const fn puzzle(&self) -> &PuzzleData {
        &self.puzzle
    }

    /// Clue reads from the last run, one per unlocked row
    #[must_use]
    pub fn observations(&self) -> &[ObservedClue] {
        &self.observations
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Swap plan computed after filling, before reconciliation
    #[must_use]
    pub fn plan(&self) -> &[Move] {
        &self.plan
    }

    /// Observe, match, fill, then reconcile
    ///
    /// # Errors
    ///
    /// Fails before touching the board if the puzzle has no complete ladder,
    /// and if the initial arrangement cannot be read. Everything after that
    /// is reported in the [`SolveReport`] instead.
    pub async fn run<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<SolveReport, SolveError> {
        let len = self.config.ladder_length;
        if !self.puzzle.has_complete_ladder(len) {
            return Err(SolveError::IncompleteLadder(self.puzzle.word_ladder.len()));
        }
        let timeout = self.config.operation_timeout();

        let rows = timed(timeout, board.read_arrangement()).await?;
        self.observe(board, &rows).await;

        self.assignment = match_clues(
            &self.observations,
            &self.puzzle.clue_answer_pairs,
            self.puzzle.middle_words(len),
            &self.config,
        );
        let summary = self.assignment.summary(self.observations.len());
        info!(%summary, "clues matched");

        let fills = self.fill(board).await;

        let target = self.puzzle.word_ladder.clone();
        let current = match timed(timeout, board.read_arrangement()).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("board read after filling failed: {e}");
                rows
            }
        };
        let words: Vec<&str> = current.iter().map(|row| row.word.trim()).collect();
        self.plan = plan(&words, &target).unwrap_or_else(|e| {
            debug!("no initial plan, reconcile will replan: {e}");
            Vec::new()
        });

        let reconcile = reconcile(board, &target, self.plan.clone(), &self.config).await;
        Ok(SolveReport {
            summary,
            fills,
            reconcile,
        })
    }

    /// Activate each unlocked row and read its clue
    async fn observe<B: Board + ?Sized>(&mut self, board: &mut B, rows: &[BoardRow]) {
        let timeout = self.config.operation_timeout();
        self.observations.clear();

        for row in rows.iter().filter(|row| !row.locked) {
            let row_ref = row.row_ref();
            let clue = match timed(timeout, board.activate_row(row_ref)).await {
                Ok(()) => timed(timeout, board.read_active_clue(row_ref))
                    .await
                    .unwrap_or_else(|e| {
                        debug!(%row_ref, "clue read failed: {e}");
                        None
                    }),
                Err(e) => {
                    debug!(%row_ref, "activation failed: {e}");
                    None
                }
            };
            self.observations.push(match clue {
                Some(text) => ObservedClue::new(row.position, text),
                None => ObservedClue::missing(row.position),
            });
        }
    }

    /// Type every assigned answer into its row
    async fn fill<B: Board + ?Sized>(&self, board: &mut B) -> Vec<Fill> {
        let timeout = self.config.operation_timeout();
        let mut fills = Vec::with_capacity(self.assignment.len());

        for (row, entry) in self.assignment.iter() {
            let row = RowRef(row);
            let outcome = timed(timeout, board.fill_row(row, &entry.answer)).await;
            let (ok, letters_applied) = match outcome {
                Ok(outcome) => (outcome.ok, outcome.letters_applied),
                Err(e) => {
                    warn!(%row, word = %entry.answer, "fill failed: {e}");
                    (false, 0)
                }
            };
            fills.push(Fill {
                row,
                word: entry.answer.clone(),
                method: entry.method,
                ok,
                letters_applied,
            });
        }
        fills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClueAnswerPair, words_from_slice};
    use crate::reconcile::{SimRow, SimulatedBoard, TechniqueBehavior, matches_target};

    fn ladder() -> Vec<Word> {
        words_from_slice(&["horns", "morns", "moans", "moats", "boats", "brats", "brass"])
    }

    fn puzzle() -> PuzzleData {
        let ladder = ladder();
        let clues = [
            "Early parts of the day",
            "Groans",
            "Ditches around a castle",
            "Small sailing vessels",
            "Unruly children",
        ];
        PuzzleData {
            puzzle_number: Some(142),
            start_word: Some(ladder[0].clone()),
            end_word: Some(ladder[6].clone()),
            clue_answer_pairs: clues
                .iter()
                .zip(&ladder[1..6])
                .map(|(clue, answer)| ClueAnswerPair::new(*clue, answer.clone()))
                .collect(),
            word_ladder: ladder,
            theme: None,
        }
    }

    fn board(clues: [&str; 5]) -> SimulatedBoard {
        let ladder = ladder();
        let mut rows = vec![SimRow::locked(&ladder[0])];
        rows.extend(clues.into_iter().map(SimRow::blank));
        rows.push(SimRow::locked(&ladder[6]));
        SimulatedBoard::new(rows)
    }

    #[tokio::test]
    async fn solves_shuffled_blank_board() {
        let mut board = board([
            "Unruly children",
            "Groans",
            "Early parts of the day",
            "Small sailing vessels",
            "Ditches around a castle",
        ]);
        let mut session = SolveSession::new(SolverConfig::default(), puzzle());

        let report = session.run(&mut board).await.unwrap();

        assert!(report.success());
        assert!(matches_target(&board.words(), &ladder()));
        assert_eq!(report.summary.by_clue, 5);
        assert_eq!(report.fills.len(), 5);
        assert!(report.fills.iter().all(|fill| fill.ok && fill.letters_applied == 5));
        assert_eq!(session.observations().len(), 5);
        assert!(session.plan().len() <= 4);
    }

    #[tokio::test]
    async fn garbled_clue_falls_back_to_position() {
        let mut board = board([
            "Unruly children",
            "Error: failed to load clue",
            "Early parts of the day",
            "Small sailing vessels",
            "Ditches around a castle",
        ]);
        let mut session = SolveSession::new(SolverConfig::default(), puzzle());

        let report = session.run(&mut board).await.unwrap();

        assert!(report.success());
        assert_eq!(report.summary.by_clue, 4);
        assert_eq!(report.summary.positional, 1);
        assert_eq!(session.assignment().get(2), Some(&ladder()[2]));
    }

    #[tokio::test]
    async fn incomplete_ladder_is_rejected_up_front() {
        let mut puzzle = puzzle();
        puzzle.word_ladder.truncate(3);
        let mut board = board(["a clue", "b clue", "c clue", "d clue", "e clue"]);
        let mut session = SolveSession::new(SolverConfig::default(), puzzle);

        let err = session.run(&mut board).await.unwrap_err();
        assert!(matches!(err, SolveError::IncompleteLadder(3)));
        assert_eq!(board.reads(), 0);
    }

    #[tokio::test]
    async fn flaky_relocation_still_converges() {
        let mut board = board([
            "Small sailing vessels",
            "Unruly children",
            "Ditches around a castle",
            "Groans",
            "Early parts of the day",
        ])
        .with_techniques(vec![TechniqueBehavior::Fail, TechniqueBehavior::Succeed]);
        let mut session = SolveSession::new(SolverConfig::default(), puzzle());

        let report = session.run(&mut board).await.unwrap();
        assert!(report.success());
        assert!(report.reconcile.attempts.iter().all(|a| a.techniques.len() == 2));
    }
}
