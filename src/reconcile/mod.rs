//! Move planning and board reconciliation
//!
//! [`plan`] computes a minimal swap sequence between two orderings;
//! [`reconcile`] drives it against a [`Board`], verifying every step.

mod board;
mod plan;
mod reconciler;
mod simulated;

pub use board::{Board, BoardError, BoardRow, FillOutcome, RowRef, Technique};
pub use plan::{Move, PlanError, apply_moves, plan};
pub use reconciler::{Attempt, ReconcileReport, matches_target, reconcile, timed};
pub use simulated::{SimRow, SimulatedBoard, TechniqueBehavior};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SolverConfig, Word, words_from_slice};
    use std::time::Duration;

    fn ladder() -> Vec<Word> {
        words_from_slice(&["horns", "morns", "moans", "moats", "boats", "brats", "brass"])
    }

    fn shuffled() -> Vec<Word> {
        words_from_slice(&["horns", "brats", "moats", "morns", "boats", "moans", "brass"])
    }

    async fn run(board: &mut SimulatedBoard, config: &SolverConfig) -> ReconcileReport {
        let target = ladder();
        let initial = plan(&board.words(), &target).unwrap();
        reconcile(board, &target, initial, config).await
    }

    #[tokio::test]
    async fn reaches_target_with_reliable_board() {
        let mut board = SimulatedBoard::from_words(&shuffled()).with_locked_ends();
        let report = run(&mut board, &SolverConfig::default()).await;

        assert!(report.success);
        assert!(matches_target(&board.words(), &ladder()));
        assert!(board.relocations() <= ladder().len() - 1);
        assert!(report.plan_error.is_none());
    }

    #[tokio::test]
    async fn already_solved_board_is_untouched() {
        let mut board = SimulatedBoard::from_words(&ladder());
        let report = run(&mut board, &SolverConfig::default()).await;

        assert!(report.success);
        assert_eq!(report.iterations, 1);
        assert!(report.attempts.is_empty());
        assert_eq!(board.relocations(), 0);
    }

    #[tokio::test]
    async fn falls_through_to_second_technique() {
        let mut board = SimulatedBoard::from_words(&shuffled())
            .with_techniques(vec![TechniqueBehavior::Fail, TechniqueBehavior::Succeed]);
        let config = SolverConfig::default();
        let report = run(&mut board, &config).await;

        assert!(report.success);
        assert!(report.iterations <= config.max_iterations());
        for attempt in &report.attempts {
            assert_eq!(attempt.techniques, vec![Technique(0), Technique(1)]);
            assert!(attempt.changed);
        }
    }

    #[tokio::test]
    async fn board_that_lies_is_not_trusted() {
        let mut board = SimulatedBoard::from_words(&shuffled())
            .with_techniques(vec![TechniqueBehavior::Ignore, TechniqueBehavior::Succeed]);
        let report = run(&mut board, &SolverConfig::default()).await;

        assert!(report.success);
        assert!(report.attempts.iter().all(|a| a.techniques.len() == 2));
    }

    #[tokio::test]
    async fn stalled_technique_times_out() {
        let config = SolverConfig {
            operation_timeout_ms: 20,
            ..SolverConfig::default()
        };
        let mut board = SimulatedBoard::from_words(&shuffled()).with_techniques(vec![
            TechniqueBehavior::Stall(Duration::from_secs(5)),
            TechniqueBehavior::Succeed,
        ]);
        let report = run(&mut board, &config).await;

        assert!(report.success);
    }

    #[tokio::test]
    async fn intermittent_technique_recovers_by_replanning() {
        let mut board = SimulatedBoard::from_words(&shuffled())
            .with_techniques(vec![TechniqueBehavior::FailTimes(2)]);
        let report = run(&mut board, &SolverConfig::default()).await;

        assert!(report.success);
        assert!(report.attempts.iter().filter(|a| !a.changed).count() == 2);
    }

    #[tokio::test]
    async fn unresponsive_board_fails_within_cap() {
        let mut board = SimulatedBoard::from_words(&shuffled())
            .with_techniques(vec![TechniqueBehavior::Fail, TechniqueBehavior::Ignore]);
        let config = SolverConfig::default();
        let report = run(&mut board, &config).await;

        assert!(!report.success);
        assert_eq!(report.iterations, ladder().len() + config.reconcile_slack);
        assert_eq!(report.last_observed, board.words());
        assert_eq!(report.expected, ladder());
        assert_eq!(board.relocations(), 0);
    }

    #[tokio::test]
    async fn stale_plan_is_rebuilt() {
        // Plan computed against an order the board no longer shows
        let target = ladder();
        let stale = plan(&shuffled(), &target)
            .unwrap()
            .into_iter()
            .rev()
            .collect();
        let mut other = shuffled();
        other.swap(1, 5);
        let mut board = SimulatedBoard::from_words(&other);

        let report = reconcile(&mut board, &target, stale, &SolverConfig::default()).await;
        assert!(report.success);
        assert!(matches_target(&board.words(), &target));
    }

    #[tokio::test]
    async fn missing_word_reports_plan_error() {
        let mut words = shuffled();
        words[3] = Word::new("zzzzz").unwrap();
        let mut board = SimulatedBoard::from_words(&words);

        let report = reconcile(&mut board, &ladder(), Vec::new(), &SolverConfig::default()).await;
        assert!(!report.success);
        assert!(matches!(report.plan_error, Some(PlanError::MissingWord { .. })));
        assert_eq!(report.rows_in_place(), 3);
    }
}
