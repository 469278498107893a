//! Solve command
//!
//! Runs the whole pipeline on saved pages against a simulated board: gather
//! and extract the puzzle, lay its clues out on blank rows in random order,
//! then let a [`SolveSession`] fill and reorder them.

use crate::core::{PuzzleData, SolverConfig};
use crate::reconcile::{SimRow, SimulatedBoard, TechniqueBehavior};
use crate::session::{SolveReport, SolveSession};
use crate::source::{AnswerSource, gather_puzzle};
use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Settings for the simulated board
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub techniques: Vec<TechniqueBehavior>,
    pub seed: Option<u64>,
}

/// Result of solving one puzzle
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub puzzle: PuzzleData,
    pub report: SolveReport,
    /// Rows as the board shows them at the end
    pub final_rows: Vec<String>,
}

/// Blank board for `puzzle`: locked endpoints, one shuffled row per clue
///
/// Middle rows without a known clue get no clue text at all.
#[must_use]
pub fn board_for(
    puzzle: &PuzzleData,
    options: &SolveOptions,
    config: &SolverConfig,
) -> SimulatedBoard {
    let mut rng = options
        .seed
        .map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);

    let mut middle: Vec<SimRow> = puzzle
        .clue_answer_pairs
        .iter()
        .map(|pair| SimRow::blank(pair.clue.clone()))
        .collect();
    while middle.len() < config.middle_count() {
        middle.push(SimRow {
            word: String::new(),
            clue: None,
            locked: false,
        });
    }
    middle.shuffle(&mut rng);

    let rows = puzzle
        .word_ladder
        .first()
        .map(SimRow::locked)
        .into_iter()
        .chain(middle)
        .chain(puzzle.word_ladder.last().map(SimRow::locked))
        .collect();
    SimulatedBoard::new(rows).with_techniques(options.techniques.clone())
}

/// Gather the puzzle from `source` and solve it on a simulated board
///
/// # Errors
///
/// Returns an error if the pages cannot be read, no complete ladder can be
/// extracted, or the board cannot be read at all.
pub async fn solve_from_source<S: AnswerSource + ?Sized>(
    source: &S,
    options: &SolveOptions,
    config: &SolverConfig,
) -> Result<SolveOutcome> {
    let puzzle = gather_puzzle(source, config)
        .await
        .context("Failed to gather puzzle pages")?;
    if !puzzle.has_complete_ladder(config.ladder_length) {
        bail!(
            "No complete ladder could be extracted ({} of {} words)",
            puzzle.word_ladder.len(),
            config.ladder_length
        );
    }

    let mut board = board_for(&puzzle, options, config);
    let mut session = SolveSession::new(config.clone(), puzzle);
    let report = session.run(&mut board).await?;

    Ok(SolveOutcome {
        puzzle: session.puzzle().clone(),
        report,
        final_rows: board.words(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DirectorySource;
    use std::fs;

    const PAGE: &str = "<h1>Word Ladder #142</h1>\
        <table>\
        <tr><td>Unruly children</td><td>BRATS</td></tr>\
        <tr><td>Groans</td><td>MOANS</td></tr>\
        <tr><td>Early parts of the day</td><td>MORNS</td></tr>\
        <tr><td>Ditches around a castle</td><td>MOATS</td></tr>\
        <tr><td>Small sailing vessels</td><td>BOATS</td></tr>\
        </table><p>Top: HORNS</p><p>Bottom: BRASS</p>";

    fn options(techniques: Vec<TechniqueBehavior>) -> SolveOptions {
        SolveOptions {
            techniques,
            seed: Some(3),
        }
    }

    #[tokio::test]
    async fn solves_saved_homepage() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("homepage.html"), PAGE).unwrap();
        let source = DirectorySource::new(dir.path());

        let outcome = solve_from_source(
            &source,
            &options(vec![TechniqueBehavior::Ignore, TechniqueBehavior::Succeed]),
            &SolverConfig::default(),
        )
        .await
        .unwrap();

        assert!(outcome.report.success());
        assert_eq!(
            outcome.final_rows,
            vec!["HORNS", "MORNS", "MOANS", "MOATS", "BOATS", "BRATS", "BRASS"]
        );
        assert_eq!(outcome.report.summary.by_clue, 5);
    }

    #[tokio::test]
    async fn incomplete_page_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("homepage.html"), "<p>No puzzle today</p>").unwrap();
        let source = DirectorySource::new(dir.path());

        let result = solve_from_source(
            &source,
            &options(vec![TechniqueBehavior::Succeed]),
            &SolverConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn board_has_a_row_per_rung() {
        let mut puzzle = PuzzleData {
            word_ladder: crate::core::words_from_slice(&[
                "horns", "morns", "moans", "moats", "boats", "brats", "brass",
            ]),
            ..PuzzleData::default()
        };
        puzzle.backfill_endpoints(7);
        let board = board_for(
            &puzzle,
            &options(vec![TechniqueBehavior::Succeed]),
            &SolverConfig::default(),
        );

        let words = board.words();
        assert_eq!(words.len(), 7);
        assert_eq!(words[0], "HORNS");
        assert!(words[1..6].iter().all(String::is_empty));
    }
}
