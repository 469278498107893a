//! Simulate command
//!
//! Reconciles many randomly shuffled simulated boards and collects statistics,
//! to see how the reconciler copes with a given mix of technique behaviours.

use crate::core::{SolverConfig, Word};
use crate::reconcile::{SimRow, SimulatedBoard, TechniqueBehavior, matches_target, plan, reconcile};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Settings for a simulation run
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub rounds: usize,
    pub techniques: Vec<TechniqueBehavior>,
    /// Fixed seed for reproducible shuffles
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            rounds: 100,
            techniques: vec![TechniqueBehavior::Succeed],
            seed: None,
            show_progress: true,
        }
    }
}

/// Statistics over all rounds
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStats {
    pub rounds: usize,
    pub solved: usize,
    pub failed: usize,
    /// Rounds whose shuffle happened to be solved already
    pub already_solved: usize,
    pub average_iterations: f64,
    pub max_iterations: usize,
    /// Iterations used, by count of rounds
    pub iteration_distribution: BTreeMap<usize, usize>,
    pub total_attempts: usize,
    pub total_relocations: usize,
    pub duration: Duration,
}

/// Shuffle the middle of `ladder` onto a board with locked ends
fn shuffled_board(
    ladder: &[Word],
    rng: &mut StdRng,
    techniques: &[TechniqueBehavior],
) -> SimulatedBoard {
    let mut middle: Vec<&Word> = ladder
        .iter()
        .skip(1)
        .take(ladder.len().saturating_sub(2))
        .collect();
    middle.shuffle(rng);

    let rows = ladder
        .first()
        .map(SimRow::locked)
        .into_iter()
        .chain(middle.into_iter().map(SimRow::filled))
        .chain(ladder.last().filter(|_| ladder.len() > 1).map(SimRow::locked))
        .collect();

    SimulatedBoard::new(rows).with_techniques(techniques.to_vec())
}

/// Reconcile `options.rounds` shuffled boards toward `ladder`
pub async fn run_simulation(
    ladder: &[Word],
    options: &SimulateOptions,
    config: &SolverConfig,
) -> SimulationStats {
    let mut rng = options
        .seed
        .map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);

    let pb = if options.show_progress {
        ProgressBar::new(options.rounds as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let mut stats = SimulationStats {
        rounds: options.rounds,
        solved: 0,
        failed: 0,
        already_solved: 0,
        average_iterations: 0.0,
        max_iterations: 0,
        iteration_distribution: BTreeMap::new(),
        total_attempts: 0,
        total_relocations: 0,
        duration: Duration::ZERO,
    };
    let mut total_iterations = 0;

    for round in 0..options.rounds {
        let mut board = shuffled_board(ladder, &mut rng, &options.techniques);
        if matches_target(&board.words(), ladder) {
            stats.already_solved += 1;
        }

        let initial = plan(&board.words(), ladder).unwrap_or_default();
        let report = reconcile(&mut board, ladder, initial, config).await;

        if report.success {
            stats.solved += 1;
        } else {
            stats.failed += 1;
        }
        total_iterations += report.iterations;
        stats.max_iterations = stats.max_iterations.max(report.iterations);
        *stats
            .iteration_distribution
            .entry(report.iterations)
            .or_insert(0) += 1;
        stats.total_attempts += report.attempts.len();
        stats.total_relocations += board.relocations();

        if round % 10 == 0 {
            pb.set_message(format!("Solved: {}/{}", stats.solved, round + 1));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");

    stats.duration = start.elapsed();
    if options.rounds > 0 {
        stats.average_iterations = total_iterations as f64 / options.rounds as f64;
    }
    stats
}
