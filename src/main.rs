//! Ladder Solver - CLI
//!
//! Extracts word ladder puzzles from saved answer pages, reconstructs ladders
//! from loose words, and drives simulated boards into ladder order.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ladder_solver::{
    commands::{
        SimulateOptions, SolveOptions, extract_path, plan_orders, reconstruct_words,
        run_simulation, solve_from_source,
    },
    core::{SolverConfig, Word, is_chain},
    logging::init_logging,
    output::{print_plan, print_puzzle, print_reconstruction, print_simulation, print_solve},
    reconcile::TechniqueBehavior,
    source::DirectorySource,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Ladder used by `simulate` when none is given
const DEFAULT_LADDER: &[&str] = &["HORNS", "MORNS", "MOANS", "MOATS", "BOATS", "BRATS", "BRASS"];

#[derive(Parser)]
#[command(
    name = "ladder_solver",
    about = "Word ladder solver: answer extraction, ladder reconstruction and board reconciliation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; missing fields take their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the puzzle from a saved page, or a directory of saved pages
    Extract {
        /// HTML or text file, or a directory holding homepage.html
        path: PathBuf,
    },

    /// Order loose words into a ladder
    Reconstruct {
        /// Known first word
        #[arg(short, long)]
        start: Option<String>,

        /// Known last word
        #[arg(short, long)]
        end: Option<String>,

        /// Candidate words, in any order
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Plan the moves that turn one ordering into another
    Plan {
        /// Current order, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        current: Vec<String>,

        /// Target order, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        target: Vec<String>,
    },

    /// Reconcile many shuffled simulated boards and report statistics
    Simulate {
        /// Number of rounds
        #[arg(short = 'n', long, default_value = "100")]
        rounds: usize,

        /// Technique behaviours: succeed, fail, ignore, fail-times:N, stall:MS
        #[arg(short, long, value_delimiter = ',', default_value = "succeed")]
        techniques: Vec<TechniqueBehavior>,

        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Ladder to shuffle, comma separated
        #[arg(short, long, value_delimiter = ',')]
        ladder: Option<Vec<String>>,
    },

    /// Extract a puzzle from saved pages and solve it on a simulated board
    Solve {
        /// Directory holding homepage.html and optional puzzle-<n>.html pages
        dir: PathBuf,

        /// Technique behaviours: succeed, fail, ignore, fail-times:N, stall:MS
        #[arg(short, long, value_delimiter = ',', default_value = "succeed")]
        techniques: Vec<TechniqueBehavior>,

        /// Seed for the row shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    match cli.command {
        Commands::Extract { path } => run_extract_command(&path, &config, cli.json).await,
        Commands::Reconstruct { start, end, words } => {
            run_reconstruct_command(start.as_deref(), end.as_deref(), &words, &config, cli.json)
        }
        Commands::Plan { current, target } => run_plan_command(&current, &target, cli.json),
        Commands::Simulate {
            rounds,
            techniques,
            seed,
            ladder,
        } => {
            let options = SimulateOptions {
                rounds,
                techniques,
                seed,
                show_progress: !cli.json,
            };
            run_simulate_command(ladder, &options, &config, cli.json).await
        }
        Commands::Solve {
            dir,
            techniques,
            seed,
        } => {
            let options = SolveOptions { techniques, seed };
            run_solve_command(&dir, &options, &config, cli.json, cli.verbose).await
        }
    }
}

async fn run_extract_command(path: &Path, config: &SolverConfig, json: bool) -> Result<()> {
    let puzzle = extract_path(path, config).await?;
    if json {
        print_json(&puzzle)
    } else {
        print_puzzle(&puzzle, config.ladder_length);
        Ok(())
    }
}

fn run_reconstruct_command(
    start: Option<&str>,
    end: Option<&str>,
    words: &[String],
    config: &SolverConfig,
    json: bool,
) -> Result<()> {
    let result = reconstruct_words(start, end, words, config).context("Invalid word")?;
    if json {
        print_json(&result)
    } else {
        print_reconstruction(&result);
        Ok(())
    }
}

fn run_plan_command(current: &[String], target: &[String], json: bool) -> Result<()> {
    let result = plan_orders(current, target).context("Cannot plan between these orderings")?;
    if json {
        print_json(&result)
    } else {
        print_plan(&result);
        Ok(())
    }
}

async fn run_simulate_command(
    ladder: Option<Vec<String>>,
    options: &SimulateOptions,
    config: &SolverConfig,
    json: bool,
) -> Result<()> {
    let words = match ladder {
        Some(words) => words
            .iter()
            .map(Word::new)
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid ladder word")?,
        None => DEFAULT_LADDER
            .iter()
            .map(Word::new)
            .collect::<Result<Vec<_>, _>>()?,
    };
    if words.len() < 2 || !is_chain(&words) {
        bail!("Ladder must be at least two words, each one letter from the next");
    }

    if !json {
        println!(
            "Simulating {} rounds of {} → {}...",
            options.rounds,
            words[0],
            words[words.len() - 1]
        );
    }
    let stats = run_simulation(&words, options, config).await;
    if json {
        print_json(&stats)
    } else {
        print_simulation(&stats);
        Ok(())
    }
}

async fn run_solve_command(
    dir: &Path,
    options: &SolveOptions,
    config: &SolverConfig,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let source = DirectorySource::new(dir);
    let outcome = solve_from_source(&source, options, config)
        .await
        .with_context(|| format!("Failed to solve puzzle in {}", dir.display()))?;

    if json {
        print_json(&serde_json::json!({
            "puzzle": outcome.puzzle,
            "success": outcome.report.success(),
            "matched_by_clue": outcome.report.summary.by_clue,
            "matched_by_position": outcome.report.summary.positional,
            "iterations": outcome.report.reconcile.iterations,
            "attempts": outcome.report.reconcile.attempts.len(),
            "final_rows": outcome.final_rows,
        }))
    } else {
        print_solve(&outcome, config.ladder_length, verbose);
        Ok(())
    }
}
