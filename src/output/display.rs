//! Display functions for command results

use super::formatters::{create_progress_bar, highlight_rung, percent};
use crate::commands::{PlanResult, ReconstructResult, SimulationStats, SolveOutcome};
use crate::core::{PuzzleData, Word};
use colored::Colorize;

fn print_ladder(words: &[Word]) {
    for (i, word) in words.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| &words[p]);
        println!("   {:>2}. {}", i + 1, highlight_rung(previous, word));
    }
}

/// Print an extracted puzzle
pub fn print_puzzle(puzzle: &PuzzleData, ladder_length: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    let title = puzzle
        .puzzle_number
        .map_or_else(|| "WORD LADDER".to_string(), |n| format!("WORD LADDER #{n}"));
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if let Some(theme) = &puzzle.theme {
        println!("\n🎯 Theme: {}", theme.bright_yellow());
    }

    let endpoint = |word: Option<&Word>| {
        word.map_or_else(
            || "?".bright_black().to_string(),
            |w| w.text().green().bold().to_string(),
        )
    };
    println!(
        "\n🔚 {} → {}",
        endpoint(puzzle.start_word.as_ref()),
        endpoint(puzzle.end_word.as_ref())
    );

    println!("\n🪜 {}", "Ladder:".bright_cyan().bold());
    if puzzle.word_ladder.is_empty() {
        println!("   {}", "(none found)".bright_black());
    } else {
        print_ladder(&puzzle.word_ladder);
    }
    if puzzle.has_complete_ladder(ladder_length) {
        println!("   {}", "complete".green());
    } else {
        println!(
            "   {}",
            format!(
                "incomplete: {} of {ladder_length} words",
                puzzle.word_ladder.len()
            )
            .yellow()
        );
    }

    if !puzzle.clue_answer_pairs.is_empty() {
        println!("\n📝 {}", "Clues:".bright_cyan().bold());
        for pair in &puzzle.clue_answer_pairs {
            println!("   {:<8} {}", pair.answer.text().bold(), pair.clue);
        }
    }
}

/// Print a reconstructed ladder
pub fn print_reconstruction(result: &ReconstructResult) {
    let Some(method) = result.method else {
        println!(
            "{}",
            "❌ Nothing to chain: inputs must share one length".red().bold()
        );
        return;
    };

    println!("\n🔗 Found by {}:", method.to_string().bright_yellow());
    print_ladder(&result.words);
    if result.complete {
        println!("{}", "✅ Complete ladder".green().bold());
    } else {
        println!(
            "{}",
            format!("⚠️  Partial chain of {} words", result.words.len()).yellow()
        );
    }
}

/// Print a swap plan
pub fn print_plan(result: &PlanResult) {
    if result.moves.is_empty() {
        println!("{}", "✅ Already in order".green().bold());
        return;
    }

    println!("\n📋 {} moves:", result.moves.len());
    for (i, mv) in result.moves.iter().enumerate() {
        println!("   {}. {mv}", i + 1);
    }
    println!("\n   Result: {}", result.result.join(" "));
    if !result.reaches_target {
        println!("{}", "❌ Plan does not reach the target".red().bold());
    }
}

/// Print the statistics of a simulation run
pub fn print_simulation(stats: &SimulationStats) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Reconciliation:".bright_cyan().bold());
    println!("   Rounds:           {}", stats.rounds);
    println!(
        "   Solved:           {}",
        format!(
            "{} ({:.1}%)",
            stats.solved,
            percent(stats.solved, stats.rounds)
        )
        .green()
        .bold()
    );
    if stats.failed > 0 {
        println!("   Failed:           {}", stats.failed.to_string().red());
    }
    println!("   Already in order: {}", stats.already_solved);
    println!(
        "   Average passes:   {}",
        format!("{:.2}", stats.average_iterations).bright_yellow()
    );
    println!("   Worst case:       {}", stats.max_iterations);
    println!("   Attempts:         {}", stats.total_attempts);
    println!("   Relocations:      {}", stats.total_relocations);
    println!("   Time taken:       {:.2}s", stats.duration.as_secs_f64());

    println!("\n📈 {}", "Passes per round:".bright_cyan().bold());
    for (&iterations, &count) in &stats.iteration_distribution {
        let bar = create_progress_bar(count, stats.rounds, 40);
        println!(
            "   {iterations:>2}: {} {count:4} ({:5.1}%)",
            bar.green(),
            percent(count, stats.rounds)
        );
    }
}

/// Print a solve attempt
pub fn print_solve(outcome: &SolveOutcome, ladder_length: usize, verbose: bool) {
    print_puzzle(&outcome.puzzle, ladder_length);

    let report = &outcome.report;
    println!("\n✍️  {}", "Filling:".bright_cyan().bold());
    println!("   {}", report.summary);
    for fill in &report.fills {
        let status = if fill.ok { "✓".green() } else { "✗".red() };
        println!(
            "   {status} {} {:<8} ({})",
            fill.row,
            fill.word.text(),
            fill.method
        );
    }

    println!("\n🔀 {}", "Reconciling:".bright_cyan().bold());
    println!(
        "   {} passes, {} attempts",
        report.reconcile.iterations,
        report.reconcile.attempts.len()
    );
    if verbose {
        for attempt in &report.reconcile.attempts {
            let tried = attempt
                .techniques
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "   {} {} → {} via [{tried}] {}",
                attempt.word,
                attempt.source,
                attempt.dest,
                if attempt.changed { "moved" } else { "no change" }
            );
        }
    }
    if let Some(error) = &report.reconcile.plan_error {
        println!("   {}", format!("plan failed: {error}").yellow());
    }
    println!("\n   Board: {}", outcome.final_rows.join(" "));

    println!();
    if report.success() {
        println!("{}", "✅ Board solved!".green().bold());
    } else {
        println!(
            "{}",
            format!(
                "❌ Board not solved ({} of {} rows in place)",
                report.reconcile.rows_in_place(),
                report.reconcile.expected.len()
            )
            .red()
            .bold()
        );
    }
}
