//! Formatting utilities for terminal output

use crate::core::Word;
use colored::Colorize;

/// Index of the single letter that changes between two rungs
///
/// `None` when the words are not ladder neighbours.
#[must_use]
pub fn changed_letter(from: &Word, to: &Word) -> Option<usize> {
    if !from.is_adjacent(to) {
        return None;
    }
    from.text()
        .bytes()
        .zip(to.text().bytes())
        .position(|(a, b)| a != b)
}

/// Render a rung with the letter that changed from the previous rung highlighted
#[must_use]
pub fn highlight_rung(previous: Option<&Word>, word: &Word) -> String {
    let changed = previous.and_then(|prev| changed_letter(prev, word));
    word.text()
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if Some(i) == changed {
                c.to_string().bright_yellow().bold().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value.min(max) * width) / max
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Percentage of `part` in `whole`, 0 for an empty whole
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn changed_letter_between_neighbours() {
        assert_eq!(changed_letter(&word("horns"), &word("morns")), Some(0));
        assert_eq!(changed_letter(&word("moans"), &word("moats")), Some(3));
    }

    #[test]
    fn changed_letter_for_non_neighbours() {
        assert_eq!(changed_letter(&word("horns"), &word("moans")), None);
        assert_eq!(changed_letter(&word("horns"), &word("horns")), None);
    }

    #[test]
    fn first_rung_is_not_highlighted() {
        colored::control::set_override(false);
        assert_eq!(highlight_rung(None, &word("horns")), "HORNS");
        assert_eq!(highlight_rung(Some(&word("horns")), &word("morns")), "MORNS");
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0, 100, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100, 100, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50, 100, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3, 0, 4), "░░░░");
    }

    #[test]
    fn percent_of_empty_whole() {
        assert!(percent(3, 0).abs() < f64::EPSILON);
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
    }
}
