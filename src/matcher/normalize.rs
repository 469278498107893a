//! Text normalization and similarity scoring for clue comparison

use rustc_hash::FxHashSet;

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace
///
/// # Examples
/// ```
/// use ladder_solver::matcher::normalize;
///
/// assert_eq!(normalize("  Ditches (around) a CASTLE! "), "ditches around a castle");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Jaccard similarity of the whitespace-separated token sets
///
/// Two empty strings score 0.
#[must_use]
pub fn jaccard(a: &str, b: &str) -> f64 {
    let left: FxHashSet<&str> = a.split_whitespace().collect();
    let right: FxHashSet<&str> = b.split_whitespace().collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}
