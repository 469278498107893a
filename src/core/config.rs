//! Solver configuration
//!
//! Puzzle-format constants that were tuned against the daily puzzle live here
//! rather than being scattered through the engine, so a different variant only
//! needs a different config file.

use super::ladder::LADDER_LEN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Tunable constants shared by every stage of a solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Words in a complete ladder, endpoints included
    pub ladder_length: usize,
    /// Jaccard score a similarity match must exceed
    pub similarity_threshold: f64,
    /// Characters scanned backward from an answer token for its clue
    pub proximity_window: usize,
    /// Pair extraction stops trying further strategies at this many pairs
    pub target_pair_count: usize,
    /// Observed clue text longer than this is treated as garbage
    pub max_clue_length: usize,
    /// Extra reconcile iterations allowed beyond `ladder_length`
    pub reconcile_slack: usize,
    /// Timeout for a single board operation, in milliseconds
    pub operation_timeout_ms: u64,
    /// Candidate pool cap for the pair searches
    pub max_candidates: usize,
    /// Maximum paths a single breadth-first search may expand
    pub max_search_paths: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            ladder_length: LADDER_LEN,
            similarity_threshold: 0.3,
            proximity_window: 300,
            target_pair_count: 5,
            max_clue_length: 200,
            reconcile_slack: 3,
            operation_timeout_ms: 2000,
            max_candidates: 60,
            max_search_paths: 50_000,
        }
    }
}

impl SolverConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Number of middle (clue) words in a complete ladder
    #[must_use]
    pub const fn middle_count(&self) -> usize {
        self.ladder_length.saturating_sub(2)
    }

    /// Upper bound on reconcile iterations
    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.ladder_length + self.reconcile_slack
    }

    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_daily_puzzle() {
        let config = SolverConfig::default();
        assert_eq!(config.ladder_length, 7);
        assert_eq!(config.middle_count(), 5);
        assert_eq!(config.max_iterations(), 10);
        assert!((config.similarity_threshold - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"similarity_threshold": 0.5, "reconcile_slack": 1}"#)
                .unwrap();
        assert!((config.similarity_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.reconcile_slack, 1);
        assert_eq!(config.proximity_window, 300);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(serde_json::from_str::<SolverConfig>(r#"{"ladder_len": 7}"#).is_err());
    }
}
