//! Extract command
//!
//! Reads a saved page (or a directory of saved pages) and extracts the puzzle.

use crate::core::{PuzzleData, SolverConfig};
use crate::extract::{extract, extract_html};
use crate::source::{DirectorySource, gather_puzzle};
use anyhow::{Context, Result};
use std::path::Path;

/// Whether `path` names an HTML page rather than plain text
fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Extract from a file, or from `homepage.html` plus the puzzle page in a directory
///
/// # Errors
///
/// Returns an error if the file or directory cannot be read.
pub async fn extract_path(path: &Path, config: &SolverConfig) -> Result<PuzzleData> {
    if path.is_dir() {
        let source = DirectorySource::new(path);
        return gather_puzzle(&source, config)
            .await
            .with_context(|| format!("Failed to read pages from {}", path.display()));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(if is_html(path) {
        extract_html(&content, config)
    } else {
        extract(&content, None, config)
    })
}
