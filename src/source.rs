//! Answer page sources
//!
//! Fetching pages over the network is left to the embedding application; the
//! crate ships [`DirectorySource`] for pages saved to disk.

use crate::core::{PuzzleData, SolverConfig};
use crate::extract::extract_html;
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("page not available: {0}")]
    NotFound(String),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where raw answer pages come from
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// The page listing today's puzzle
    async fn fetch_homepage(&self) -> Result<String, SourceError>;

    /// The detail page for one puzzle
    async fn fetch_puzzle_page(&self, number: u32) -> Result<String, SourceError>;
}

/// Saved pages in a directory: `homepage.html` and `puzzle-<n>.html`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, name: &str) -> Result<String, SourceError> {
        let path = self.root.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.display().to_string()))
            }
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}

#[async_trait]
impl AnswerSource for DirectorySource {
    async fn fetch_homepage(&self) -> Result<String, SourceError> {
        self.read("homepage.html").await
    }

    async fn fetch_puzzle_page(&self, number: u32) -> Result<String, SourceError> {
        self.read(&format!("puzzle-{number}.html")).await
    }
}

/// Extract from the homepage, then fill gaps from the puzzle's own page
///
/// The detail page is only fetched when the homepage names a puzzle number
/// and left the ladder or pairs incomplete. A missing detail page is not an
/// error.
///
/// # Errors
///
/// Returns the homepage fetch error, or a detail page error other than
/// [`SourceError::NotFound`].
pub async fn gather_puzzle<S: AnswerSource + ?Sized>(
    source: &S,
    config: &SolverConfig,
) -> Result<PuzzleData, SourceError> {
    let len = config.ladder_length;
    let homepage = source.fetch_homepage().await?;
    let mut puzzle = extract_html(&homepage, config);

    let complete = puzzle.has_complete_ladder(len)
        && puzzle.clue_answer_pairs.len() >= config.middle_count();
    let Some(number) = puzzle.puzzle_number.filter(|_| !complete) else {
        return Ok(puzzle);
    };

    match source.fetch_puzzle_page(number).await {
        Ok(page) => {
            info!(number, "merging puzzle page");
            puzzle.merge(extract_html(&page, config));
            puzzle.backfill_endpoints(len);
            puzzle.validate_pairs(len);
        }
        Err(SourceError::NotFound(page)) => warn!(%page, "no puzzle page, using homepage only"),
        Err(e) => return Err(e),
    }
    Ok(puzzle)
}
