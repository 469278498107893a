//! Ladder reconstruction from partial information
//!
//! Given endpoints and/or a pool of candidate words, recover the ordered
//! ladder. Tried in order: breadth-first search between the known endpoints,
//! brute-force permutation of exactly the middle words, a search over every
//! ordered pair of the pool as putative endpoints, and finally the longest
//! greedy chain as a best-effort answer.

mod graph;

pub use graph::WordGraph;

use crate::core::{SolverConfig, Word, is_valid_ladder};
use itertools::Itertools;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Which technique produced a reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Breadth-first search between the known endpoints
    Search,
    /// Brute-force ordering of exactly the middle words
    Permutation,
    /// Search with every ordered pair of the pool tried as endpoints
    PairSearch,
    /// Longest greedy chain; may be shorter than a full ladder
    GreedyChain,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "endpoint search",
            Self::Permutation => "permutation",
            Self::PairSearch => "pair search",
            Self::GreedyChain => "greedy chain",
        };
        f.write_str(name)
    }
}

/// A reconstructed ladder and how it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub words: Vec<Word>,
    pub method: Method,
}

impl Reconstruction {
    #[must_use]
    pub fn is_complete(&self, len: usize) -> bool {
        is_valid_ladder(&self.words, len)
    }
}

/// Reconstruct a ladder from optional endpoints and a candidate pool
///
/// Returns `None` when word lengths are not uniform across the endpoints and
/// candidates, or when there is nothing to chain. Otherwise always returns
/// something: a full ladder when one exists, the longest greedy chain when
/// not. Identical inputs always produce identical output.
///
/// # Examples
/// ```
/// use ladder_solver::core::{SolverConfig, Word, words_from_slice};
/// use ladder_solver::reconstruct::{Method, reconstruct};
///
/// let start = Word::new("horns").unwrap();
/// let end = Word::new("brass").unwrap();
/// let middle = words_from_slice(&["brats", "moans", "morns", "boats", "moats"]);
///
/// let config = SolverConfig::default();
/// let found = reconstruct(Some(&start), Some(&end), &middle, &config).unwrap();
/// assert_eq!(found.method, Method::Search);
/// assert_eq!(found.words[1].text(), "MORNS");
/// ```
#[must_use]
pub fn reconstruct(
    start: Option<&Word>,
    end: Option<&Word>,
    candidates: &[Word],
    config: &SolverConfig,
) -> Option<Reconstruction> {
    let len = config.ladder_length;
    let pool = build_pool(start, end, candidates)?;
    let graph = WordGraph::new(pool);

    if let (Some(start), Some(end)) = (start, end) {
        if let Some(words) = search_between(&graph, start, end, config) {
            debug!("ladder found by endpoint search");
            return Some(Reconstruction {
                words,
                method: Method::Search,
            });
        }

        let middle = middle_candidates(start, end, candidates);
        if middle.len() == config.middle_count() {
            if let Some(words) = permute(start, end, &middle, len) {
                debug!("ladder found by permutation");
                return Some(Reconstruction {
                    words,
                    method: Method::Permutation,
                });
            }
        }
    }

    if let Some(words) = pair_search(&graph, config) {
        debug!(start = %words[0], end = %words[words.len() - 1], "ladder found by pair search");
        return Some(Reconstruction {
            words,
            method: Method::PairSearch,
        });
    }

    let chain = greedy_chain(&graph, len);
    debug!(length = chain.len(), "falling back to greedy chain");
    (!chain.is_empty()).then_some(Reconstruction {
        words: chain,
        method: Method::GreedyChain,
    })
}

/// Search and permutation only, never a partial result
///
/// Used when testing putative endpoints, where a best-effort chain would be
/// a false positive.
#[must_use]
pub fn reconstruct_strict(
    start: &Word,
    end: &Word,
    candidates: &[Word],
    config: &SolverConfig,
) -> Option<Vec<Word>> {
    let pool = build_pool(Some(start), Some(end), candidates)?;
    let graph = WordGraph::new(pool);

    search_between(&graph, start, end, config).or_else(|| {
        let middle = middle_candidates(start, end, candidates);
        (middle.len() == config.middle_count())
            .then(|| permute(start, end, &middle, config.ladder_length))
            .flatten()
    })
}

/// Deduplicated pool in order: start, candidates, end
///
/// `None` if lengths are mixed or the pool is empty.
fn build_pool(start: Option<&Word>, end: Option<&Word>, candidates: &[Word]) -> Option<Vec<Word>> {
    let mut seen = FxHashSet::default();
    let pool: Vec<Word> = start
        .into_iter()
        .chain(candidates)
        .chain(end)
        .filter(|word| seen.insert(word.text()))
        .cloned()
        .collect();

    let first_len = pool.first()?.len();
    if pool.iter().any(|word| word.len() != first_len) {
        debug!("mixed word lengths in candidate pool");
        return None;
    }

    Some(pool)
}

fn middle_candidates(start: &Word, end: &Word, candidates: &[Word]) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    candidates
        .iter()
        .filter(|word| *word != start && *word != end)
        .filter(|word| seen.insert(word.text()))
        .cloned()
        .collect()
}

fn search_between(
    graph: &WordGraph,
    start: &Word,
    end: &Word,
    config: &SolverConfig,
) -> Option<Vec<Word>> {
    let from = graph.index_of(start)?;
    let to = graph.index_of(end)?;
    graph
        .search(from, to, config.ladder_length, config.max_search_paths)
        .map(|path| graph.words(&path))
}

/// First permutation of `middle` (lexicographic by index) that chains
fn permute(start: &Word, end: &Word, middle: &[Word], len: usize) -> Option<Vec<Word>> {
    middle
        .iter()
        .permutations(middle.len())
        .map(|order| {
            let mut words = Vec::with_capacity(len);
            words.push(start.clone());
            words.extend(order.into_iter().cloned());
            words.push(end.clone());
            words
        })
        .find(|words| is_valid_ladder(words, len))
}

/// Every ordered pair of the pool as (start, end), first success in pair order
fn pair_search(graph: &WordGraph, config: &SolverConfig) -> Option<Vec<Word>> {
    let n = graph.len().min(config.max_candidates);
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|s| (0..n).filter(move |&e| e != s).map(move |e| (s, e)))
        .collect();

    pairs
        .par_iter()
        .find_map_first(|&(s, e)| {
            graph.search(s, e, config.ladder_length, config.max_search_paths)
        })
        .map(|path| graph.words(&path))
}

/// Longest chain built by repeatedly stepping to the first unused neighbor
///
/// Every node is tried as a seed; ties keep the earliest seed. Chains stop
/// growing at `max_len`.
fn greedy_chain(graph: &WordGraph, max_len: usize) -> Vec<Word> {
    let mut best: Vec<usize> = Vec::new();

    for seed in 0..graph.len() {
        let mut chain = vec![seed];
        while chain.len() < max_len {
            let tail = chain[chain.len() - 1];
            match graph.neighbors(tail).iter().find(|n| !chain.contains(n)) {
                Some(&next) => chain.push(next),
                None => break,
            }
        }
        if chain.len() > best.len() {
            best = chain;
        }
    }

    graph.words(&best)
}
