//! One-letter-step graph over a small word pool

use crate::core::Word;
use std::collections::VecDeque;
use tracing::trace;

/// Words as nodes, edges between words one letter apart
///
/// Node order is the pool order given to [`WordGraph::new`], and every
/// adjacency list is sorted by node index, so searches are deterministic.
pub struct WordGraph {
    nodes: Vec<Word>,
    adjacency: Vec<Vec<usize>>,
}

impl WordGraph {
    #[must_use]
    pub fn new(nodes: Vec<Word>) -> Self {
        let adjacency = (0..nodes.len())
            .map(|i| {
                (0..nodes.len())
                    .filter(|&j| i != j && nodes[i].is_adjacent(&nodes[j]))
                    .collect()
            })
            .collect();

        Self { nodes, adjacency }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn index_of(&self, word: &Word) -> Option<usize> {
        self.nodes.iter().position(|node| node == word)
    }

    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Map a path of node indices back to words
    #[must_use]
    pub fn words(&self, path: &[usize]) -> Vec<Word> {
        path.iter().map(|&i| self.nodes[i].clone()).collect()
    }

    /// Breadth-first search for a path of exactly `len` nodes from `start` to `end`
    ///
    /// Visited nodes are tracked per path rather than globally: the same word
    /// may appear on many partial paths, just never twice on one. `end` is
    /// only accepted as the final node. Gives up after expanding `max_paths`
    /// partial paths.
    #[must_use]
    pub fn search(
        &self,
        start: usize,
        end: usize,
        len: usize,
        max_paths: usize,
    ) -> Option<Vec<usize>> {
        if len < 2 || start == end {
            return None;
        }

        let mut queue = VecDeque::from([vec![start]]);
        let mut expanded = 0usize;

        while let Some(path) = queue.pop_front() {
            expanded += 1;
            if expanded > max_paths {
                trace!(
                    start = %self.nodes[start],
                    end = %self.nodes[end],
                    "search abandoned after {max_paths} paths"
                );
                return None;
            }

            let tail = path[path.len() - 1];
            let next_len = path.len() + 1;
            let steps_left = len - next_len;

            for &next in &self.adjacency[tail] {
                if path.contains(&next) {
                    continue;
                }

                if next == end {
                    if next_len == len {
                        let mut found = path.clone();
                        found.push(next);
                        return Some(found);
                    }
                    continue;
                }

                // Cannot reach `end` in the steps remaining
                let distance = self.nodes[next]
                    .hamming(&self.nodes[end])
                    .unwrap_or(usize::MAX);
                if next_len < len && distance <= steps_left {
                    let mut extended = path.clone();
                    extended.push(next);
                    queue.push_back(extended);
                }
            }
        }

        None
    }
}
