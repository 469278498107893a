//! Ladder Solver
//!
//! A word ladder puzzle engine: pulls clues, answers and the ordered ladder out
//! of loosely structured answer pages, reconstructs ladders from partial
//! information, and drives a board into the correct order.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ladder_solver::core::SolverConfig;
//! use ladder_solver::extract::extract_html;
//!
//! let html = std::fs::read_to_string("homepage.html").unwrap();
//! let puzzle = extract_html(&html, &SolverConfig::default());
//! for word in &puzzle.word_ladder {
//!     println!("{word}");
//! }
//! ```

// Core domain types
pub mod core;

// Page parsing and answer extraction
pub mod extract;

// Ladder reconstruction
pub mod reconstruct;

// Observed clue matching
pub mod matcher;

// Board reconciliation
pub mod reconcile;

// Solve sessions
pub mod session;

// Answer page sources
pub mod source;

// Tracing setup
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
