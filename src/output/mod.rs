//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_plan, print_puzzle, print_reconstruction, print_simulation, print_solve};
