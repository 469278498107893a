//! Command implementations

pub mod extract;
pub mod plan;
pub mod reconstruct;
pub mod simulate;
pub mod solve;

pub use extract::extract_path;
pub use plan::{PlanResult, plan_orders};
pub use reconstruct::{ReconstructResult, reconstruct_words};
pub use simulate::{SimulateOptions, SimulationStats, run_simulation};
pub use solve::{SolveOptions, SolveOutcome, board_for, solve_from_source};
