// Solvers: greedy heuristics, the exact adapter and the MIP backends behind it

pub mod coverage;
pub mod dantzig;
pub mod exact;
pub mod factory;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
#[cfg(feature = "highs")]
pub mod highs_solver;

pub use coverage::{coverage_program, solve_coverage};
pub use dantzig::{RelaxedDantzig, ViableDantzig};
pub use exact::ExactKnapsack;
pub use factory::SolverFactory;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
