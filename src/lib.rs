// Domain layer: instances, solutions, errors and solver contracts
pub mod domain;

// Application layer: the experiment harness
pub mod application;

// Infrastructure layer: instance files, batch layout, reports
pub mod infrastructure;

// Solvers: Dantzig heuristics, exact adapter, MIP backends
pub mod solver;

// Re-export commonly used types
pub use domain::{
    CoveragePlan, CoverageProblem, FailurePolicy, Instance, KnapsackError, KnapsackSolver, Method,
    Solution, SolveStatus, SolverBackend, SolverConfig, SolverService, Tower, VariableType,
};

pub use application::{BatchOutcome, ExperimentHarness, HarnessConfig};

pub use infrastructure::{load_instance, parse_instance, ComparisonRecord, ReportWriter};

pub use solver::{solve_coverage, ExactKnapsack, RelaxedDantzig, SolverFactory, ViableDantzig};

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
