// Domain value objects representing core business concepts

use std::fmt;
use std::str::FromStr;

use super::solver_service::KnapsackError;

/// Type of decision variable handed to a MIP backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous value in [0, 1]
    Continuous,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

/// Type of row comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSense {
    /// Less than or equal (≤)
    AtMost,
    /// Greater than or equal (≥)
    AtLeast,
}

/// Status reported by a MIP backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Found optimal solution
    Optimal,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Time limit reached before optimality was proven
    TimeLimit,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::TimeLimit => write!(f, "Time Limit Reached"),
        }
    }
}

/// MIP backend used by the exact solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// HiGHS (default)
    #[default]
    Highs,
    /// COIN-OR CBC
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "highs" => Ok(SolverBackend::Highs),
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverBackend::CoinCbc),
            other => Err(KnapsackError::Solver(format!("unknown backend `{}`", other))),
        }
    }
}

/// Knapsack solution method compared by the experiment harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Dantzig greedy on the LP relaxation
    RelaxedDantzig,
    /// Relaxed Dantzig with the split item rounded down
    ViableDantzig,
    /// Exact 0/1 solve through a MIP backend
    Exact,
}

impl Method {
    /// All methods, in report column order.
    pub const ALL: [Method; 3] = [Method::RelaxedDantzig, Method::ViableDantzig, Method::Exact];

    pub fn name(&self) -> &'static str {
        match self {
            Method::RelaxedDantzig => "relaxed_dantzig",
            Method::ViableDantzig => "viable_dantzig",
            Method::Exact => "gurobi_knapsack",
        }
    }

    /// Column name used in the comparison report.
    pub fn report_column(&self) -> &'static str {
        match self {
            Method::RelaxedDantzig => "relaxed_cost",
            Method::ViableDantzig => "viable_cost",
            Method::Exact => "gurobi_cost",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relaxed_dantzig" | "relaxed" => Ok(Method::RelaxedDantzig),
            "viable_dantzig" | "viable" => Ok(Method::ViableDantzig),
            "gurobi_knapsack" | "exact" => Ok(Method::Exact),
            other => Err(KnapsackError::Method(other.to_string())),
        }
    }
}

/// What the harness does when one instance fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the batch on the first failing instance
    #[default]
    FailFast,
    /// Record the failure and keep going
    Continue,
}
