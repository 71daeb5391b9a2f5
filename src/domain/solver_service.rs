// Domain service interfaces for solving knapsack instances and the linear
// programs handed to MIP backends

use std::path::PathBuf;

use super::models::{Instance, LinearProgram, LpOutcome, Solution, SolverConfig};
use super::value_objects::Method;

/// Error types for loading and solving knapsack instances
#[derive(Debug, thiserror::Error)]
pub enum KnapsackError {
    #[error("Malformed instance: {0}")]
    Format(String),

    #[error("Invalid instance data: {0}")]
    Domain(String),

    #[error("Solver failed: {0}")]
    Solver(String),

    #[error("Unknown solution method `{0}`")]
    Method(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Instance {}: {source}", path.display())]
    Instance {
        path: PathBuf,
        #[source]
        source: Box<KnapsackError>,
    },
}

impl KnapsackError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KnapsackError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the path of the instance being processed.
    pub fn for_instance(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ KnapsackError::Instance { .. } => already,
            other => KnapsackError::Instance {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, KnapsackError>;

/// A way of solving a knapsack instance.
///
/// Implementations are pure: each call takes the instance read-only and
/// returns a fresh [`Solution`].
pub trait KnapsackSolver {
    fn solve(&self, instance: &Instance) -> Result<Solution>;

    fn method(&self) -> Method;
}

/// Interface of the black-box MIP backends.
///
/// This is the seam that lets HiGHS and CBC be swapped without touching the
/// knapsack and coverage encodings.
pub trait SolverService: Send + Sync {
    /// Solve a linear program. Non-optimal outcomes are reported through
    /// [`LpOutcome::status`]; `Err` is reserved for backend failures.
    fn solve(&self, program: &LinearProgram, config: &SolverConfig) -> Result<LpOutcome>;

    /// Validate a program without solving it
    fn validate(&self, program: &LinearProgram) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = program.num_variables();

        if num_vars == 0 {
            errors.push("program must have at least one variable".to_string());
        }

        if program.variable_types.len() != num_vars {
            errors.push(format!(
                "{} variable types given for {} objective coefficients",
                program.variable_types.len(),
                num_vars
            ));
        }

        for (i, row) in program.rows.iter().enumerate() {
            if let Some(&(col, _)) = row.terms.iter().find(|(col, _)| *col >= num_vars) {
                errors.push(format!(
                    "row {} '{}' references variable {} but the program has {}",
                    i, row.name, col, num_vars
                ));
            }
            if !row.bound.is_finite() {
                errors.push(format!("row {} '{}' has a non-finite bound", i, row.name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(KnapsackError::Solver(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;
}
