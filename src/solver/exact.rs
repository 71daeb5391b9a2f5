// Exact knapsack solve delegated to a MIP backend

use std::sync::Arc;

use crate::domain::{
    models::{Instance, LinearProgram, Row, Solution, SolverConfig, EPSILON},
    solver_service::{KnapsackError, KnapsackSolver, Result, SolverService},
    value_objects::{Method, SolveStatus, VariableType},
};

/// Integrality tolerance for values reported by a backend.
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Encode an instance as `max Σ p·x  s.t.  Σ w·x ≤ c,  x ∈ [0, 1]`.
pub fn knapsack_program(instance: &Instance, variable_type: VariableType) -> LinearProgram {
    let terms = instance.weights().iter().copied().enumerate().collect();

    LinearProgram::maximize(instance.profits().to_vec(), variable_type)
        .with_name("knapsack")
        .add_row(Row::at_most(terms, instance.capacity()).with_name("capacity"))
}

/// Knapsack solver backed by a MIP backend.
///
/// With [`VariableType::Binary`] (the default) this is the provably optimal
/// 0/1 solve; with [`VariableType::Continuous`] the backend solves the LP
/// relaxation instead.
pub struct ExactKnapsack {
    backend: Arc<dyn SolverService>,
    variable_type: VariableType,
    config: SolverConfig,
}

impl ExactKnapsack {
    pub fn new(backend: Arc<dyn SolverService>, config: SolverConfig) -> Self {
        Self {
            backend,
            variable_type: VariableType::Binary,
            config,
        }
    }

    pub fn with_variable_type(mut self, variable_type: VariableType) -> Self {
        self.variable_type = variable_type;
        self
    }
}

impl KnapsackSolver for ExactKnapsack {
    fn solve(&self, instance: &Instance) -> Result<Solution> {
        let program = knapsack_program(instance, self.variable_type);
        let outcome = self.backend.solve(&program, &self.config)?;

        match outcome.status {
            SolveStatus::Optimal => {}
            // the all-zero assignment is always feasible, so this is a backend fault
            status => {
                return Err(KnapsackError::Solver(format!(
                    "{} reported {} for a knapsack instance",
                    self.backend.name(),
                    status
                )))
            }
        }

        if outcome.values.len() != instance.item_count() {
            return Err(KnapsackError::Solver(format!(
                "{} returned {} values for {} items",
                self.backend.name(),
                outcome.values.len(),
                instance.item_count()
            )));
        }

        let assignment = match self.variable_type {
            VariableType::Binary => snap_binary(&outcome.values)?,
            VariableType::Continuous => outcome
                .values
                .iter()
                .map(|v| v.clamp(0.0, 1.0))
                .collect(),
        };

        let solution = Solution::from_assignment(instance, assignment);
        if self.variable_type == VariableType::Binary && !solution.is_feasible(instance) {
            return Err(KnapsackError::Solver(format!(
                "{} returned an assignment of weight {} over capacity {}",
                self.backend.name(),
                solution.total_weight(instance),
                instance.capacity()
            )));
        }
        if (solution.objective_value - outcome.objective).abs()
            > INTEGRALITY_TOLERANCE * outcome.objective.abs().max(1.0)
        {
            log::debug!(
                "{} objective {} differs from recomputed {}",
                self.backend.name(),
                outcome.objective,
                solution.objective_value
            );
        }

        Ok(solution)
    }

    fn method(&self) -> Method {
        Method::Exact
    }
}

/// Round backend values to exactly 0 or 1.
fn snap_binary(values: &[f64]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let rounded = v.round();
            if (v - rounded).abs() > INTEGRALITY_TOLERANCE
                || !(-EPSILON..=1.0 + EPSILON).contains(&rounded)
            {
                Err(KnapsackError::Solver(format!(
                    "value {} of item {} is not binary",
                    v, i
                )))
            } else {
                Ok(rounded.max(0.0))
            }
        })
        .collect()
}
