use super::solver_service::{KnapsackError, Result};
use super::value_objects::{RowSense, SolveStatus, SolverBackend, VariableType};

/// Tolerance used when checking feasibility and integrality of float solutions.
pub const EPSILON: f64 = 1e-9;

/// A 0/1 knapsack instance.
///
/// Immutable once built: the fields are private and [`Instance::new`] is the
/// only way in, so every instance in the program has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    profits: Vec<f64>,
    capacity: f64,
    weights: Vec<f64>,
}

impl Instance {
    pub fn new(profits: Vec<f64>, capacity: f64, weights: Vec<f64>) -> Result<Self> {
        if profits.is_empty() {
            return Err(KnapsackError::Domain(
                "instance must have at least one item".to_string(),
            ));
        }
        if profits.len() != weights.len() {
            return Err(KnapsackError::Domain(format!(
                "{} profits but {} weights",
                profits.len(),
                weights.len()
            )));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(KnapsackError::Domain(format!(
                "capacity must be a non-negative number, found {}",
                capacity
            )));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(KnapsackError::Domain(format!(
                "weight of item {} must be positive, found {}",
                i, w
            )));
        }
        if let Some((i, p)) = profits
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(KnapsackError::Domain(format!(
                "profit of item {} must be non-negative, found {}",
                i, p
            )));
        }

        Ok(Self {
            profits,
            capacity,
            weights,
        })
    }

    pub fn item_count(&self) -> usize {
        self.profits.len()
    }

    pub fn profits(&self) -> &[f64] {
        &self.profits
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Profit per unit of weight of item `i`.
    pub fn ratio(&self, i: usize) -> f64 {
        self.profits[i] / self.weights[i]
    }
}

/// Assignment of every item to [0, 1] together with its objective value
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub assignment: Vec<f64>,
    pub objective_value: f64,
}

impl Solution {
    /// Build a solution, computing the objective from the assignment.
    pub fn from_assignment(instance: &Instance, assignment: Vec<f64>) -> Self {
        let objective_value = dot(&assignment, instance.profits());
        Self {
            assignment,
            objective_value,
        }
    }

    pub fn total_weight(&self, instance: &Instance) -> f64 {
        dot(&self.assignment, instance.weights())
    }

    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.total_weight(instance) <= instance.capacity() + EPSILON
    }

    /// Indices of the items taken partially.
    pub fn fractional_items(&self) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x > 0.0 && x < 1.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of the items taken fully.
    pub fn selected_items(&self) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x == 1.0)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_integral(&self) -> bool {
        self.assignment.iter().all(|&x| x == 0.0 || x == 1.0)
    }
}

/// Dot product as a fold over two equally long sequences.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

/// Configuration for the MIP backends
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit in seconds; no limit when unset
    pub time_limit: Option<f64>,
    /// Let the backend print its own log to the console
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::default(),
            time_limit: None,
            verbose: false,
        }
    }
}

impl SolverConfig {
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Linear row `Σ coeff * x[col] (≤|≥) bound`
#[derive(Debug, Clone)]
pub struct Row {
    pub sense: RowSense,
    pub terms: Vec<(usize, f64)>,
    pub bound: f64,
    pub name: String,
}

impl Row {
    pub fn at_most(terms: Vec<(usize, f64)>, bound: f64) -> Self {
        Self {
            sense: RowSense::AtMost,
            terms,
            bound,
            name: String::new(),
        }
    }

    pub fn at_least(terms: Vec<(usize, f64)>, bound: f64) -> Self {
        Self {
            sense: RowSense::AtLeast,
            terms,
            bound,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Maximization program handed to a MIP backend. Every variable is bounded
/// in [0, 1].
#[derive(Debug, Clone)]
pub struct LinearProgram {
    pub name: String,
    pub objective: Vec<f64>,
    pub variable_types: Vec<VariableType>,
    pub rows: Vec<Row>,
}

impl LinearProgram {
    pub fn maximize(objective: Vec<f64>, variable_type: VariableType) -> Self {
        let variable_types = vec![variable_type; objective.len()];
        Self {
            name: String::new(),
            objective,
            variable_types,
            rows: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn add_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.variable_types.contains(&VariableType::Binary)
    }
}

/// What a backend returned for a [`LinearProgram`]
#[derive(Debug, Clone)]
pub struct LpOutcome {
    pub status: SolveStatus,
    pub values: Vec<f64>,
    pub objective: f64,
}

impl LpOutcome {
    pub fn optimal(program: &LinearProgram, values: Vec<f64>) -> Self {
        let objective = dot(&program.objective, &values);
        Self {
            status: SolveStatus::Optimal,
            values,
            objective,
        }
    }

    pub fn failed(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: 0.0,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}
