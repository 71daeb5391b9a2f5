// HiGHS Solver Adapter
// Translates a LinearProgram into a HiGHS row problem

use crate::domain::{
    models::{LinearProgram, LpOutcome, SolverConfig},
    solver_service::{KnapsackError, Result, SolverService},
    value_objects::{RowSense, SolveStatus, VariableType},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, program: &LinearProgram, config: &SolverConfig) -> Result<LpOutcome> {
        self.validate(program)?;

        let start_time = Instant::now();

        // Add variables first, then rows
        let mut pb = RowProblem::default();
        let mut cols = Vec::with_capacity(program.num_variables());

        for (&coeff, &variable_type) in program.objective.iter().zip(&program.variable_types) {
            let col = match variable_type {
                VariableType::Binary => pb.add_integer_column(coeff, 0.0..=1.0),
                VariableType::Continuous => pb.add_column(coeff, 0.0..=1.0),
            };
            cols.push(col);
        }

        for row in &program.rows {
            let terms: Vec<_> = row
                .terms
                .iter()
                .filter(|(_, coeff)| *coeff != 0.0)
                .map(|&(i, coeff)| (cols[i], coeff))
                .collect();

            match row.sense {
                RowSense::AtMost => pb.add_row(..=row.bound, &terms),
                RowSense::AtLeast => pb.add_row(row.bound.., &terms),
            }
        }

        let mut model = pb.optimise(Sense::Maximise);
        model.set_option("output_flag", config.verbose);
        if let Some(seconds) = config.time_limit {
            model.set_option("time_limit", seconds);
        }

        let solved = model.solve();
        log::debug!(
            "HiGHS finished '{}' in {:.3} ms with status {:?}",
            program.name,
            start_time.elapsed().as_secs_f64() * 1000.0,
            solved.status()
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                Ok(LpOutcome::optimal(program, values))
            }
            HighsModelStatus::Infeasible => Ok(LpOutcome::failed(SolveStatus::Infeasible)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(LpOutcome::failed(SolveStatus::Unbounded))
            }
            HighsModelStatus::ReachedTimeLimit => Ok(LpOutcome::failed(SolveStatus::TimeLimit)),
            status => Err(KnapsackError::Solver(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
