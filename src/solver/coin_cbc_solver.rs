// COIN-OR CBC Solver Adapter, driven through good_lp

use crate::domain::{
    models::{LinearProgram, LpOutcome, SolverConfig},
    solver_service::{KnapsackError, Result, SolverService},
    value_objects::{RowSense, SolveStatus, VariableType},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, program: &LinearProgram, config: &SolverConfig) -> Result<LpOutcome> {
        self.validate(program)?;

        let start_time = Instant::now();

        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = program
            .variable_types
            .iter()
            .map(|variable_type| match variable_type {
                VariableType::Binary => vars.add(variable().binary()),
                VariableType::Continuous => vars.add(variable().min(0.0).max(1.0)),
            })
            .collect();

        // good_lp minimises, so negate the maximisation objective
        let mut obj_expr: Expression = 0.into();
        for (i, &coeff) in program.objective.iter().enumerate() {
            if coeff != 0.0 {
                obj_expr += -coeff * lp_variables[i];
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", if config.verbose { "1" } else { "0" });
        if let Some(seconds) = config.time_limit {
            lp_model.set_parameter("seconds", &seconds.to_string());
        }

        for row in &program.rows {
            let mut lhs: Expression = 0.into();
            for &(i, coeff) in &row.terms {
                if coeff != 0.0 {
                    lhs += coeff * lp_variables[i];
                }
            }

            lp_model = match row.sense {
                RowSense::AtMost => lp_model.with(lhs.leq(row.bound)),
                RowSense::AtLeast => lp_model.with(lhs.geq(row.bound)),
            };
        }

        let solution_result = lp_model.solve();
        log::debug!(
            "CBC finished '{}' in {:.3} ms",
            program.name,
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        match solution_result {
            Ok(sol) => {
                let values = lp_variables.iter().map(|&var| sol.value(var)).collect();
                Ok(LpOutcome::optimal(program, values))
            }
            Err(ResolutionError::Infeasible) => Ok(LpOutcome::failed(SolveStatus::Infeasible)),
            Err(ResolutionError::Unbounded) => Ok(LpOutcome::failed(SolveStatus::Unbounded)),
            Err(e) => Err(KnapsackError::Solver(format!("CBC failed: {:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
