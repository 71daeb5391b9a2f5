// Cell tower coverage as a MIP: y[r] marks a covered region, x[t] a built tower

use crate::domain::{
    coverage::{CoveragePlan, CoverageProblem},
    models::{LinearProgram, Row, SolverConfig},
    solver_service::{KnapsackError, Result, SolverService},
    value_objects::{SolveStatus, VariableType},
};

/// Encode the coverage problem. Columns `0..regions` are the `y` variables,
/// the tower columns `x` follow.
///
/// ```text
/// max  Σ population[r] · y[r]
/// s.t. Σ cost[t] · x[t] ≤ budget
///      Σ_{t covers r} x[t] − y[r] ≥ 0      for every region r
/// ```
pub fn coverage_program(problem: &CoverageProblem) -> LinearProgram {
    let regions = problem.num_regions();

    let mut objective = problem.populations.clone();
    objective.resize(regions + problem.towers.len(), 0.0);

    let budget_terms = problem
        .towers
        .iter()
        .enumerate()
        .map(|(t, tower)| (regions + t, tower.cost))
        .collect();

    let mut program = LinearProgram::maximize(objective, VariableType::Binary)
        .with_name("cell_tower_coverage")
        .add_row(Row::at_most(budget_terms, problem.budget).with_name("budget"));

    for r in 0..regions {
        let mut terms: Vec<(usize, f64)> = problem
            .towers_covering(r)
            .map(|t| (regions + t, 1.0))
            .collect();
        terms.push((r, -1.0));
        program = program
            .add_row(Row::at_least(terms, 0.0).with_name(format!("cover_region_{}", r)));
    }

    program
}

/// Choose the towers to build.
pub fn solve_coverage(
    problem: &CoverageProblem,
    backend: &dyn SolverService,
    config: &SolverConfig,
) -> Result<CoveragePlan> {
    let program = coverage_program(problem);
    let outcome = backend.solve(&program, config)?;

    if outcome.status != SolveStatus::Optimal {
        // building nothing is always feasible
        return Err(KnapsackError::Solver(format!(
            "{} reported {} for the coverage problem",
            backend.name(),
            outcome.status
        )));
    }

    let regions = problem.num_regions();
    if outcome.values.len() != program.num_variables() {
        return Err(KnapsackError::Solver(format!(
            "{} returned {} values for {} variables",
            backend.name(),
            outcome.values.len(),
            program.num_variables()
        )));
    }
    let chosen = |v: f64| v > 0.5;

    let built_towers: Vec<usize> = outcome.values[regions..]
        .iter()
        .enumerate()
        .filter(|(_, v)| chosen(**v))
        .map(|(t, _)| t)
        .collect();
    let total_cost: f64 = built_towers.iter().map(|&t| problem.towers[t].cost).sum();

    // a region counts as covered only if a built tower reaches it
    let covered_regions: Vec<usize> = (0..regions)
        .filter(|&r| {
            chosen(outcome.values[r])
                && problem.towers_covering(r).any(|t| built_towers.contains(&t))
        })
        .collect();
    let covered_population: f64 = covered_regions
        .iter()
        .map(|&r| problem.populations[r])
        .sum();

    let total = problem.total_population();
    let coverage_percent = if total > 0.0 {
        (10_000.0 * covered_population / total).round() / 100.0
    } else {
        0.0
    };

    log::info!(
        "coverage plan: towers {:?}, {:.2}% of the population",
        built_towers,
        coverage_percent
    );

    Ok(CoveragePlan {
        built_towers,
        covered_regions,
        covered_population,
        total_cost,
        coverage_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coverage::Tower;

    #[test]
    fn program_layout() {
        let problem = CoverageProblem::new(
            vec![10.0, 20.0],
            vec![Tower::new(vec![0], 1.0), Tower::new(vec![0, 1], 3.0)],
            2.0,
        )
        .unwrap();
        let program = coverage_program(&problem);

        assert_eq!(program.objective, vec![10.0, 20.0, 0.0, 0.0]);
        assert_eq!(program.rows.len(), 3);
        assert_eq!(program.rows[0].terms, vec![(2, 1.0), (3, 3.0)]);
        assert_eq!(program.rows[1].terms, vec![(2, 1.0), (3, 1.0), (0, -1.0)]);
        assert_eq!(program.rows[2].terms, vec![(3, 1.0), (1, -1.0)]);
    }

    #[cfg(feature = "highs")]
    #[test]
    fn sample_plan_respects_budget() {
        use crate::solver::HighsSolver;

        let problem = CoverageProblem::sample();
        let plan =
            solve_coverage(&problem, &HighsSolver::new(), &SolverConfig::default()).unwrap();

        assert!(plan.total_cost <= problem.budget + 1e-9);
        assert!(plan.coverage_percent > 0.0 && plan.coverage_percent <= 100.0);
        // towers 0, 2 and 4 cost 14.2 and reach every region
        assert_eq!(plan.covered_population, 7051.0);
        assert_eq!(plan.coverage_percent, 100.0);
    }
}
