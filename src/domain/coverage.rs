// Cell tower coverage: choose tower sites under a budget to cover as many
// people as possible (maximal covering location)

use super::solver_service::{KnapsackError, Result};

/// Candidate tower site
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    /// Regions reached by a tower built here
    pub covers: Vec<usize>,
    /// Building cost
    pub cost: f64,
}

impl Tower {
    pub fn new(covers: Vec<usize>, cost: f64) -> Self {
        Self { covers, cost }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageProblem {
    /// Population of each region
    pub populations: Vec<f64>,
    pub towers: Vec<Tower>,
    pub budget: f64,
}

impl CoverageProblem {
    pub fn new(populations: Vec<f64>, towers: Vec<Tower>, budget: f64) -> Result<Self> {
        if let Some((r, p)) = populations
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(KnapsackError::Domain(format!(
                "population of region {} must be non-negative, found {}",
                r, p
            )));
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(KnapsackError::Domain(format!(
                "budget must be non-negative, found {}",
                budget
            )));
        }
        for (t, tower) in towers.iter().enumerate() {
            if !tower.cost.is_finite() || tower.cost < 0.0 {
                return Err(KnapsackError::Domain(format!(
                    "cost of tower {} must be non-negative, found {}",
                    t, tower.cost
                )));
            }
            if let Some(r) = tower.covers.iter().find(|&&r| r >= populations.len()) {
                return Err(KnapsackError::Domain(format!(
                    "tower {} covers region {} but there are only {} regions",
                    t,
                    r,
                    populations.len()
                )));
            }
        }

        Ok(Self {
            populations,
            towers,
            budget,
        })
    }

    /// Classroom data set: nine regions, six candidate sites, budget of 20
    /// (populations and costs in millions).
    pub fn sample() -> Self {
        Self {
            populations: vec![
                523.0, 690.0, 420.0, 1010.0, 1200.0, 850.0, 400.0, 1008.0, 950.0,
            ],
            towers: vec![
                Tower::new(vec![0, 1, 5], 4.2),
                Tower::new(vec![0, 7, 8], 6.1),
                Tower::new(vec![2, 3, 4, 6], 5.2),
                Tower::new(vec![2, 5, 6], 5.5),
                Tower::new(vec![0, 2, 6, 7, 8], 4.8),
                Tower::new(vec![3, 4, 8], 9.2),
            ],
            budget: 20.0,
        }
    }

    pub fn num_regions(&self) -> usize {
        self.populations.len()
    }

    pub fn total_population(&self) -> f64 {
        self.populations.iter().sum()
    }

    /// Towers able to serve region `r`.
    pub fn towers_covering(&self, r: usize) -> impl Iterator<Item = usize> + '_ {
        self.towers
            .iter()
            .enumerate()
            .filter(move |(_, tower)| tower.covers.contains(&r))
            .map(|(t, _)| t)
    }
}

/// Which towers to build and what they cover
#[derive(Debug, Clone, PartialEq)]
pub struct CoveragePlan {
    pub built_towers: Vec<usize>,
    pub covered_regions: Vec<usize>,
    pub covered_population: f64,
    pub total_cost: f64,
    /// Share of the population covered, in percent rounded to two decimals
    pub coverage_percent: f64,
}
