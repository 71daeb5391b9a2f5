use crate::domain::{
    models::SolverConfig,
    solver_service::{KnapsackError, KnapsackSolver, Result, SolverService},
    value_objects::{Method, SolverBackend},
};
use crate::solver::{ExactKnapsack, RelaxedDantzig, ViableDantzig};
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create the MIP backend for a configuration
    pub fn create_backend(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            #[cfg(feature = "highs")]
            SolverBackend::Highs => Ok(Arc::new(crate::solver::HighsSolver::new())),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => Ok(Arc::new(crate::solver::CoinCbcSolver::new())),
            #[allow(unreachable_patterns)]
            unavailable => Err(KnapsackError::Solver(format!(
                "backend {} is not compiled into this build",
                unavailable
            ))),
        }
    }

    /// Create the solver for a method
    pub fn create(method: Method, config: &SolverConfig) -> Result<Box<dyn KnapsackSolver>> {
        match method {
            Method::RelaxedDantzig => Ok(Box::new(RelaxedDantzig::new())),
            Method::ViableDantzig => Ok(Box::new(ViableDantzig::new())),
            Method::Exact => {
                let backend = Self::create_backend(config.backend)?;
                Ok(Box::new(ExactKnapsack::new(backend, config.clone())))
            }
        }
    }

    /// Create the solver for a method given by name
    pub fn create_method(name: &str, config: &SolverConfig) -> Result<Box<dyn KnapsackSolver>> {
        Self::create(name.parse()?, config)
    }
}
