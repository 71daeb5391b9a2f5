// Experiment harness: run every method on every instance of a batch and
// record the objective values side by side

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::domain::{
    models::{Instance, SolverConfig},
    solver_service::{KnapsackError, KnapsackSolver, Result},
    value_objects::{FailurePolicy, Method},
};
use crate::infrastructure::{
    batch::discover_instances,
    instance_loader::load_instance,
    report::{ComparisonRecord, ReportWriter},
};
use crate::solver::SolverFactory;

/// Configuration of an experiment run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Methods to compare, in report column order
    pub methods: Vec<Method>,
    pub failure_policy: FailurePolicy,
    pub solver: SolverConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            methods: Method::ALL.to_vec(),
            failure_policy: FailurePolicy::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// An instance the batch could not process
#[derive(Debug)]
pub struct InstanceFailure {
    pub path: PathBuf,
    pub error: KnapsackError,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<ComparisonRecord>,
    pub failures: Vec<InstanceFailure>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ExperimentHarness {
    solvers: Vec<Box<dyn KnapsackSolver>>,
    failure_policy: FailurePolicy,
}

impl ExperimentHarness {
    /// Build the solvers named in the configuration.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let solvers = config
            .methods
            .iter()
            .map(|&method| SolverFactory::create(method, &config.solver))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::with_solvers(solvers, config.failure_policy))
    }

    pub fn with_solvers(solvers: Vec<Box<dyn KnapsackSolver>>, failure_policy: FailurePolicy) -> Self {
        Self {
            solvers,
            failure_policy,
        }
    }

    pub fn methods(&self) -> Vec<Method> {
        self.solvers.iter().map(|s| s.method()).collect()
    }

    /// Run every method on one loaded instance.
    pub fn compare(&self, name: &str, instance: &Instance) -> Result<ComparisonRecord> {
        let mut objectives = Vec::with_capacity(self.solvers.len());

        for solver in &self.solvers {
            let start_time = Instant::now();
            let solution = solver.solve(instance)?;
            log::debug!(
                "{} {}: objective {} in {:.3} ms",
                name,
                solver.method(),
                solution.objective_value,
                start_time.elapsed().as_secs_f64() * 1000.0
            );
            objectives.push((solver.method(), solution.objective_value));
        }

        let record = ComparisonRecord {
            instance_name: name.to_string(),
            objectives,
        };
        check_bounds(&record);
        Ok(record)
    }

    /// Load and compare a single instance file.
    pub fn run_instance(&self, path: impl AsRef<Path>) -> Result<ComparisonRecord> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        load_instance(path)
            .and_then(|instance| self.compare(&name, &instance))
            .map_err(|e| e.for_instance(path))
    }

    /// Run the whole batch under `root`, writing a report line per instance.
    ///
    /// With [`FailurePolicy::FailFast`] the first failing instance aborts the
    /// run and the report keeps the lines written before it. With
    /// [`FailurePolicy::Continue`] failures are collected in the outcome.
    pub fn run_batch<W: Write>(
        &self,
        root: impl AsRef<Path>,
        report: &mut ReportWriter<W>,
    ) -> Result<BatchOutcome> {
        let files = discover_instances(root)?;
        report.write_header(&self.methods())?;

        let mut outcome = BatchOutcome::default();
        for file in files {
            log::info!("solving {}/{}", file.group, file.name);

            match self.run_instance(&file.path) {
                Ok(record) => {
                    report.write_record(&record)?;
                    outcome.records.push(record);
                }
                Err(error) => match self.failure_policy {
                    FailurePolicy::FailFast => return Err(error),
                    FailurePolicy::Continue => {
                        log::warn!("skipping: {}", error);
                        outcome.failures.push(InstanceFailure {
                            path: file.path,
                            error,
                        });
                    }
                },
            }
        }

        log::info!(
            "batch done: {} instances solved, {} failed",
            outcome.records.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }
}

/// Absolute slack allowed before a bound ordering is reported.
const BOUND_TOLERANCE: f64 = 1e-6;

/// Whether the relaxed ≥ exact ≥ viable ordering is broken by more than
/// [`BOUND_TOLERANCE`]. Methods missing from the record are not compared.
fn objectives_out_of_order(record: &ComparisonRecord) -> bool {
    let relaxed = record.objective(Method::RelaxedDantzig);
    let viable = record.objective(Method::ViableDantzig);
    let exact = record.objective(Method::Exact);

    let violated = |upper: Option<f64>, lower: Option<f64>| match (upper, lower) {
        (Some(upper), Some(lower)) => lower > upper + BOUND_TOLERANCE,
        _ => false,
    };

    violated(relaxed, viable) || violated(relaxed, exact) || violated(exact, viable)
}

/// Warn when the relaxed ≥ exact ≥ viable ordering does not hold.
fn check_bounds(record: &ComparisonRecord) {
    if objectives_out_of_order(record) {
        let relaxed = record.objective(Method::RelaxedDantzig);
        let viable = record.objective(Method::ViableDantzig);
        let exact = record.objective(Method::Exact);
        log::warn!(
            "{}: objectives out of order (relaxed {:?}, exact {:?}, viable {:?})",
            record.instance_name,
            relaxed,
            exact,
            viable
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{RelaxedDantzig, ViableDantzig};

    fn heuristics(policy: FailurePolicy) -> ExperimentHarness {
        let solvers: Vec<Box<dyn KnapsackSolver>> =
            vec![Box::new(RelaxedDantzig::new()), Box::new(ViableDantzig::new())];
        ExperimentHarness::with_solvers(solvers, policy)
    }

    #[test]
    fn compare_collects_objectives_in_order() {
        let instance =
            Instance::new(vec![60.0, 100.0, 120.0], 50.0, vec![10.0, 20.0, 30.0]).unwrap();
        let record = heuristics(FailurePolicy::FailFast)
            .compare("textbook", &instance)
            .unwrap();

        assert_eq!(record.instance_name, "textbook");
        assert_eq!(record.objectives.len(), 2);
        assert_eq!(record.objectives[0].0, Method::RelaxedDantzig);
        assert!((record.objectives[0].1 - 240.0).abs() < 1e-9);
        assert_eq!(record.objectives[1], (Method::ViableDantzig, 160.0));
    }

    fn record(objectives: Vec<(Method, f64)>) -> ComparisonRecord {
        ComparisonRecord {
            instance_name: "bounds".to_string(),
            objectives,
        }
    }

    #[test]
    fn bound_ordering_allows_tolerance() {
        let within = record(vec![
            (Method::RelaxedDantzig, 220.0),
            (Method::ViableDantzig, 220.0000005),
            (Method::Exact, 220.0),
        ]);
        assert!(!objectives_out_of_order(&within));

        let beyond = record(vec![
            (Method::RelaxedDantzig, 220.0),
            (Method::ViableDantzig, 160.0),
            (Method::Exact, 220.00001),
        ]);
        assert!(objectives_out_of_order(&beyond));
    }

    #[test]
    fn bound_ordering_skips_missing_methods() {
        let heuristics_only = record(vec![
            (Method::RelaxedDantzig, 240.0),
            (Method::ViableDantzig, 160.0),
        ]);
        assert!(!objectives_out_of_order(&heuristics_only));

        let inverted = record(vec![
            (Method::RelaxedDantzig, 150.0),
            (Method::ViableDantzig, 160.0),
        ]);
        assert!(objectives_out_of_order(&inverted));
    }

    #[test]
    fn run_instance_names_the_failing_path() {
        let err = heuristics(FailurePolicy::FailFast)
            .run_instance("/nonexistent/10/broken.txt")
            .unwrap_err();

        assert!(err.to_string().contains("/nonexistent/10/broken.txt"));
        assert!(matches!(err, KnapsackError::Instance { .. }));
    }

    #[test]
    fn default_config_compares_all_methods() {
        let config = HarnessConfig::default();
        assert_eq!(config.methods, Method::ALL.to_vec());
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
    }
}
