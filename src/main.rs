use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use knapsack_lab::{
    infrastructure::{export_lp, report::timestamped_report_path},
    load_instance, solve_coverage, solver::coverage_program,
    CoverageProblem, ExperimentHarness, FailurePolicy, HarnessConfig, Method, ReportWriter,
    SolverBackend, SolverConfig, SolverFactory,
};

#[derive(Debug, Parser)]
#[command(version, about = "Dantzig heuristics against exact MIP solves on 0/1 knapsack instances")]
struct Cli {
    /// MIP backend used for exact solves (highs or cbc)
    #[arg(long, global = true, default_value = "highs")]
    backend: SolverBackend,

    /// Time limit for each exact solve, in seconds
    #[arg(long, global = true)]
    time_limit: Option<f64>,

    /// Show the MIP backend's own log
    #[arg(long, global = true)]
    solver_output: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve one instance file with every method and print the solutions
    Solve {
        file: PathBuf,
    },

    /// Compare the methods on every instance of a batch directory
    Batch {
        /// Directory of group directories holding instance files
        root: PathBuf,

        /// Where the timestamped report is written
        #[arg(long, default_value = "experiments/knapsack")]
        output_dir: PathBuf,

        /// Record failing instances and go on instead of aborting
        #[arg(long)]
        keep_going: bool,

        /// Methods to compare, in column order
        #[arg(long, value_delimiter = ',')]
        methods: Option<Vec<String>>,
    },

    /// Plan cell towers for the classroom coverage data set
    Towers {
        /// Also write the coverage model in LP format to this path
        #[arg(long, value_name = "PATH")]
        write_lp: Option<PathBuf>,
    },
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig::default()
            .with_backend(self.backend)
            .with_time_limit(self.time_limit)
            .with_verbose(self.solver_output)
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    Builder::new().filter_level(cli.log_level()).init();

    let solver_config = cli.solver_config();
    match cli.command {
        Command::Solve { file } => solve(&file, &solver_config),
        Command::Batch {
            root,
            output_dir,
            keep_going,
            methods,
        } => batch(&root, &output_dir, keep_going, methods, solver_config),
        Command::Towers { write_lp } => towers(write_lp.as_deref(), &solver_config),
    }
}

fn solve(file: &Path, config: &SolverConfig) -> Result<()> {
    let instance =
        load_instance(file).with_context(|| format!("loading {}", file.display()))?;

    for method in Method::ALL {
        let solver = SolverFactory::create(method, config)?;
        let solution = solver
            .solve(&instance)
            .with_context(|| format!("{} on {}", method, file.display()))?;

        println!("{}", method);
        println!("  x : {:?}", solution.assignment);
        println!("  objective function value : {}", solution.objective_value);
    }
    Ok(())
}

fn batch(
    root: &Path,
    output_dir: &Path,
    keep_going: bool,
    methods: Option<Vec<String>>,
    solver_config: SolverConfig,
) -> Result<()> {
    let mut config = HarnessConfig::default().with_solver(solver_config);
    if let Some(names) = methods {
        let methods = names
            .iter()
            .map(|name| name.parse::<Method>())
            .collect::<Result<Vec<_>, _>>()?;
        config = config.with_methods(methods);
    }
    if keep_going {
        config = config.with_failure_policy(FailurePolicy::Continue);
    }

    let harness = ExperimentHarness::new(&config).context("setting up the solvers")?;
    let mut report = ReportWriter::create(timestamped_report_path(output_dir, chrono::Utc::now()))?;

    let outcome = harness
        .run_batch(root, &mut report)
        .with_context(|| format!("batch aborted; partial report in {}", report.path().display()))?;

    println!(
        "{} instances written to {}",
        outcome.records.len(),
        report.path().display()
    );
    if !outcome.is_complete() {
        for failure in &outcome.failures {
            eprintln!("failed: {}", failure.error);
        }
        bail!("{} instances failed", outcome.failures.len());
    }
    Ok(())
}

fn towers(write_lp: Option<&Path>, config: &SolverConfig) -> Result<()> {
    let problem = CoverageProblem::sample();
    if let Some(path) = write_lp {
        export_lp(&coverage_program(&problem), path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let backend = SolverFactory::create_backend(config.backend)?;
    let plan = solve_coverage(&problem, backend.as_ref(), config)?;

    for tower in &plan.built_towers {
        println!("Build a tower at location {}.", tower);
    }
    println!(
        "Cost {} of budget {}; the plan covers {} % of the population.",
        plan.total_cost, problem.budget, plan.coverage_percent
    );
    Ok(())
}
