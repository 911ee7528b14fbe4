//! CLI entry point. Reads the three CSV
//! inputs, runs one assignment variant (or all of them, for `compare`), and
//! writes the resulting `Assignment` + `Metrics` as JSON. `anyhow` is used
//! here and only here — every library crate below this binary returns its
//! own typed error.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use graph_store::Graph;
use model::{AssignStatus, Assignment, Config, Driver, Rider, TieBreakMode};
use rayon::prelude::*;
use serde::Serialize;
use solver::SolverError;

#[derive(Parser)]
#[command(name = "deride", about = "Fairness-aware ridesharing assignment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Greedy efficiency assigner.
    Deride(RunArgs),
    /// Greedy fairness assigner.
    DerideFair(RunArgs),
    /// ILP: maximize total riders served.
    MaxRiders(RunArgs),
    /// ILP: min-max scalarization of riders vs. load variance.
    MinMax(RunArgs),
    /// ILP: classical two-phase max-min of per-driver load.
    MaxMin(RunArgs),
    /// ILP: lexicographic max-min of per-driver load.
    MaxMinLex(RunArgs),
    /// Runs every variant above concurrently and prints them side by side.
    Compare(RunArgs),
}

#[derive(Args, Clone)]
struct RunArgs {
    graph: PathBuf,
    drivers: PathBuf,
    riders: PathBuf,

    /// Seed for the tie-breaking RNG. Omit for entropy-seeded, still
    /// deterministic-once-drawn, tie-breaking.
    #[arg(long)]
    seed: Option<u64>,

    /// Break ties by drawing from the seeded RNG instead of always picking
    /// the lowest-id candidate.
    #[arg(long)]
    random_tie_break: bool,

    #[arg(long)]
    corridor_radius: Option<f64>,

    #[arg(long)]
    iteration_cap: Option<usize>,
}

impl RunArgs {
    fn config(&self) -> Config {
        let mut config = Config {
            rng_seed: self.seed,
            ..Config::default()
        };
        if self.random_tie_break {
            config.tie_break_mode = TieBreakMode::Random;
        }
        if let Some(radius) = self.corridor_radius {
            config.corridor_radius = radius;
        }
        if let Some(cap) = self.iteration_cap {
            config.iteration_cap = Some(cap);
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = match cli.command {
        Command::Deride(args) => run_greedy(&args, solver::deride::assign)?,
        Command::DerideFair(args) => run_greedy(&args, solver::deride_fair::assign)?,
        Command::MaxRiders(args) => run_ilp(&args, solver::assign_max_riders)?,
        Command::MinMax(args) => run_ilp(&args, solver::assign_min_max)?,
        Command::MaxMin(args) => run_ilp(&args, solver::assign_max_min_two_phase)?,
        Command::MaxMinLex(args) => run_ilp(&args, solver::assign_max_min_lex)?,
        Command::Compare(args) => run_compare(&args)?,
    };
    std::process::exit(exit_code);
}

fn load_inputs(args: &RunArgs) -> anyhow::Result<(Graph, Vec<Driver>, Vec<Rider>, Config)> {
    let graph_file = File::open(&args.graph)
        .with_context(|| format!("opening graph file {}", args.graph.display()))?;
    let graph = ingest::read_graph(graph_file).context("parsing graph.csv")?;

    let drivers_file = File::open(&args.drivers)
        .with_context(|| format!("opening drivers file {}", args.drivers.display()))?;
    let drivers = ingest::read_drivers(drivers_file, &graph).context("parsing drivers.csv")?;

    let riders_file = File::open(&args.riders)
        .with_context(|| format!("opening riders file {}", args.riders.display()))?;
    let riders = ingest::read_riders(riders_file, &graph).context("parsing riders.csv")?;

    Ok((graph, drivers, riders, args.config()))
}

fn run_greedy(
    args: &RunArgs,
    assign: impl Fn(&Graph, &[Driver], &[Rider], &Config) -> (Assignment, AssignStatus),
) -> anyhow::Result<i32> {
    let (graph, drivers, riders, config) = load_inputs(args)?;
    let started = Instant::now();
    let (assignment, status) = assign(&graph, &drivers, &riders, &config);
    log_elapsed(started);
    print_result(status, &assignment, &drivers);
    Ok(exit_code_for(status))
}

fn run_ilp(
    args: &RunArgs,
    assign: impl Fn(&Graph, &[Driver], &[Rider], &Config) -> Result<Assignment, SolverError>,
) -> anyhow::Result<i32> {
    let (graph, drivers, riders, config) = load_inputs(args)?;
    let started = Instant::now();
    let result = assign(&graph, &drivers, &riders, &config);
    log_elapsed(started);
    match result {
        Ok(assignment) => {
            print_result(AssignStatus::Solved, &assignment, &drivers);
            Ok(0)
        }
        Err(SolverError::Infeasible) => {
            print_result(AssignStatus::Infeasible, &Assignment::empty_for(&drivers), &drivers);
            Ok(1)
        }
        Err(other) => Err(other.into()),
    }
}

/// Logs a variant's wall-clock run time. The original prototype timed
/// its `__main__` with `time.time()`; here every invocation is timed and
/// logged via `tracing` rather than `print`.
fn log_elapsed(started: Instant) {
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "assignment run complete");
}

fn run_compare(args: &RunArgs) -> anyhow::Result<i32> {
    let (graph, drivers, riders, config) = load_inputs(args)?;

    let variants: Vec<(&'static str, VariantKind)> = vec![
        ("deride", VariantKind::Greedy(solver::deride::assign)),
        ("deride_fair", VariantKind::Greedy(solver::deride_fair::assign)),
        ("max_riders", VariantKind::Ilp(solver::assign_max_riders)),
        ("min_max", VariantKind::Ilp(solver::assign_min_max)),
        ("max_min", VariantKind::Ilp(solver::assign_max_min_two_phase)),
        ("max_min_lex", VariantKind::Ilp(solver::assign_max_min_lex)),
    ];

    let outputs: Vec<(&'static str, RunOutput)> = variants
        .into_par_iter()
        .map(|(name, kind)| {
            let started = Instant::now();
            let output = match kind {
                VariantKind::Greedy(f) => {
                    let (assignment, status) = f(&graph, &drivers, &riders, &config);
                    to_output(status, &assignment, &drivers)
                }
                VariantKind::Ilp(f) => match f(&graph, &drivers, &riders, &config) {
                    Ok(assignment) => to_output(AssignStatus::Solved, &assignment, &drivers),
                    Err(_) => to_output(
                        AssignStatus::Infeasible,
                        &Assignment::empty_for(&drivers),
                        &drivers,
                    ),
                },
            };
            tracing::info!(
                variant = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "variant run complete"
            );
            (name, output)
        })
        .collect();

    let comparison: Vec<_> = outputs
        .iter()
        .map(|(name, output)| serde_json::json!({ "variant": name, "result": output }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&comparison)?);
    Ok(0)
}

enum VariantKind {
    Greedy(fn(&Graph, &[Driver], &[Rider], &Config) -> (Assignment, AssignStatus)),
    Ilp(fn(&Graph, &[Driver], &[Rider], &Config) -> Result<Assignment, SolverError>),
}

fn exit_code_for(status: AssignStatus) -> i32 {
    match status {
        AssignStatus::Infeasible => 1,
        AssignStatus::Solved | AssignStatus::BudgetExceeded => 0,
    }
}

#[derive(Serialize)]
struct RunOutput {
    status: String,
    drivers: Vec<report::DriverLoad>,
    metrics: report::Metrics,
    load_balance_quality: &'static str,
}

fn to_output(status: AssignStatus, assignment: &Assignment, drivers: &[Driver]) -> RunOutput {
    let metrics = report::build(assignment, drivers);
    RunOutput {
        status: status.to_string(),
        drivers: report::driver_loads(assignment),
        load_balance_quality: load_balance_quality(metrics.std_dev),
        metrics,
    }
}

/// Qualitative banding over `Metrics::std_dev`, purely a presentation
/// concern layered on top of `report::Metrics`. The original prototype
/// classified its own printed std-dev the same way, against the same
/// 1.0/2.0 thresholds.
fn load_balance_quality(std_dev: f64) -> &'static str {
    if std_dev < 1.0 {
        "Excellent"
    } else if std_dev < 2.0 {
        "Good"
    } else {
        "Fair"
    }
}

fn print_result(status: AssignStatus, assignment: &Assignment, drivers: &[Driver]) {
    let output = to_output(status, assignment, drivers);
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize result"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_balance_quality_bands() {
        assert_eq!(load_balance_quality(0.0), "Excellent");
        assert_eq!(load_balance_quality(0.99), "Excellent");
        assert_eq!(load_balance_quality(1.0), "Good");
        assert_eq!(load_balance_quality(1.99), "Good");
        assert_eq!(load_balance_quality(2.0), "Fair");
        assert_eq!(load_balance_quality(5.0), "Fair");
    }
}
