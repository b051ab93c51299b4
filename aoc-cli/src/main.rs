//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cli;
mod config;
mod error;
mod executor;
mod input_store;
mod logging;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use itertools::Itertools;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();
    logging::init(args.debug);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;

    // Build registry with tag filtering (only once)
    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config);

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    // Report missing inputs up front; those solvers still produce error results
    let missing_inputs = executor.missing_inputs(&work_items);
    if !missing_inputs.is_empty() {
        eprintln!(
            "Missing {} input file(s): {}",
            missing_inputs.len(),
            missing_inputs
                .iter()
                .map(|(year, day)| format!("{}/day{:02}", year, day))
                .join(", ")
        );
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }
    tracing::info!(solvers = work_items.len(), "starting run");

    let formatter = OutputFormatter::new(config.quiet);
    let mut results = Vec::new();
    let outcome = executor.execute(|result| {
        formatter.print_result(&result);
        results.push(result);
    });

    formatter.print_summary(&results);
    outcome.map_err(error::CliError::Executor)
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
