//! Command-line interface for planning DART fleets from scenario files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};
#[cfg(test)]
use plan::{OutputFormat, PlanConfig, Scenario, load_scenario, run_plan_with};

const ARG_PLAN_SCENARIO: &str = "scenario";
const ARG_PLAN_DEMAND: &str = "demand";
const ARG_PLAN_MAX_STOPS: &str = "max-stops";
const ARG_PLAN_COVERAGE_MODE: &str = "coverage-mode";
const ARG_PLAN_DEMAND_WEIGHT: &str = "demand-weight";
const ARG_PLAN_DISTANCE_WEIGHT: &str = "distance-weight";
const ARG_PLAN_COVERAGE_WEIGHT: &str = "coverage-weight";
const ARG_PLAN_FORMAT: &str = "format";
const ENV_PLAN_SCENARIO: &str = "DART_CMDS_PLAN_SCENARIO_PATH";

/// Run the DART CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dart",
    about = "Demand-responsive route assignment for small bus fleets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan one cycle for the fleet described by a scenario file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
