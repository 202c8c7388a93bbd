//! Plan command implementation for the DART CLI.

use std::io::{BufReader, Write};
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use dart_core::{
    Assignment, DemandVector, FleetState, GreatCircle, PlanDiagnostics, PlanOutcome, Planner,
    Reseed, Route, Stop, Vehicle,
};
use dart_planner::{CoverageMode, FleetPlanner, PlanMetrics, PlannerConfig, ScoreWeights};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_COVERAGE_MODE, ARG_PLAN_COVERAGE_WEIGHT, ARG_PLAN_DEMAND, ARG_PLAN_DEMAND_WEIGHT,
    ARG_PLAN_DISTANCE_WEIGHT, ARG_PLAN_FORMAT, ARG_PLAN_MAX_STOPS, ARG_PLAN_SCENARIO, CliError,
    ENV_PLAN_SCENARIO,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan one cycle for the fleet described by a JSON scenario. \
                 Waiting passengers can be overridden with a demand file and \
                 planner settings can come from flags, configuration files, \
                 or DART_ environment variables.",
    about = "Assign routes to every vehicle in a scenario"
)]
#[ortho_config(prefix = "DART")]
pub(crate) struct PlanArgs {
    /// Path to a JSON scenario listing stops and vehicles.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) scenario_path: Option<Utf8PathBuf>,
    /// Path to a JSON object mapping stop ids to waiting passengers.
    #[arg(long = ARG_PLAN_DEMAND, value_name = "path")]
    #[serde(default)]
    pub(crate) demand: Option<Utf8PathBuf>,
    /// Maximum stops per route, counting the start stop.
    #[arg(long = ARG_PLAN_MAX_STOPS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_stops: Option<usize>,
    /// Candidate strategy: `geographic` or `graph-connectivity`.
    #[arg(long = ARG_PLAN_COVERAGE_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) coverage_mode: Option<String>,
    /// Weight of the demand factor.
    #[arg(long = ARG_PLAN_DEMAND_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) demand_weight: Option<f64>,
    /// Weight of the distance factor.
    #[arg(long = ARG_PLAN_DISTANCE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) distance_weight: Option<f64>,
    /// Weight of the coverage factor.
    #[arg(long = ARG_PLAN_COVERAGE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) coverage_weight: Option<f64>,
    /// Output format: `json` (default) or `text`.
    #[arg(long = ARG_PLAN_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// How the plan report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(CliError::UnknownFormat {
                value: s.to_owned(),
            }),
        }
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the scenario file.
    pub(crate) scenario_path: Utf8PathBuf,
    /// Optional demand override file.
    pub(crate) demand_path: Option<Utf8PathBuf>,
    /// Validated planner settings.
    pub(crate) planner: PlannerConfig,
    pub(crate) format: OutputFormat,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.scenario_path, ARG_PLAN_SCENARIO)?;
        if let Some(demand) = &self.demand_path {
            Self::require_existing(demand, ARG_PLAN_DEMAND)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let scenario_path = args.scenario_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_SCENARIO,
            env: ENV_PLAN_SCENARIO,
        })?;

        let coverage_mode = args
            .coverage_mode
            .as_deref()
            .map(CoverageMode::from_str)
            .transpose()?
            .unwrap_or_default();
        // Weights not given explicitly fall back to the preset for the mode.
        let base = match coverage_mode {
            CoverageMode::Geographic => PlannerConfig::default(),
            CoverageMode::GraphConnectivity => PlannerConfig::connectivity(),
        };
        let weights = ScoreWeights::new(
            args.demand_weight.unwrap_or(base.weights.demand),
            args.distance_weight.unwrap_or(base.weights.distance),
            args.coverage_weight.unwrap_or(base.weights.coverage),
        );
        let planner = PlannerConfig {
            max_stops: args.max_stops.unwrap_or(base.max_stops),
            weights,
            coverage_mode,
            ..base
        };
        planner.validate()?;

        let format = args
            .format
            .as_deref()
            .map(OutputFormat::from_str)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            scenario_path,
            demand_path: args.demand,
            planner,
            format,
        })
    }
}

/// Stops and vehicles as stored in a scenario file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct Scenario {
    pub(crate) stops: Vec<Stop>,
    pub(crate) vehicles: Vec<Vehicle>,
}

/// Everything printed for one planning cycle.
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    assignment: &'a Assignment,
    reseeded: &'a [Reseed],
    diagnostics: &'a PlanDiagnostics,
    metrics: PlanMetrics,
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let (fleet, outcome) = execute_plan(&config)?;
    let metrics = PlanMetrics::collect(&fleet, &outcome, &GreatCircle);
    match config.format {
        OutputFormat::Json => write_json(writer, &outcome, metrics),
        OutputFormat::Text => write_text(writer, &outcome, &metrics),
    }
}

fn execute_plan(config: &PlanConfig) -> Result<(FleetState, PlanOutcome), CliError> {
    let scenario = load_scenario(&config.scenario_path)?;
    let mut fleet = FleetState::new(scenario.stops, scenario.vehicles).map_err(|source| {
        CliError::InvalidScenario {
            path: config.scenario_path.clone(),
            source,
        }
    })?;
    if let Some(path) = &config.demand_path {
        let demand: DemandVector = load_json(path, ARG_PLAN_DEMAND)?;
        fleet
            .apply_demand(&demand)
            .map_err(|source| CliError::InvalidDemand {
                path: path.clone(),
                source,
            })?;
    }
    log::debug!(
        "planning {} vehicles over {} stops",
        fleet.vehicle_ids().len(),
        fleet.stop_count()
    );
    let planner = FleetPlanner::new(config.planner.clone());
    let outcome = planner
        .plan(&mut fleet)
        .map_err(|source| CliError::Plan { source })?;
    Ok((fleet, outcome))
}

/// Loads a JSON-encoded [`Scenario`] from disk.
pub(super) fn load_scenario(path: &Utf8Path) -> Result<Scenario, CliError> {
    load_json(path, ARG_PLAN_SCENARIO)
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn write_json(
    writer: &mut dyn Write,
    outcome: &PlanOutcome,
    metrics: PlanMetrics,
) -> Result<(), CliError> {
    let report = PlanReport {
        assignment: &outcome.assignment,
        reseeded: &outcome.reseeded,
        diagnostics: &outcome.diagnostics,
        metrics,
    };
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn write_text(
    writer: &mut dyn Write,
    outcome: &PlanOutcome,
    metrics: &PlanMetrics,
) -> Result<(), CliError> {
    for (vehicle, route) in &outcome.assignment {
        writeln!(writer, "Bus {vehicle}: {}", describe_route(route))
            .map_err(CliError::WriteOutput)?;
    }
    for reseed in &outcome.reseeded {
        writeln!(writer, "Bus {} re-seeded to stop {}", reseed.vehicle, reseed.to)
            .map_err(CliError::WriteOutput)?;
    }
    writeln!(
        writer,
        "Claimed {} of {} passengers ({} unserved), {} on standby",
        metrics.claimed, metrics.total_demand, metrics.unserved, metrics.standby
    )
    .map_err(CliError::WriteOutput)
}

fn describe_route(route: &Route) -> String {
    if route.is_empty() {
        return "standby".to_owned();
    }
    let stops: Vec<String> = route.stop_ids().map(|stop| stop.to_string()).collect();
    let suffix = if route.is_reoffered() { ", re-offered" } else { "" };
    format!(
        "{} ({} passengers{suffix})",
        stops.join(" -> "),
        route.total_pickup()
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
