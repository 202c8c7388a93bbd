//! Error types emitted by the DART CLI.
//!
//! Keep this error type reasonably small, as most CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dart_core::{FleetError, PlanError};
use dart_planner::PlannerConfigError;
use thiserror::Error;

/// Errors emitted by the DART CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} path (pass a {field} path or set {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The merged planner settings are unusable.
    #[error("invalid planner configuration: {0}")]
    InvalidPlannerConfig(#[from] PlannerConfigError),
    /// The requested output format is not recognised.
    #[error("unknown output format `{value}` (expected `json` or `text`)")]
    UnknownFormat { value: String },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An input file could not be opened.
    #[error("failed to open {field} file {path:?}: {source}")]
    OpenInput {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An input file did not contain the expected JSON document.
    #[error("failed to parse {field} file {path:?}: {source}")]
    ParseInput {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The scenario describes an inconsistent fleet.
    #[error("scenario {path:?} is inconsistent: {source}")]
    InvalidScenario {
        path: Utf8PathBuf,
        #[source]
        source: FleetError,
    },
    /// The demand file names stops the scenario does not define.
    #[error("demand file {path:?} does not match the scenario: {source}")]
    InvalidDemand {
        path: Utf8PathBuf,
        #[source]
        source: FleetError,
    },
    /// The planner rejected the fleet.
    #[error("planning failed: {source}")]
    Plan {
        #[source]
        source: PlanError,
    },
    /// Failed to serialise the plan report.
    #[error("failed to serialise plan report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Failed to write the plan report.
    #[error("failed to write plan output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

