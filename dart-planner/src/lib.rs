//! Greedy demand-responsive route planning for DART fleets.
//!
//! This crate provides [`FleetPlanner`], the default implementation of the
//! [`Planner`](dart_core::Planner) trait. Each planning cycle snapshots
//! demand into a [`DemandLedger`](dart_core::DemandLedger) and asks a
//! [`RouteBuilder`] to grow one route per vehicle, in ascending vehicle id
//! order. Candidate stops are ranked by a weighted sum of waiting demand,
//! proximity and coverage; see [`PlannerConfig`] for the knobs.
//!
//! Routes are heuristic. There is no backtracking or local search, and demand
//! is not guaranteed to be fully served within one cycle.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod config;
mod metrics;
mod planner;
pub mod score;

pub use builder::RouteBuilder;
pub use config::{CoverageMode, PlannerConfig, PlannerConfigError, ScoreWeights};
pub use metrics::{PlanMetrics, VehicleMetrics};
pub use planner::FleetPlanner;
pub use score::CandidateScore;
