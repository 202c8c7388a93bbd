//! Facade crate for the DART route assignment engine.
//!
//! This crate re-exports the core domain types and exposes the greedy fleet
//! planner behind the `planner` feature.

#![forbid(unsafe_code)]

pub use dart_core::{
    Assignment, DemandLedger, DemandVector, DistanceModel, EARTH_RADIUS_KM, FleetError,
    FleetState, GreatCircle, LedgerError, PlanDiagnostics, PlanError, PlanOutcome, Planner,
    Reseed, Route, StartPosition, Stop, StopError, StopId, Vehicle, VehicleError, VehicleId,
    Visit,
};

#[cfg(feature = "test-support")]
pub use dart_core::test_support;

#[cfg(feature = "planner")]
pub use dart_planner::{
    CandidateScore, CoverageMode, FleetPlanner, PlanMetrics, PlannerConfig, PlannerConfigError,
    RouteBuilder, ScoreWeights, VehicleMetrics,
};
