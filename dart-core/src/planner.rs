//! The planner seam: the [`Planner`] trait and the outcome of one planning
//! cycle.

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use crate::{
    DemandLedger, DemandVector, FleetError, FleetState, LedgerError, Route, StartPosition, StopId,
    VehicleId,
};

/// Routes keyed by vehicle id, in ascending vehicle order.
pub type Assignment = BTreeMap<VehicleId, Route>;

/// A stranded vehicle moved to a fresh start stop during planning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reseed {
    /// Relocated vehicle.
    pub vehicle: VehicleId,
    /// Start position before relocation.
    pub from: StartPosition,
    /// Stop the vehicle now starts from.
    pub to: StopId,
}

/// Runtime information about a planning cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanDiagnostics {
    /// Wall-clock time spent planning.
    pub plan_time: Duration,
    /// Vehicles processed.
    pub vehicles_planned: u64,
    /// Vehicles left with an empty route.
    pub standby_vehicles: u64,
    /// Routes built from re-offered demand.
    pub reoffered_routes: u64,
}

/// Result of one planning cycle.
///
/// The ledger is returned for inspection only; the next cycle starts from a
/// fresh snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Route per vehicle.
    pub assignment: Assignment,
    /// Claims recorded during the cycle.
    pub ledger: DemandLedger,
    /// Vehicles relocated because their first attempt produced no route.
    pub reseeded: Vec<Reseed>,
    /// Timing and counters.
    pub diagnostics: PlanDiagnostics,
}

impl PlanOutcome {
    /// Route assigned to `vehicle`, if it was planned.
    #[must_use]
    pub fn route(&self, vehicle: VehicleId) -> Option<&Route> {
        self.assignment.get(&vehicle)
    }
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Planner parameters were invalid, e.g. a zero stop limit.
    #[error("invalid planner configuration: {reason}")]
    InvalidConfig {
        /// Human-readable explanation.
        reason: String,
    },
    /// The fleet topology was inconsistent.
    #[error(transparent)]
    Fleet(#[from] FleetError),
    /// A claim violated the ledger contract.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Assign routes to every vehicle in a fleet.
///
/// Implementations must process vehicles deterministically, store each route
/// on the vehicle, and return [`PlanError`] rather than panicking on invalid
/// input. Planners must be `Send + Sync` so they can be shared across threads.
pub trait Planner: Send + Sync {
    /// Run one planning cycle over the fleet's current demand.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] for invalid configuration or topology.
    fn plan(&self, fleet: &mut FleetState) -> Result<PlanOutcome, PlanError>;

    /// Apply a demand snapshot, then plan.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Fleet`] when `demand` names an unknown stop, or
    /// any error from [`Planner::plan`].
    fn plan_with_demand(
        &self,
        fleet: &mut FleetState,
        demand: &DemandVector,
    ) -> Result<PlanOutcome, PlanError> {
        fleet.apply_demand(demand)?;
        self.plan(fleet)
    }
}
