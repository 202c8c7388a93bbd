//! Core domain types for the DART route assignment engine.
//!
//! Stops, vehicles and the fleet topology live here together with the
//! per-cycle [`DemandLedger`], the [`DistanceModel`] abstraction and the
//! [`Planner`] trait implemented by `dart-planner`. Constructors validate their
//! input and return `Result` so invalid topologies never reach a planner.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod demand;
pub mod distance;
pub mod fleet;
pub mod ids;
pub mod ledger;
pub mod planner;
pub mod route;
pub mod stop;
pub mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use demand::DemandVector;
pub use distance::{DistanceModel, EARTH_RADIUS_KM, GreatCircle};
pub use fleet::{FleetError, FleetState};
pub use ids::{StopId, VehicleId};
pub use ledger::{DemandLedger, LedgerError};
pub use planner::{Assignment, PlanDiagnostics, PlanError, PlanOutcome, Planner, Reseed};
pub use route::{Route, Visit};
pub use stop::{Stop, StopError};
pub use vehicle::{StartPosition, Vehicle, VehicleError};
