//! `FleetPlanner`: one greedy planning cycle across the whole fleet.

use std::time::Instant;

use dart_core::{
    Assignment, DemandLedger, DistanceModel, FleetError, FleetState, GreatCircle, PlanDiagnostics,
    PlanError, PlanOutcome, Planner, Reseed, Route, Stop, StopId, Vehicle, VehicleId,
};

use crate::{CoverageMode, PlannerConfig, RouteBuilder};

/// Plans every vehicle in ascending id order against a shared ledger.
///
/// Vehicles whose first attempt yields an empty route are moved to the
/// lowest-id stop nobody else starts at and planned once more. Vehicles that
/// still have nothing to do stand by for the cycle.
///
/// # Examples
/// ```
/// use dart_core::{Planner, StopId, VehicleId};
/// use dart_core::test_support::corridor;
/// use dart_planner::FleetPlanner;
///
/// # fn main() -> Result<(), dart_core::PlanError> {
/// let mut fleet = corridor();
/// let outcome = FleetPlanner::default().plan(&mut fleet)?;
/// let route = outcome.route(VehicleId::new(1)).expect("bus 1 is planned");
/// assert_eq!(route.total_pickup(), 60);
/// assert_eq!(outcome.ledger.total_remaining(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FleetPlanner<D = GreatCircle> {
    builder: RouteBuilder<D>,
}

impl FleetPlanner<GreatCircle> {
    /// Construct a planner using great-circle distances.
    #[must_use]
    pub const fn new(config: PlannerConfig) -> Self {
        Self::with_distance(GreatCircle, config)
    }
}

impl Default for FleetPlanner<GreatCircle> {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl<D> FleetPlanner<D> {
    /// Construct a planner with an explicit distance model.
    #[must_use]
    pub const fn with_distance(distance: D, config: PlannerConfig) -> Self {
        Self {
            builder: RouteBuilder::with_distance(distance, config),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        self.builder.config()
    }

    /// Route builder used for each vehicle.
    #[must_use]
    pub const fn builder(&self) -> &RouteBuilder<D> {
        &self.builder
    }
}

impl<D: DistanceModel> Planner for FleetPlanner<D> {
    fn plan(&self, fleet: &mut FleetState) -> Result<PlanOutcome, PlanError> {
        self.config().validate()?;
        let started_at = Instant::now();

        let mut ledger = DemandLedger::from_stops(fleet.stops());
        ledger.reset();
        let mut assignment = Assignment::new();
        let mut reseeded = Vec::new();
        let mut diagnostics = PlanDiagnostics::default();

        for id in fleet.vehicle_ids() {
            let route = self.route_vehicle(id, fleet, &mut ledger, &mut reseeded)?;
            diagnostics.vehicles_planned += 1;
            if route.is_empty() {
                diagnostics.standby_vehicles += 1;
                log::warn!("vehicle {id} has no route this cycle and stands by");
            }
            if route.is_reoffered() {
                diagnostics.reoffered_routes += 1;
            }
            fleet.replace_route(id, route.stop_ids().collect())?;
            assignment.insert(id, route);
        }

        diagnostics.plan_time = started_at.elapsed();
        log::info!(
            "planned {} vehicles in {:?}: {} of {} passengers claimed, {} on standby",
            diagnostics.vehicles_planned,
            diagnostics.plan_time,
            ledger.total_claimed(),
            ledger.total_demand(),
            diagnostics.standby_vehicles
        );
        Ok(PlanOutcome {
            assignment,
            ledger,
            reseeded,
            diagnostics,
        })
    }
}

impl<D: DistanceModel> FleetPlanner<D> {
    /// Build a route for one vehicle, re-seeding it once if it is stranded.
    fn route_vehicle(
        &self,
        id: VehicleId,
        fleet: &mut FleetState,
        ledger: &mut DemandLedger,
        reseeded: &mut Vec<Reseed>,
    ) -> Result<Route, PlanError> {
        let vehicle = fleet
            .vehicle(id)
            .ok_or(FleetError::UnknownVehicle { vehicle: id })?;
        let route = self.builder.build_route(vehicle, fleet, ledger)?;
        if !route.is_empty() {
            return Ok(route);
        }

        let from = vehicle.start();
        let Some(target) = self.reseed_target(vehicle, fleet) else {
            log::debug!("vehicle {id} has no free stop to re-seed at");
            return Ok(route);
        };
        fleet.relocate(id, target)?;
        log::warn!("vehicle {id} was stranded; re-seeded at stop {target}");
        reseeded.push(Reseed {
            vehicle: id,
            from,
            to: target,
        });

        let relocated = fleet
            .vehicle(id)
            .ok_or(FleetError::UnknownVehicle { vehicle: id })?;
        self.builder.build_route(relocated, fleet, ledger)
    }

    /// Lowest-id stop that no other vehicle starts at and that differs from
    /// the vehicle's current start. Connectivity planning also requires the
    /// stop to have neighbours.
    fn reseed_target(&self, vehicle: &Vehicle, fleet: &FleetState) -> Option<StopId> {
        let occupied = fleet.occupied_starts(vehicle.id());
        let current = vehicle.start().stop();
        let needs_neighbours = self.config().coverage_mode == CoverageMode::GraphConnectivity;
        fleet
            .stops()
            .filter(|stop| !occupied.contains(&stop.id()))
            .filter(|stop| Some(stop.id()) != current)
            .find(|stop| !needs_neighbours || !stop.neighbours().is_empty())
            .map(Stop::id)
    }
}
