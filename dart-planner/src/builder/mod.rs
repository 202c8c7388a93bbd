//! Greedy per-vehicle route construction.
//!
//! Starting from the vehicle's position, the builder repeatedly scores every
//! reachable unvisited stop and appends the best one until the route is full,
//! the vehicle has no seats left or no reachable stop has demand waiting.
//! Each pickup is claimed in the shared [`DemandLedger`] so later vehicles in
//! the same cycle see what is left.

use std::collections::BTreeSet;

use dart_core::{
    DemandLedger, DistanceModel, FleetError, FleetState, GreatCircle, PlanError, Route,
    StartPosition, Stop, StopId, Vehicle, Visit,
};
use geo::Coord;

use crate::score::{CandidateScore, coverage_factor, demand_factor, distance_factor};
use crate::{CoverageMode, PlannerConfig};

/// Builds one vehicle's route against the cycle ledger.
///
/// # Examples
/// ```
/// use dart_core::{DemandLedger, StopId, VehicleId};
/// use dart_core::test_support::corridor;
/// use dart_planner::{PlannerConfig, RouteBuilder};
///
/// # fn main() -> Result<(), dart_core::PlanError> {
/// let fleet = corridor();
/// let mut ledger = DemandLedger::from_stops(fleet.stops());
/// let builder = RouteBuilder::new(PlannerConfig::default());
/// let bus = fleet.vehicle(VehicleId::new(1)).expect("corridor has bus 1");
/// let route = builder.build_route(bus, &fleet, &mut ledger)?;
/// assert_eq!(route.stop_ids().collect::<Vec<_>>(), vec![StopId::new(1), StopId::new(2)]);
/// assert_eq!(ledger.claimed(StopId::new(1)), 50);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RouteBuilder<D = GreatCircle> {
    distance: D,
    config: PlannerConfig,
}

impl RouteBuilder<GreatCircle> {
    /// Construct a builder using great-circle distances.
    #[must_use]
    pub const fn new(config: PlannerConfig) -> Self {
        Self::with_distance(GreatCircle, config)
    }
}

impl Default for RouteBuilder<GreatCircle> {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

/// Where the vehicle currently is while its route grows.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    position: Coord<f64>,
    stop: Option<StopId>,
    seats: u32,
}

/// Inputs that stay fixed while one route is built.
struct Context<'a> {
    vehicle: &'a Vehicle,
    fleet: &'a FleetState,
    occupied_starts: BTreeSet<StopId>,
    reoffer: bool,
}

impl<D> RouteBuilder<D> {
    /// Construct a builder with an explicit distance model.
    #[must_use]
    pub const fn with_distance(distance: D, config: PlannerConfig) -> Self {
        Self { distance, config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Distance model in use.
    #[must_use]
    pub const fn distance(&self) -> &D {
        &self.distance
    }
}

impl<D: DistanceModel> RouteBuilder<D> {
    /// Build a route for `vehicle`, claiming pickups in `ledger`.
    ///
    /// When every stop's demand has already been claimed the builder offers
    /// each stop's total demand again. Such routes record pickups without
    /// claiming them and are marked [`Route::is_reoffered`].
    ///
    /// An empty route means the vehicle has nowhere useful to go: it starts
    /// at a free point with no demand or seats, or in connectivity mode its
    /// start is not a stop with neighbours.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Fleet`] when the vehicle starts at a stop missing
    /// from `fleet` and [`PlanError::Ledger`] when `ledger` was not built from
    /// the same fleet.
    pub fn build_route(
        &self,
        vehicle: &Vehicle,
        fleet: &FleetState,
        ledger: &mut DemandLedger,
    ) -> Result<Route, PlanError> {
        let reoffer = ledger.total_remaining() == 0 && ledger.total_demand() > 0;
        let context = Context {
            vehicle,
            fleet,
            occupied_starts: fleet.occupied_starts(vehicle.id()),
            reoffer,
        };
        let mut route = Route::empty();
        let Some(mut cursor) = self.board_at_start(&context, ledger, &mut route)? else {
            log::debug!(
                "vehicle {} has no usable start for {} planning",
                vehicle.id(),
                self.config.coverage_mode
            );
            return Ok(route);
        };

        while route.len() < self.config.max_stops && cursor.seats > 0 {
            let Some(best) = self.best_candidate(&context, ledger, &route, &cursor) else {
                break;
            };
            let stop = fleet
                .stop(best.stop)
                .ok_or(FleetError::UnknownStop { stop: best.stop })?;
            let pickup = available(ledger, best.stop, reoffer).min(cursor.seats);
            claim(ledger, best.stop, pickup, reoffer)?;
            log::debug!(
                "vehicle {} selects stop {} (score {:.3}, pickup {pickup})",
                vehicle.id(),
                best.stop,
                best.score
            );
            route.push(Visit {
                stop: best.stop,
                pickup,
            });
            cursor = Cursor {
                position: stop.location(),
                stop: Some(best.stop),
                seats: cursor.seats.saturating_sub(pickup),
            };
        }

        Ok(if reoffer { route.reoffered() } else { route })
    }

    /// Place the vehicle at its start, boarding passengers waiting there.
    fn board_at_start(
        &self,
        context: &Context<'_>,
        ledger: &mut DemandLedger,
        route: &mut Route,
    ) -> Result<Option<Cursor>, PlanError> {
        let seats = context.vehicle.remaining_capacity();
        match context.vehicle.start() {
            StartPosition::Point(position) => {
                if self.config.coverage_mode == CoverageMode::GraphConnectivity {
                    return Ok(None);
                }
                Ok(Some(Cursor {
                    position,
                    stop: None,
                    seats,
                }))
            }
            StartPosition::Stop(id) => {
                let start = context
                    .fleet
                    .stop(id)
                    .ok_or(FleetError::UnknownStop { stop: id })?;
                if self.config.coverage_mode == CoverageMode::GraphConnectivity
                    && start.neighbours().is_empty()
                {
                    return Ok(None);
                }
                let pickup = available(ledger, id, context.reoffer).min(seats);
                claim(ledger, id, pickup, context.reoffer)?;
                route.push(Visit { stop: id, pickup });
                Ok(Some(Cursor {
                    position: start.location(),
                    stop: Some(id),
                    seats: seats.saturating_sub(pickup),
                }))
            }
        }
    }

    /// Highest-scoring reachable stop, or `None` once no reachable stop has
    /// demand waiting.
    fn best_candidate(
        &self,
        context: &Context<'_>,
        ledger: &DemandLedger,
        route: &Route,
        cursor: &Cursor,
    ) -> Option<CandidateScore> {
        let candidates = self.candidates(context.fleet, route, cursor);
        if candidates
            .iter()
            .all(|stop| available(ledger, stop.id(), context.reoffer) == 0)
        {
            return None;
        }

        let mut best: Option<CandidateScore> = None;
        for stop in candidates {
            let scored = CandidateScore::new(
                stop.id(),
                demand_factor(
                    available(ledger, stop.id(), context.reoffer),
                    context.vehicle.capacity(),
                ),
                distance_factor(
                    self.distance.distance_km(cursor.position, stop.location()),
                    self.config.distance_epsilon_km,
                ),
                coverage_factor(
                    self.config.coverage_mode,
                    stop,
                    route,
                    &context.occupied_starts,
                ),
                &self.config.weights,
            );
            log::trace!(
                "vehicle {} candidate {}: demand {:.3}, distance {:.3}, coverage {:.3}, score {:.3}",
                context.vehicle.id(),
                scored.stop,
                scored.demand_factor,
                scored.distance_factor,
                scored.coverage_factor,
                scored.score
            );
            if scored.beats(best.as_ref()) {
                best = Some(scored);
            }
        }
        best
    }

    /// Unvisited stops reachable from the cursor, in ascending id order.
    fn candidates<'a>(&self, fleet: &'a FleetState, route: &Route, cursor: &Cursor) -> Vec<&'a Stop> {
        match (self.config.coverage_mode, cursor.stop) {
            (CoverageMode::Geographic, _) => fleet
                .stops()
                .filter(|stop| !route.contains(stop.id()))
                .collect(),
            (CoverageMode::GraphConnectivity, Some(current)) => fleet
                .stop(current)
                .into_iter()
                .flat_map(|stop| stop.neighbours().iter().copied())
                .filter(|id| !route.contains(*id))
                .filter_map(|id| fleet.stop(id))
                .collect(),
            (CoverageMode::GraphConnectivity, None) => Vec::new(),
        }
    }
}

/// Demand a vehicle may pick up at `stop`.
fn available(ledger: &DemandLedger, stop: StopId, reoffer: bool) -> u32 {
    if reoffer {
        ledger.total(stop)
    } else {
        ledger.remaining(stop)
    }
}

/// Record a pickup unless the route is re-offering claimed demand.
fn claim(ledger: &mut DemandLedger, stop: StopId, units: u32, reoffer: bool) -> Result<(), PlanError> {
    if reoffer || units == 0 {
        return Ok(());
    }
    ledger.claim(stop, units)?;
    Ok(())
}

#[cfg(test)]
mod tests;
