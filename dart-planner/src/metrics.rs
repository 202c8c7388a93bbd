//! System metrics summarising a planning cycle.

use dart_core::{DistanceModel, FleetState, PlanOutcome, Route, StartPosition, Stop, VehicleId};
use geo::Coord;

/// Per-vehicle figures for one cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleMetrics {
    /// Vehicle described.
    pub vehicle: VehicleId,
    /// Number of stops on the route.
    pub stops: usize,
    /// Passengers boarding along the route.
    pub pickup: u64,
    /// `(aboard + pickup) / capacity`; zero for a vehicle without seats.
    pub load_factor: f64,
    /// Length of the route from the start position, in kilometres.
    pub distance_km: f64,
    /// Whether the pickups repeat demand already claimed by other vehicles.
    pub reoffered: bool,
}

/// Fleet-wide figures for one cycle.
///
/// # Examples
/// ```
/// use dart_core::{GreatCircle, Planner};
/// use dart_core::test_support::corridor;
/// use dart_planner::{FleetPlanner, PlanMetrics};
///
/// # fn main() -> Result<(), dart_core::PlanError> {
/// let mut fleet = corridor();
/// let outcome = FleetPlanner::default().plan(&mut fleet)?;
/// let metrics = PlanMetrics::collect(&fleet, &outcome, &GreatCircle);
/// assert_eq!(metrics.unserved, 0);
/// assert!((metrics.service_ratio - 1.0).abs() < f64::EPSILON);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanMetrics {
    /// Demand frozen at cycle start.
    pub total_demand: u64,
    /// Units claimed by vehicles.
    pub claimed: u64,
    /// Units nobody claimed.
    pub unserved: u64,
    /// `claimed / total_demand`; one when there was no demand.
    pub service_ratio: f64,
    /// Vehicles with an empty route.
    pub standby: usize,
    /// Per-vehicle figures in ascending id order.
    pub vehicles: Vec<VehicleMetrics>,
}

impl PlanMetrics {
    /// Summarise `outcome`, measuring route lengths with `distance`.
    ///
    /// `fleet` must be the state the outcome was planned against; start
    /// positions are read after any re-seeding.
    #[must_use]
    pub fn collect<D: DistanceModel>(fleet: &FleetState, outcome: &PlanOutcome, distance: &D) -> Self {
        let total_demand = outcome.ledger.total_demand();
        let claimed = outcome.ledger.total_claimed();
        let vehicles: Vec<VehicleMetrics> = outcome
            .assignment
            .iter()
            .map(|(id, route)| vehicle_metrics(fleet, *id, route, distance))
            .collect();
        let standby = outcome
            .assignment
            .values()
            .filter(|route| route.is_empty())
            .count();
        Self {
            total_demand,
            claimed,
            unserved: outcome.ledger.total_remaining(),
            service_ratio: if total_demand == 0 {
                1.0
            } else {
                fraction(claimed, total_demand)
            },
            standby,
            vehicles,
        }
    }
}

fn vehicle_metrics<D: DistanceModel>(
    fleet: &FleetState,
    id: VehicleId,
    route: &Route,
    distance: &D,
) -> VehicleMetrics {
    let vehicle = fleet.vehicle(id);
    let pickup = route.total_pickup();
    let load_factor = vehicle.map_or(0.0, |vehicle| {
        if vehicle.capacity() == 0 {
            0.0
        } else {
            fraction(
                u64::from(vehicle.passengers()).saturating_add(pickup),
                u64::from(vehicle.capacity()),
            )
        }
    });
    let origin = vehicle.and_then(|vehicle| match vehicle.start() {
        StartPosition::Point(point) => Some(point),
        StartPosition::Stop(_) => None,
    });
    VehicleMetrics {
        vehicle: id,
        stops: route.len(),
        pickup,
        load_factor,
        distance_km: route_length(fleet, origin, route, distance),
        reoffered: route.is_reoffered(),
    }
}

/// Sum of leg lengths, starting from `origin` when the vehicle starts at a
/// free point.
#[expect(clippy::float_arithmetic, reason = "route length sums leg distances")]
fn route_length<D: DistanceModel>(
    fleet: &FleetState,
    origin: Option<Coord<f64>>,
    route: &Route,
    distance: &D,
) -> f64 {
    let mut previous = origin;
    let mut total = 0.0;
    for location in route
        .stop_ids()
        .filter_map(|id| fleet.stop(id).map(Stop::location))
    {
        if let Some(from) = previous {
            total += distance.distance_km(from, location);
        }
        previous = Some(location);
    }
    total
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "passenger counts are far below the f64 mantissa range"
)]
fn fraction(part: u64, whole: u64) -> f64 {
    part as f64 / whole as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FleetPlanner;
    use dart_core::test_support::{bus, corridor, fleet, offset_north, roaming_bus, stop};
    use dart_core::{GreatCircle, Planner};
    use rstest::rstest;

    #[rstest]
    fn corridor_metrics_report_full_service() {
        let mut fleet = corridor();
        let outcome = FleetPlanner::default().plan(&mut fleet).expect("plan succeeds");
        let metrics = PlanMetrics::collect(&fleet, &outcome, &GreatCircle);

        assert_eq!(metrics.total_demand, 60);
        assert_eq!(metrics.claimed, 60);
        assert_eq!(metrics.standby, 0);
        let bus = metrics.vehicles.first().expect("one vehicle");
        assert_eq!(bus.stops, 2);
        assert!((bus.load_factor - 1.0).abs() < f64::EPSILON);
        assert!((bus.distance_km - 10.0).abs() < 1e-6);
    }

    #[rstest]
    fn point_starts_count_the_first_leg() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let target = offset_north(origin, 3.0);
        let mut fleet = fleet(
            [stop(1, target.x, target.y, 2)],
            [roaming_bus(1, 4, origin.x, origin.y)],
        );
        let outcome = FleetPlanner::default().plan(&mut fleet).expect("plan succeeds");
        let metrics = PlanMetrics::collect(&fleet, &outcome, &GreatCircle);

        let vehicle = metrics.vehicles.first().expect("one vehicle");
        assert!((vehicle.distance_km - 3.0).abs() < 1e-6);
        assert!((vehicle.load_factor - 0.5).abs() < f64::EPSILON);
        assert_eq!(metrics.unserved, 0);
    }

    #[rstest]
    fn partial_service_and_standby_are_reported() {
        let mut fleet = fleet(
            [stop(1, 0.0, 0.0, 8)],
            [bus(1, 2, 1), roaming_bus(2, 0, 0.0, 0.01)],
        );
        let outcome = FleetPlanner::default().plan(&mut fleet).expect("plan succeeds");
        let metrics = PlanMetrics::collect(&fleet, &outcome, &GreatCircle);

        assert_eq!(metrics.claimed, 2);
        assert_eq!(metrics.unserved, 6);
        assert_eq!(metrics.standby, 1);
        assert!((metrics.service_ratio - 0.25).abs() < f64::EPSILON);
    }
}
