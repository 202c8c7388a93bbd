//! Test-only fixture builders for `dart-core`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).
//! Builders panic on invalid input because fixtures are expected to be valid.

use geo::Coord;

use crate::{EARTH_RADIUS_KM, FleetState, StartPosition, Stop, StopId, Vehicle, VehicleId};

/// Point `km` kilometres due north of `origin` along its meridian.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dart_core::{DistanceModel, GreatCircle};
/// use dart_core::test_support::offset_north;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let d = GreatCircle.distance_km(origin, offset_north(origin, 10.0));
/// assert!((d - 10.0).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "converting an arc length to degrees is floating-point math"
)]
pub fn offset_north(origin: Coord<f64>, km: f64) -> Coord<f64> {
    Coord {
        x: origin.x,
        y: origin.y + (km / EARTH_RADIUS_KM).to_degrees(),
    }
}

/// Construct a stop at `(lon, lat)` with the given demand.
///
/// # Panics
///
/// Panics when the coordinate is outside the WGS84 range.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures use known-valid coordinates")]
pub fn stop(id: u64, lon: f64, lat: f64, demand: u32) -> Stop {
    Stop::new(StopId::new(id), Coord { x: lon, y: lat }, demand).expect("valid fixture stop")
}

/// Construct a stop with an adjacency set.
///
/// # Panics
///
/// Panics when the coordinate is invalid or `neighbours` contains `id`.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures use known-valid topologies")]
pub fn linked_stop(id: u64, lon: f64, lat: f64, demand: u32, neighbours: &[u64]) -> Stop {
    stop(id, lon, lat, demand)
        .with_neighbours(neighbours.iter().copied().map(StopId::new))
        .expect("fixture stop does not list itself")
}

/// Construct an empty bus starting at stop `start`.
///
/// # Panics
///
/// Panics when vehicle validation rejects the fixture.
#[must_use]
#[expect(clippy::expect_used, reason = "stop starts are always valid")]
pub fn bus(id: u64, capacity: u32, start: u64) -> Vehicle {
    Vehicle::new(
        VehicleId::new(id),
        capacity,
        StartPosition::Stop(StopId::new(start)),
    )
    .expect("stop starts need no validation")
}

/// Construct an empty bus starting at a free-floating point.
///
/// # Panics
///
/// Panics when the coordinate is outside the WGS84 range.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures use known-valid coordinates")]
pub fn roaming_bus(id: u64, capacity: u32, lon: f64, lat: f64) -> Vehicle {
    Vehicle::new(
        VehicleId::new(id),
        capacity,
        StartPosition::Point(Coord { x: lon, y: lat }),
    )
    .expect("valid fixture start point")
}

/// Build a fleet from fixture stops and vehicles.
///
/// # Panics
///
/// Panics when the topology is inconsistent.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures use consistent topologies")]
pub fn fleet<S, V>(stops: S, vehicles: V) -> FleetState
where
    S: IntoIterator<Item = Stop>,
    V: IntoIterator<Item = Vehicle>,
{
    FleetState::new(stops, vehicles).expect("consistent fixture fleet")
}

/// Three stops on a meridian and one bus of capacity 60 parked at the first.
///
/// Stop 1 holds 50 passengers at the origin, stop 2 holds 10 passengers
/// 10 km north and stop 3 is empty 5 km north.
///
/// # Examples
/// ```rust
/// use dart_core::StopId;
/// use dart_core::test_support::corridor;
///
/// let fleet = corridor();
/// assert_eq!(fleet.stop_count(), 3);
/// assert_eq!(fleet.stop(StopId::new(1)).map(|stop| stop.demand()), Some(50));
/// ```
#[must_use]
pub fn corridor() -> FleetState {
    let origin = Coord { x: 0.0, y: 0.0 };
    let far = offset_north(origin, 10.0);
    let near = offset_north(origin, 5.0);
    fleet(
        [
            stop(1, origin.x, origin.y, 50),
            stop(2, far.x, far.y, 10),
            stop(3, near.x, near.y, 0),
        ],
        [bus(1, 60, 1)],
    )
}
