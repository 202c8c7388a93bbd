//! Benchmark support utilities for the fleet planner.
//!
//! Provides deterministic fleet generation with clustered stops so benchmark
//! runs are reproducible.

use dart_core::{FleetState, StartPosition, Stop, StopId, Vehicle, VehicleId};
use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Number of cluster centres for stop distribution.
const CLUSTER_COUNT: usize = 5;

/// Spread of stops around their cluster centre (in degrees).
/// Approximately 0.01 degrees ~ 1 km at the equator.
const CLUSTER_SPREAD: f64 = 0.01;

/// Area size for cluster centre distribution (in degrees).
/// 0.1 degrees ~ 10 km at the equator.
const AREA_SIZE: f64 = 0.1;

/// Upper bound on passengers waiting at one stop.
const MAX_DEMAND: u32 = 40;

/// Seats per generated bus.
const BUS_CAPACITY: u32 = 30;

/// Generate a fleet of `stops` clustered stops and `vehicles` buses.
///
/// Stops in the same cluster are chained together so the fleet serves both
/// coverage modes. Buses start at evenly spaced stops.
///
/// # Panics
///
/// Panics when `stops` is zero.
#[must_use]
#[expect(
    clippy::expect_used,
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "benchmark fixtures are valid by construction and use cyclic assignment"
)]
pub fn generate_fleet(stops: usize, vehicles: usize, seed: u64) -> FleetState {
    assert!(stops > 0, "benchmark fleets need at least one stop");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let centres: Vec<Coord<f64>> = (0..CLUSTER_COUNT)
        .map(|_| Coord {
            x: rng.gen_range(0.0..AREA_SIZE),
            y: rng.gen_range(0.0..AREA_SIZE),
        })
        .collect();

    let built: Vec<Stop> = (0..stops)
        .map(|index| {
            let centre = centres
                .get(index % CLUSTER_COUNT)
                .copied()
                .unwrap_or(Coord { x: 0.0, y: 0.0 });
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let location = Coord {
                x: centre.x + rng.gen_range(-CLUSTER_SPREAD..CLUSTER_SPREAD),
                y: centre.y + rng.gen_range(-CLUSTER_SPREAD..CLUSTER_SPREAD),
            };
            let neighbours = [index.checked_sub(CLUSTER_COUNT), Some(index + CLUSTER_COUNT)]
                .into_iter()
                .flatten()
                .filter(|neighbour| *neighbour < stops)
                .map(stop_id);
            Stop::new(stop_id(index), location, rng.gen_range(0..=MAX_DEMAND))
                .and_then(|stop| stop.with_neighbours(neighbours))
                .expect("generated stop is valid")
        })
        .collect();

    let step = (stops / vehicles.max(1)).max(1);
    let buses: Vec<Vehicle> = (0..vehicles)
        .map(|index| {
            Vehicle::new(
                VehicleId::new(index as u64 + 1),
                BUS_CAPACITY,
                StartPosition::Stop(stop_id((index * step) % stops)),
            )
            .expect("stop starts are valid")
        })
        .collect();

    FleetState::new(built, buses).expect("generated fleet is consistent")
}

fn stop_id(index: usize) -> StopId {
    StopId::new(index as u64 + 1)
}
