//! Behavioural tests for `FleetPlanner` using rstest-bdd.

use std::cell::RefCell;

use dart_core::test_support::{corridor, fleet, roaming_bus, stop};
use dart_core::{DemandVector, FleetState, PlanError, PlanOutcome, Planner, StopId, VehicleId};
use dart_planner::{FleetPlanner, PlannerConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct PlannerWorld {
    fleet: RefCell<FleetState>,
    config: RefCell<PlannerConfig>,
    outcome: RefCell<Option<Result<PlanOutcome, PlanError>>>,
}

impl PlannerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> PlanOutcome {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected planning to succeed")
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

#[given("the corridor fleet")]
fn given_corridor(world: &PlannerWorld) {
    world.fleet.replace(corridor());
}

#[given("a stop with demand {demand} between two buses of capacity {capacity}")]
fn given_shared_stop(world: &PlannerWorld, demand: u32, capacity: u32) {
    world.fleet.replace(fleet(
        [stop(1, 0.0, 0.0, demand)],
        [
            roaming_bus(1, capacity, 0.01, 0.0),
            roaming_bus(2, capacity, -0.01, 0.0),
        ],
    ));
}

#[given("no stop has waiting passengers")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_no_demand(world: &PlannerWorld) {
    let mut fleet = world.fleet.borrow_mut();
    let demand: DemandVector = fleet.stops().map(|stop| (stop.id(), 0)).collect();
    fleet.apply_demand(&demand).expect("demand names known stops");
}

#[given("the planner allows {max_stops} stops per route")]
fn given_max_stops(world: &PlannerWorld, max_stops: usize) {
    world.config.borrow_mut().max_stops = max_stops;
}

#[when("the fleet is planned")]
fn when_planned(world: &PlannerWorld) {
    let planner = FleetPlanner::new(world.config.borrow().clone());
    let outcome = planner.plan(&mut world.fleet.borrow_mut());
    world.outcome.replace(Some(outcome));
}

#[then("vehicle {vehicle} visits stops {stops}")]
fn then_visits(world: &PlannerWorld, vehicle: u64, stops: String) {
    let expected: Vec<StopId> = stops
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .map(StopId::new)
        .collect();
    let outcome = world.expect_outcome();
    let actual: Vec<StopId> = outcome
        .route(VehicleId::new(vehicle))
        .map(|route| route.stop_ids().collect())
        .unwrap_or_default();
    assert_eq!(actual, expected);
}

#[then("vehicle {vehicle} picks up {passengers} passengers")]
fn then_picks_up(world: &PlannerWorld, vehicle: u64, passengers: u64) {
    let outcome = world.expect_outcome();
    let pickup = outcome
        .route(VehicleId::new(vehicle))
        .map(dart_core::Route::total_pickup);
    assert_eq!(pickup, Some(passengers));
}

#[then("stop {stop} has {units} units claimed")]
fn then_claimed(world: &PlannerWorld, stop: u64, units: u32) {
    let outcome = world.expect_outcome();
    assert_eq!(outcome.ledger.claimed(StopId::new(stop)), units);
}

#[then("{units} units remain unclaimed")]
fn then_unclaimed(world: &PlannerWorld, units: u64) {
    let outcome = world.expect_outcome();
    assert_eq!(outcome.ledger.total_remaining(), units);
}

#[then("planning fails with an invalid configuration")]
fn then_invalid_config(world: &PlannerWorld) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(outcome.as_ref(), Some(Err(PlanError::InvalidConfig { .. }))),
        "expected an invalid configuration error, got {outcome:?}"
    );
}

#[scenario(path = "tests/features/fleet_planner.feature", index = 0)]
fn corridor_route(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fleet_planner.feature", index = 1)]
fn shared_stop(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fleet_planner.feature", index = 2)]
fn zero_demand(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fleet_planner.feature", index = 3)]
fn zero_stop_limit(world: PlannerWorld) {
    let _ = world;
}
