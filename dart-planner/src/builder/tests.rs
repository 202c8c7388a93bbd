//! Tests for the `RouteBuilder`.

use super::*;
use dart_core::test_support::{bus, corridor, fleet, linked_stop, roaming_bus, stop};
use dart_core::{FleetState, VehicleId};
use rstest::{fixture, rstest};

fn stops_of(route: &Route) -> Vec<u64> {
    route.stop_ids().map(StopId::get).collect()
}

fn pickups_of(route: &Route) -> Vec<u32> {
    route.visits().iter().map(|visit| visit.pickup).collect()
}

fn build(builder: &RouteBuilder, fleet: &FleetState, vehicle: u64, ledger: &mut DemandLedger) -> Route {
    let vehicle = fleet
        .vehicle(VehicleId::new(vehicle))
        .expect("fixture vehicle");
    builder
        .build_route(vehicle, fleet, ledger)
        .expect("route builds")
}

#[fixture]
fn builder() -> RouteBuilder {
    RouteBuilder::default()
}

#[rstest]
fn corridor_route_boards_at_start_then_takes_remaining_demand(builder: RouteBuilder) {
    let fleet = corridor();
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);

    assert_eq!(stops_of(&route), vec![1, 2]);
    assert_eq!(pickups_of(&route), vec![50, 10]);
    assert_eq!(ledger.claimed(StopId::new(1)), 50);
    assert_eq!(ledger.claimed(StopId::new(2)), 10);
    assert_eq!(ledger.claimed(StopId::new(3)), 0);
    assert!(!route.is_reoffered());
}

#[rstest]
fn later_vehicles_see_earlier_claims(builder: RouteBuilder) {
    let fleet = fleet(
        [stop(1, 0.0, 0.0, 20)],
        [roaming_bus(1, 5, 0.01, 0.0), roaming_bus(2, 5, -0.01, 0.0)],
    );
    let mut ledger = DemandLedger::from_stops(fleet.stops());

    let first = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(pickups_of(&first), vec![5]);
    assert_eq!(ledger.remaining(StopId::new(1)), 15);

    let second = build(&builder, &fleet, 2, &mut ledger);
    assert_eq!(pickups_of(&second), vec![5]);
    assert_eq!(ledger.claimed(StopId::new(1)), 10);
}

#[rstest]
fn ties_resolve_to_the_lowest_stop_id(builder: RouteBuilder) {
    let fleet = fleet(
        [stop(7, 0.02, 0.0, 4), stop(3, -0.02, 0.0, 4)],
        [roaming_bus(1, 4, 0.0, 0.0)],
    );
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(stops_of(&route), vec![3]);
}

#[rstest]
fn other_vehicles_starts_lose_coverage(builder: RouteBuilder) {
    let fleet = fleet(
        [
            stop(1, 0.0, 0.0, 0),
            stop(2, 0.02, 0.0, 4),
            stop(3, -0.02, 0.0, 4),
        ],
        [bus(1, 4, 1), bus(2, 4, 2)],
    );
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(stops_of(&route), vec![1, 3]);
}

#[rstest]
#[case::stop_start(bus(1, 0, 1), vec![1])]
#[case::point_start(roaming_bus(1, 0, 0.0, 0.0), vec![])]
fn zero_capacity_claims_nothing(
    builder: RouteBuilder,
    #[case] vehicle: Vehicle,
    #[case] expected: Vec<u64>,
) {
    let fleet = fleet([stop(1, 0.0, 0.0, 9), stop(2, 0.01, 0.0, 9)], [vehicle]);
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(stops_of(&route), expected);
    assert_eq!(route.total_pickup(), 0);
    assert_eq!(ledger.total_claimed(), 0);
}

#[rstest]
fn passengers_aboard_limit_pickups(builder: RouteBuilder) {
    let vehicle = bus(1, 10, 1).with_passengers(8).expect("within capacity");
    let fleet = fleet([stop(1, 0.0, 0.0, 5), stop(2, 0.01, 0.0, 5)], [vehicle]);
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(stops_of(&route), vec![1]);
    assert_eq!(pickups_of(&route), vec![2]);
}

#[rstest]
#[case(1, vec![1])]
#[case(3, vec![1, 2, 3])]
fn max_stops_bounds_the_route(#[case] max_stops: usize, #[case] expected: Vec<u64>) {
    let builder = RouteBuilder::new(PlannerConfig {
        max_stops,
        ..PlannerConfig::default()
    });
    let fleet = fleet(
        [
            stop(1, 0.0, 0.0, 1),
            stop(2, 0.01, 0.0, 1),
            stop(3, 0.02, 0.0, 1),
            stop(4, 0.03, 0.0, 1),
        ],
        [bus(1, 50, 1)],
    );
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(stops_of(&route), expected);
}

#[rstest]
fn zero_demand_keeps_vehicle_at_start(builder: RouteBuilder) {
    let fleet = fleet([stop(1, 0.0, 0.0, 0), stop(2, 0.01, 0.0, 0)], [bus(1, 10, 1)]);
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    let route = build(&builder, &fleet, 1, &mut ledger);
    assert_eq!(stops_of(&route), vec![1]);
    assert_eq!(route.total_pickup(), 0);
    assert!(!route.is_reoffered());
}

#[rstest]
fn exhausted_demand_is_reoffered_without_claims(builder: RouteBuilder) {
    let fleet = fleet(
        [stop(1, 0.0, 0.0, 3), stop(2, 0.01, 0.0, 6)],
        [bus(1, 20, 1)],
    );
    let mut ledger = DemandLedger::from_stops(fleet.stops());
    ledger.claim(StopId::new(1), 3).expect("claim stop 1");
    ledger.claim(StopId::new(2), 6).expect("claim stop 2");

    let route = build(&builder, &fleet, 1, &mut ledger);
    assert!(route.is_reoffered());
    assert_eq!(stops_of(&route), vec![1, 2]);
    assert_eq!(pickups_of(&route), vec![3, 6]);
    assert_eq!(ledger.total_claimed(), 9);
}

mod connectivity {
    use super::*;

    #[fixture]
    fn builder() -> RouteBuilder {
        RouteBuilder::new(PlannerConfig::connectivity())
    }

    #[rstest]
    fn follows_the_stop_graph(builder: RouteBuilder) {
        let fleet = fleet(
            [
                linked_stop(1, 0.0, 0.0, 1, &[2]),
                linked_stop(2, 0.0, 0.05, 1, &[1, 3]),
                linked_stop(3, 0.0, 0.1, 1, &[2]),
                stop(4, 0.0, 0.01, 30),
            ],
            [bus(1, 10, 1)],
        );
        let mut ledger = DemandLedger::from_stops(fleet.stops());
        let route = build(&builder, &fleet, 1, &mut ledger);
        assert_eq!(stops_of(&route), vec![1, 2, 3]);
        assert_eq!(ledger.remaining(StopId::new(4)), 30);
    }

    #[rstest]
    fn stops_when_no_neighbour_has_demand(builder: RouteBuilder) {
        let fleet = fleet(
            [
                linked_stop(1, 0.0, 0.0, 2, &[2]),
                linked_stop(2, 0.0, 0.05, 0, &[1, 3]),
                linked_stop(3, 0.0, 0.1, 8, &[2]),
            ],
            [bus(1, 10, 1)],
        );
        let mut ledger = DemandLedger::from_stops(fleet.stops());
        let route = build(&builder, &fleet, 1, &mut ledger);
        assert_eq!(stops_of(&route), vec![1]);
    }

    #[rstest]
    #[case::isolated_start(bus(1, 10, 4))]
    #[case::point_start(roaming_bus(1, 10, 0.0, 0.0))]
    fn unusable_starts_yield_empty_routes(builder: RouteBuilder, #[case] vehicle: Vehicle) {
        let fleet = fleet(
            [
                linked_stop(1, 0.0, 0.0, 5, &[2]),
                linked_stop(2, 0.0, 0.05, 5, &[1]),
                stop(4, 0.0, 0.2, 5),
            ],
            [vehicle],
        );
        let mut ledger = DemandLedger::from_stops(fleet.stops());
        let route = build(&builder, &fleet, 1, &mut ledger);
        assert!(route.is_empty());
        assert_eq!(ledger.total_claimed(), 0);
    }
}
