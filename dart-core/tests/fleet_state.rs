//! Integration tests for `FleetState` mutation between planning cycles.

use geo::Coord;
use rstest::{fixture, rstest};
use dart_core::{
    DemandVector, FleetError, FleetState, StartPosition, Stop, StopId, Vehicle, VehicleId,
};

fn stop(id: u64, demand: u32) -> Stop {
    Stop::new(StopId::new(id), Coord { x: 0.1, y: 51.5 }, demand).expect("valid stop")
}

#[fixture]
fn fleet() -> FleetState {
    let bus = Vehicle::new(VehicleId::new(1), 10, StartPosition::Stop(StopId::new(1)))
        .expect("valid vehicle");
    let shuttle = Vehicle::new(
        VehicleId::new(2),
        6,
        StartPosition::Point(Coord { x: 0.2, y: 51.4 }),
    )
    .expect("valid vehicle");
    FleetState::new([stop(1, 4), stop(2, 6)], [bus, shuttle]).expect("valid fleet")
}

#[rstest]
fn demand_updates_are_all_or_nothing(mut fleet: FleetState) {
    let bad = DemandVector::new()
        .with(StopId::new(1), 40)
        .with(StopId::new(9), 1);
    let err = fleet.apply_demand(&bad).expect_err("unknown stop");
    assert_eq!(err, FleetError::UnknownStop { stop: StopId::new(9) });
    assert_eq!(fleet.total_demand(), 10);

    let good = DemandVector::new().with(StopId::new(2), 0);
    fleet.apply_demand(&good).expect("known stop");
    assert_eq!(fleet.total_demand(), 4);
}

#[rstest]
fn relocation_frees_the_previous_start(mut fleet: FleetState) {
    assert_eq!(
        fleet.occupied_starts(VehicleId::new(2)).into_iter().collect::<Vec<_>>(),
        vec![StopId::new(1)]
    );
    fleet
        .relocate(VehicleId::new(1), StopId::new(2))
        .expect("known vehicle and stop");
    assert_eq!(
        fleet.occupied_starts(VehicleId::new(2)).into_iter().collect::<Vec<_>>(),
        vec![StopId::new(2)]
    );
    assert!(fleet.occupied_starts(VehicleId::new(1)).is_empty());
}

#[rstest]
fn routes_are_replaced_wholesale(mut fleet: FleetState) {
    let id = VehicleId::new(2);
    fleet
        .replace_route(id, vec![StopId::new(2), StopId::new(1)])
        .expect("known stops");
    fleet.replace_route(id, vec![StopId::new(1)]).expect("known stop");
    let route = fleet.vehicle(id).map(Vehicle::route);
    assert_eq!(route, Some(&[StopId::new(1)][..]));

    let err = fleet
        .replace_route(id, vec![StopId::new(5)])
        .expect_err("unknown stop");
    assert_eq!(err, FleetError::UnknownStop { stop: StopId::new(5) });
}

#[cfg(feature = "serde")]
#[rstest]
fn vehicles_deserialise_with_point_starts() {
    let vehicle: Vehicle = serde_json::from_str(
        r#"{ "id": 1, "capacity": 12, "passengers": 2, "start": { "point": { "x": 0.0, "y": 0.0 } } }"#,
    )
    .expect("valid vehicle JSON");
    assert_eq!(vehicle.remaining_capacity(), 10);
    assert!(vehicle.start().stop().is_none());

    let over: Result<Vehicle, _> =
        serde_json::from_str(r#"{ "id": 2, "capacity": 1, "passengers": 3, "start": { "stop": 1 } }"#);
    assert!(over.is_err());
}
