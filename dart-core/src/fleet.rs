//! Caller-owned state spanning planning cycles.
//!
//! [`FleetState`] holds the validated stop topology and the fleet. It is the
//! only long-lived mutable object: demand is updated between cycles, and a
//! planner borrows the state mutably to store routes and relocate stranded
//! vehicles.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::{DemandVector, StartPosition, Stop, StopId, Vehicle, VehicleId};

/// Errors raised while building or mutating a [`FleetState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    /// Two stops share an identifier.
    #[error("duplicate stop id {stop}")]
    DuplicateStop {
        /// Repeated identifier.
        stop: StopId,
    },
    /// Two vehicles share an identifier.
    #[error("duplicate vehicle id {vehicle}")]
    DuplicateVehicle {
        /// Repeated identifier.
        vehicle: VehicleId,
    },
    /// A stop lists a neighbour that does not exist.
    #[error("stop {stop} lists unknown neighbour {neighbour}")]
    UnknownNeighbour {
        /// Stop holding the adjacency entry.
        stop: StopId,
        /// Missing neighbour.
        neighbour: StopId,
    },
    /// A vehicle starts at a stop that does not exist.
    #[error("vehicle {vehicle} starts at unknown stop {stop}")]
    UnknownStartStop {
        /// Vehicle whose start is invalid.
        vehicle: VehicleId,
        /// Missing stop.
        stop: StopId,
    },
    /// A stop id was not found.
    #[error("unknown stop {stop}")]
    UnknownStop {
        /// Missing stop.
        stop: StopId,
    },
    /// A vehicle id was not found.
    #[error("unknown vehicle {vehicle}")]
    UnknownVehicle {
        /// Missing vehicle.
        vehicle: VehicleId,
    },
}

/// Stops and vehicles keyed by id.
///
/// Iteration always follows ascending id order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dart_core::{DemandVector, FleetState, StartPosition, Stop, StopId, Vehicle, VehicleId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stops = vec![Stop::new(StopId::new(1), Coord { x: 0.0, y: 0.0 }, 0)?];
/// let vehicles = vec![Vehicle::new(VehicleId::new(1), 30, StartPosition::Stop(StopId::new(1)))?];
/// let mut fleet = FleetState::new(stops, vehicles)?;
///
/// fleet.apply_demand(&DemandVector::new().with(StopId::new(1), 8))?;
/// assert_eq!(fleet.stop(StopId::new(1)).map(Stop::demand), Some(8));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetState {
    stops: BTreeMap<StopId, Stop>,
    vehicles: BTreeMap<VehicleId, Vehicle>,
}

impl FleetState {
    /// Validate the topology and build the state.
    ///
    /// # Errors
    ///
    /// Returns a [`FleetError`] for duplicate ids, adjacency naming unknown
    /// stops, or vehicles starting at unknown stops.
    pub fn new<S, V>(stops: S, vehicles: V) -> Result<Self, FleetError>
    where
        S: IntoIterator<Item = Stop>,
        V: IntoIterator<Item = Vehicle>,
    {
        let mut stop_map = BTreeMap::new();
        for stop in stops {
            let id = stop.id();
            if stop_map.insert(id, stop).is_some() {
                return Err(FleetError::DuplicateStop { stop: id });
            }
        }

        for stop in stop_map.values() {
            if let Some(missing) = stop
                .neighbours()
                .iter()
                .find(|neighbour| !stop_map.contains_key(*neighbour))
            {
                return Err(FleetError::UnknownNeighbour {
                    stop: stop.id(),
                    neighbour: *missing,
                });
            }
        }

        let mut vehicle_map = BTreeMap::new();
        for vehicle in vehicles {
            let id = vehicle.id();
            if let Some(stop) = vehicle.start().stop()
                && !stop_map.contains_key(&stop)
            {
                return Err(FleetError::UnknownStartStop { vehicle: id, stop });
            }
            if vehicle_map.insert(id, vehicle).is_some() {
                return Err(FleetError::DuplicateVehicle { vehicle: id });
            }
        }

        Ok(Self {
            stops: stop_map,
            vehicles: vehicle_map,
        })
    }

    /// Look up a stop.
    #[must_use]
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    /// Look up a vehicle.
    #[must_use]
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Iterate stops in ascending id order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> + '_ {
        self.stops.values()
    }

    /// Iterate vehicles in ascending id order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.values()
    }

    /// Vehicle ids in ascending order.
    #[must_use]
    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        self.vehicles.keys().copied().collect()
    }

    /// Number of stops.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Sum of current demand across all stops.
    #[must_use]
    pub fn total_demand(&self) -> u64 {
        self.stops.values().map(|stop| u64::from(stop.demand())).sum()
    }

    /// Stops used as start positions by vehicles other than `except`.
    #[must_use]
    pub fn occupied_starts(&self, except: VehicleId) -> BTreeSet<StopId> {
        self.vehicles
            .values()
            .filter(|vehicle| vehicle.id() != except)
            .filter_map(|vehicle| vehicle.start().stop())
            .collect()
    }

    /// Replace the demand waiting at one stop.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::UnknownStop`] when `stop` does not exist.
    pub fn set_demand(&mut self, stop: StopId, units: u32) -> Result<(), FleetError> {
        let entry = self
            .stops
            .get_mut(&stop)
            .ok_or(FleetError::UnknownStop { stop })?;
        entry.set_demand(units);
        Ok(())
    }

    /// Apply a demand snapshot.
    ///
    /// Every stop named by `demand` must exist; otherwise nothing is changed.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::UnknownStop`] for the first unknown stop.
    pub fn apply_demand(&mut self, demand: &DemandVector) -> Result<(), FleetError> {
        if let Some((stop, _)) = demand.iter().find(|(stop, _)| !self.stops.contains_key(stop)) {
            return Err(FleetError::UnknownStop { stop });
        }
        for (stop, units) in demand.iter() {
            self.set_demand(stop, units)?;
        }
        Ok(())
    }

    /// Move a vehicle's start to `stop`.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::UnknownVehicle`] or [`FleetError::UnknownStop`]
    /// when either id is missing.
    pub fn relocate(&mut self, vehicle: VehicleId, stop: StopId) -> Result<(), FleetError> {
        if !self.stops.contains_key(&stop) {
            return Err(FleetError::UnknownStop { stop });
        }
        let entry = self
            .vehicles
            .get_mut(&vehicle)
            .ok_or(FleetError::UnknownVehicle { vehicle })?;
        log::debug!("vehicle {vehicle} relocated to stop {stop}");
        entry.set_start(StartPosition::Stop(stop));
        Ok(())
    }

    /// Replace a vehicle's assigned route wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::UnknownVehicle`] when the vehicle is missing and
    /// [`FleetError::UnknownStop`] when the route names a missing stop.
    pub fn replace_route(
        &mut self,
        vehicle: VehicleId,
        route: Vec<StopId>,
    ) -> Result<(), FleetError> {
        if let Some(stop) = route.iter().find(|stop| !self.stops.contains_key(*stop)) {
            return Err(FleetError::UnknownStop { stop: *stop });
        }
        let entry = self
            .vehicles
            .get_mut(&vehicle)
            .ok_or(FleetError::UnknownVehicle { vehicle })?;
        entry.set_route(route);
        Ok(())
    }
}
