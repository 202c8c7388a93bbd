//! Capacity-bounded vehicles and their start positions.

use geo::Coord;
use thiserror::Error;

use crate::distance::is_valid_coord;
use crate::{StopId, VehicleId};

/// Where a vehicle begins its route.
///
/// Vehicles either wait at a known stop or at an arbitrary geographic point
/// such as a depot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StartPosition {
    /// The vehicle is parked at a stop.
    Stop(StopId),
    /// The vehicle is at a free-standing coordinate.
    Point(Coord<f64>),
}

impl StartPosition {
    /// Return the stop id when the vehicle starts at a stop.
    #[must_use]
    pub const fn stop(&self) -> Option<StopId> {
        match self {
            Self::Stop(id) => Some(*id),
            Self::Point(_) => None,
        }
    }
}

/// Errors returned by [`Vehicle::new`] and [`Vehicle::with_passengers`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    /// More passengers are aboard than the vehicle can carry.
    #[error("vehicle {id} carries {passengers} passengers but seats only {capacity}")]
    OverCapacity {
        /// Identifier of the rejected vehicle.
        id: VehicleId,
        /// Passengers reported aboard.
        passengers: u32,
        /// Total capacity.
        capacity: u32,
    },
    /// The start point was not a finite WGS84 coordinate.
    #[error("vehicle {id} has an invalid start point")]
    InvalidStartPoint {
        /// Identifier of the rejected vehicle.
        id: VehicleId,
    },
}

/// A vehicle assigned a fresh route every planning cycle.
///
/// A capacity of zero is accepted and leaves the vehicle unable to pick
/// anyone up; planning then gives it at most its start stop.
///
/// # Examples
/// ```
/// use dart_core::{StartPosition, StopId, Vehicle, VehicleId};
///
/// # fn main() -> Result<(), dart_core::VehicleError> {
/// let bus = Vehicle::new(VehicleId::new(1), 40, StartPosition::Stop(StopId::new(3)))?
///     .with_passengers(10)?;
/// assert_eq!(bus.remaining_capacity(), 30);
/// assert!(bus.route().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "VehicleRecord", into = "VehicleRecord")
)]
pub struct Vehicle {
    id: VehicleId,
    capacity: u32,
    start: StartPosition,
    passengers: u32,
    route: Vec<StopId>,
}

impl Vehicle {
    /// Validate and construct an empty vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`VehicleError::InvalidStartPoint`] when a point start is not a
    /// valid coordinate.
    pub fn new(id: VehicleId, capacity: u32, start: StartPosition) -> Result<Self, VehicleError> {
        if let StartPosition::Point(point) = start
            && !is_valid_coord(point)
        {
            return Err(VehicleError::InvalidStartPoint { id });
        }
        Ok(Self {
            id,
            capacity,
            start,
            passengers: 0,
            route: Vec::new(),
        })
    }

    /// Record passengers already aboard.
    ///
    /// # Errors
    ///
    /// Returns [`VehicleError::OverCapacity`] when `passengers` exceeds the
    /// vehicle's capacity.
    pub fn with_passengers(mut self, passengers: u32) -> Result<Self, VehicleError> {
        if passengers > self.capacity {
            return Err(VehicleError::OverCapacity {
                id: self.id,
                passengers,
                capacity: self.capacity,
            });
        }
        self.passengers = passengers;
        Ok(self)
    }

    /// Vehicle identifier.
    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    /// Total seats.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Passengers aboard before the cycle starts.
    #[must_use]
    pub const fn passengers(&self) -> u32 {
        self.passengers
    }

    /// Seats still free for pickups.
    #[must_use]
    pub const fn remaining_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.passengers)
    }

    /// Current start position.
    #[must_use]
    pub const fn start(&self) -> StartPosition {
        self.start
    }

    /// Stops assigned by the most recent planning cycle.
    #[must_use]
    pub fn route(&self) -> &[StopId] {
        &self.route
    }

    pub(crate) const fn set_start(&mut self, start: StartPosition) {
        self.start = start;
    }

    pub(crate) fn set_route(&mut self, route: Vec<StopId>) {
        self.route = route;
    }
}

/// Plain serialisation shape of a [`Vehicle`].
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct VehicleRecord {
    id: VehicleId,
    capacity: u32,
    start: StartPosition,
    #[serde(default)]
    passengers: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    route: Vec<StopId>,
}

#[cfg(feature = "serde")]
impl TryFrom<VehicleRecord> for Vehicle {
    type Error = VehicleError;

    fn try_from(record: VehicleRecord) -> Result<Self, Self::Error> {
        let mut vehicle =
            Self::new(record.id, record.capacity, record.start)?.with_passengers(record.passengers)?;
        vehicle.route = record.route;
        Ok(vehicle)
    }
}

#[cfg(feature = "serde")]
impl From<Vehicle> for VehicleRecord {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            capacity: vehicle.capacity,
            start: vehicle.start,
            passengers: vehicle.passengers,
            route: vehicle.route,
        }
    }
}
