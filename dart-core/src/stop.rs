//! Pickup stops with geographic position and waiting demand.

use std::collections::BTreeSet;

use geo::Coord;
use thiserror::Error;

use crate::StopId;
use crate::distance::is_valid_coord;

/// Errors returned by [`Stop::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StopError {
    /// The location was not a finite WGS84 coordinate.
    #[error("stop {id} has invalid location (lon {lon}, lat {lat})")]
    InvalidLocation {
        /// Identifier of the rejected stop.
        id: StopId,
        /// Longitude supplied by the caller.
        lon: f64,
        /// Latitude supplied by the caller.
        lat: f64,
    },
    /// The stop listed itself as a neighbour.
    #[error("stop {id} cannot be its own neighbour")]
    SelfLoop {
        /// Identifier of the rejected stop.
        id: StopId,
    },
}

/// A fixed pickup point with time-varying passenger demand.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The optional
/// neighbour set describes the stop graph used by connectivity-constrained
/// planning; it is ignored by geographic planning.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dart_core::{Stop, StopId};
///
/// # fn main() -> Result<(), dart_core::StopError> {
/// let stop = Stop::new(StopId::new(1), Coord { x: -0.12, y: 51.5 }, 12)?;
/// assert_eq!(stop.demand(), 12);
/// assert!(stop.neighbours().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "StopRecord", into = "StopRecord")
)]
pub struct Stop {
    id: StopId,
    location: Coord<f64>,
    demand: u32,
    neighbours: BTreeSet<StopId>,
}

impl Stop {
    /// Validate and construct a stop without neighbours.
    ///
    /// # Errors
    ///
    /// Returns [`StopError::InvalidLocation`] when either coordinate is not
    /// finite or lies outside the WGS84 range.
    pub fn new(id: StopId, location: Coord<f64>, demand: u32) -> Result<Self, StopError> {
        if !is_valid_coord(location) {
            return Err(StopError::InvalidLocation {
                id,
                lon: location.x,
                lat: location.y,
            });
        }
        Ok(Self {
            id,
            location,
            demand,
            neighbours: BTreeSet::new(),
        })
    }

    /// Attach neighbouring stops, replacing any existing adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`StopError::SelfLoop`] when the stop lists itself.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use dart_core::{Stop, StopId};
    ///
    /// # fn main() -> Result<(), dart_core::StopError> {
    /// let stop = Stop::new(StopId::new(1), Coord { x: 0.0, y: 0.0 }, 0)?
    ///     .with_neighbours([StopId::new(2), StopId::new(3)])?;
    /// assert_eq!(stop.neighbours().len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_neighbours<I>(mut self, neighbours: I) -> Result<Self, StopError>
    where
        I: IntoIterator<Item = StopId>,
    {
        let neighbours: BTreeSet<StopId> = neighbours.into_iter().collect();
        if neighbours.contains(&self.id) {
            return Err(StopError::SelfLoop { id: self.id });
        }
        self.neighbours = neighbours;
        Ok(self)
    }

    /// Stop identifier.
    #[must_use]
    pub const fn id(&self) -> StopId {
        self.id
    }

    /// Geographic position.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Passengers currently waiting.
    #[must_use]
    pub const fn demand(&self) -> u32 {
        self.demand
    }

    /// Adjacent stops in ascending id order.
    #[must_use]
    pub const fn neighbours(&self) -> &BTreeSet<StopId> {
        &self.neighbours
    }

    pub(crate) const fn set_demand(&mut self, demand: u32) {
        self.demand = demand;
    }
}

/// Plain serialisation shape of a [`Stop`].
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StopRecord {
    id: StopId,
    location: Coord<f64>,
    #[serde(default)]
    demand: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    neighbours: BTreeSet<StopId>,
}

#[cfg(feature = "serde")]
impl TryFrom<StopRecord> for Stop {
    type Error = StopError;

    fn try_from(record: StopRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.location, record.demand)?.with_neighbours(record.neighbours)
    }
}

#[cfg(feature = "serde")]
impl From<Stop> for StopRecord {
    fn from(stop: Stop) -> Self {
        Self {
            id: stop.id,
            location: stop.location,
            demand: stop.demand,
            neighbours: stop.neighbours,
        }
    }
}
