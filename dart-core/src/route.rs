//! Per-vehicle routes produced by a planning cycle.

use crate::StopId;

/// One stop on a route and the passengers boarding there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    /// Stop visited.
    pub stop: StopId,
    /// Passengers picked up at the stop.
    pub pickup: u32,
}

/// An ordered sequence of stop visits for one vehicle.
///
/// An empty route means the vehicle stands by for the cycle. A route marked
/// `reoffered` was built while every stop's demand had already been claimed;
/// its pickups repeat demand that the ledger attributes to other vehicles.
///
/// # Examples
/// ```
/// use dart_core::{Route, StopId, Visit};
///
/// let route = Route::new(vec![
///     Visit { stop: StopId::new(1), pickup: 5 },
///     Visit { stop: StopId::new(4), pickup: 2 },
/// ]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_pickup(), 7);
/// assert_eq!(route.stop_ids().collect::<Vec<_>>(), vec![StopId::new(1), StopId::new(4)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    visits: Vec<Visit>,
    #[cfg_attr(feature = "serde", serde(default))]
    reoffered: bool,
}

impl Route {
    /// Construct a route from ordered visits.
    #[must_use]
    pub const fn new(visits: Vec<Visit>) -> Self {
        Self {
            visits,
            reoffered: false,
        }
    }

    /// Construct the standby route.
    ///
    /// # Examples
    /// ```
    /// use dart_core::Route;
    ///
    /// assert!(Route::empty().is_empty());
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Mark the route as built from re-offered demand.
    #[must_use]
    pub fn reoffered(mut self) -> Self {
        self.reoffered = true;
        self
    }

    /// Return `true` when the pickups were not claimed in the ledger.
    #[must_use]
    pub const fn is_reoffered(&self) -> bool {
        self.reoffered
    }

    /// Visits in travel order.
    #[must_use]
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Stop ids in travel order.
    pub fn stop_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        self.visits.iter().map(|visit| visit.stop)
    }

    /// Return `true` when the route visits `stop`.
    #[must_use]
    pub fn contains(&self, stop: StopId) -> bool {
        self.visits.iter().any(|visit| visit.stop == stop)
    }

    /// Number of visits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Return `true` for the standby route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Passengers boarding across the whole route.
    #[must_use]
    pub fn total_pickup(&self) -> u64 {
        self.visits.iter().map(|visit| u64::from(visit.pickup)).sum()
    }

    /// Last stop visited, if any.
    #[must_use]
    pub fn last_stop(&self) -> Option<StopId> {
        self.visits.last().map(|visit| visit.stop)
    }

    /// Append a visit.
    pub fn push(&mut self, visit: Visit) {
        self.visits.push(visit);
    }
}
