//! Demand snapshots supplied once per planning cycle.

use std::collections::BTreeMap;

use crate::StopId;

/// Waiting passengers per stop, as reported by the surrounding application.
///
/// Stops absent from the vector keep their current demand when the vector is
/// applied to a [`FleetState`](crate::FleetState).
///
/// # Examples
/// ```
/// use dart_core::{DemandVector, StopId};
///
/// let demand = DemandVector::new()
///     .with(StopId::new(1), 12)
///     .with(StopId::new(2), 0);
/// assert_eq!(demand.get(StopId::new(1)), Some(12));
/// assert_eq!(demand.total(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DemandVector {
    units: BTreeMap<StopId, u32>,
}

impl DemandVector {
    /// Construct an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the demand for `stop`, replacing any previous value.
    pub fn set(&mut self, stop: StopId, units: u32) {
        self.units.insert(stop, units);
    }

    /// Set the demand for `stop` while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, stop: StopId, units: u32) -> Self {
        self.set(stop, units);
        self
    }

    /// Demand recorded for `stop`, if any.
    #[must_use]
    pub fn get(&self, stop: StopId) -> Option<u32> {
        self.units.get(&stop).copied()
    }

    /// Sum of all recorded demand.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.units.values().map(|units| u64::from(*units)).sum()
    }

    /// Iterate `(stop, units)` pairs in ascending stop order.
    pub fn iter(&self) -> impl Iterator<Item = (StopId, u32)> + '_ {
        self.units.iter().map(|(stop, units)| (*stop, *units))
    }

    /// Return `true` when no stop has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<(StopId, u32)> for DemandVector {
    fn from_iter<I: IntoIterator<Item = (StopId, u32)>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}
