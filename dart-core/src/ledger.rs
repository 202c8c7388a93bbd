//! Cycle-scoped bookkeeping of claimed passenger demand.
//!
//! A [`DemandLedger`] freezes each stop's demand when a planning cycle starts
//! and records how many of those passengers vehicles have already claimed.
//! Claims made while routing one vehicle are visible to every vehicle routed
//! after it, which keeps two vehicles from serving the same riders.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{Stop, StopId};

/// Errors returned by [`DemandLedger::claim`].
///
/// Both variants indicate a caller bug: claims must be sized from
/// [`DemandLedger::remaining`] beforehand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The stop is not tracked by the ledger.
    #[error("stop {stop} is not tracked by the demand ledger")]
    UnknownStop {
        /// Stop named by the claim.
        stop: StopId,
    },
    /// The claim exceeds the stop's unclaimed demand.
    #[error("claim of {requested} at stop {stop} exceeds remaining demand {remaining}")]
    OverClaim {
        /// Stop named by the claim.
        stop: StopId,
        /// Units requested.
        requested: u32,
        /// Units still unclaimed.
        remaining: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Entry {
    total: u32,
    claimed: u32,
}

impl Entry {
    const fn remaining(self) -> u32 {
        self.total.saturating_sub(self.claimed)
    }
}

/// Per-stop demand frozen at cycle start plus the units claimed so far.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dart_core::{DemandLedger, Stop, StopId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stop = Stop::new(StopId::new(1), Coord { x: 0.0, y: 0.0 }, 20)?;
/// let mut ledger = DemandLedger::from_stops([&stop]);
/// ledger.claim(StopId::new(1), 5)?;
/// assert_eq!(ledger.remaining(StopId::new(1)), 15);
/// ledger.reset();
/// assert_eq!(ledger.claimed(StopId::new(1)), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DemandLedger {
    entries: BTreeMap<StopId, Entry>,
}

impl DemandLedger {
    /// Snapshot the current demand of `stops` with nothing claimed.
    pub fn from_stops<'a, I>(stops: I) -> Self
    where
        I: IntoIterator<Item = &'a Stop>,
    {
        let entries = stops
            .into_iter()
            .map(|stop| {
                (
                    stop.id(),
                    Entry {
                        total: stop.demand(),
                        claimed: 0,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Demand frozen for `stop` at cycle start; `0` for unknown stops.
    #[must_use]
    pub fn total(&self, stop: StopId) -> u32 {
        self.entries.get(&stop).map_or(0, |entry| entry.total)
    }

    /// Units claimed at `stop` this cycle; `0` for unknown stops.
    #[must_use]
    pub fn claimed(&self, stop: StopId) -> u32 {
        self.entries.get(&stop).map_or(0, |entry| entry.claimed)
    }

    /// Units still unclaimed at `stop`; `0` for unknown stops.
    #[must_use]
    pub fn remaining(&self, stop: StopId) -> u32 {
        self.entries.get(&stop).map_or(0, |entry| entry.remaining())
    }

    /// Record `units` passengers at `stop` as claimed.
    ///
    /// The ledger never clamps: a claim larger than [`Self::remaining`] is
    /// refused without mutating any counter.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownStop`] for untracked stops and
    /// [`LedgerError::OverClaim`] when `units` exceeds the remaining demand.
    pub fn claim(&mut self, stop: StopId, units: u32) -> Result<(), LedgerError> {
        let entry = self
            .entries
            .get_mut(&stop)
            .ok_or(LedgerError::UnknownStop { stop })?;
        let remaining = entry.remaining();
        if units > remaining {
            return Err(LedgerError::OverClaim {
                stop,
                requested: units,
                remaining,
            });
        }
        entry.claimed = entry.claimed.saturating_add(units);
        Ok(())
    }

    /// Zero every claimed counter, keeping the frozen totals.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.claimed = 0;
        }
    }

    /// Sum of frozen demand across all stops.
    #[must_use]
    pub fn total_demand(&self) -> u64 {
        self.entries.values().map(|entry| u64::from(entry.total)).sum()
    }

    /// Sum of claimed units across all stops.
    #[must_use]
    pub fn total_claimed(&self) -> u64 {
        self.entries
            .values()
            .map(|entry| u64::from(entry.claimed))
            .sum()
    }

    /// Sum of unclaimed demand across all stops.
    #[must_use]
    pub fn total_remaining(&self) -> u64 {
        self.entries
            .values()
            .map(|entry| u64::from(entry.remaining()))
            .sum()
    }

    /// Iterate `(stop, claimed)` pairs in ascending stop order.
    pub fn claims(&self) -> impl Iterator<Item = (StopId, u32)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, entry.claimed))
    }
}
