//! Weighted scoring of candidate stops.
//!
//! A candidate's score is `w_demand * demand + w_distance * distance +
//! w_coverage * coverage` where the three factors are computed by the helpers
//! in this module.

use std::collections::BTreeSet;

use dart_core::{Route, Stop, StopId};

use crate::{CoverageMode, ScoreWeights};

/// Score breakdown for one candidate stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateScore {
    /// Candidate stop.
    pub stop: StopId,
    /// Available demand relative to vehicle capacity.
    pub demand_factor: f64,
    /// Reciprocal of the distance from the current position.
    pub distance_factor: f64,
    /// Coverage contribution under the configured mode.
    pub coverage_factor: f64,
    /// Weighted sum of the factors.
    pub score: f64,
}

impl CandidateScore {
    /// Combine the three factors with `weights`.
    ///
    /// # Examples
    /// ```
    /// use dart_core::StopId;
    /// use dart_planner::{CandidateScore, ScoreWeights};
    ///
    /// let scored = CandidateScore::new(StopId::new(2), 0.5, 0.1, 1.0, &ScoreWeights::GEOGRAPHIC);
    /// assert!((scored.score - 0.44).abs() < 1e-12);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "scores are weighted sums")]
    pub fn new(
        stop: StopId,
        demand_factor: f64,
        distance_factor: f64,
        coverage_factor: f64,
        weights: &ScoreWeights,
    ) -> Self {
        let score = weights.demand * demand_factor
            + weights.distance * distance_factor
            + weights.coverage * coverage_factor;
        Self {
            stop,
            demand_factor,
            distance_factor,
            coverage_factor,
            score,
        }
    }

    /// Return `true` when `self` should replace `best`.
    ///
    /// Only a strictly higher score wins, so with candidates visited in
    /// ascending id order ties stay with the lowest stop id.
    #[must_use]
    pub fn beats(&self, best: Option<&Self>) -> bool {
        best.is_none_or(|current| self.score > current.score)
    }
}

/// `available / capacity`, or zero for a vehicle without seats.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "demand factor is a ratio")]
pub fn demand_factor(available: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    f64::from(available) / f64::from(capacity)
}

/// `1 / distance_km`, substituting `epsilon_km` for coincident points.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "distance factor is a reciprocal")]
pub fn distance_factor(distance_km: f64, epsilon_km: f64) -> f64 {
    let effective = if distance_km > 0.0 {
        distance_km
    } else {
        epsilon_km
    };
    1.0 / effective
}

/// Coverage contribution of `candidate` under `mode`.
///
/// Geographic coverage is `1` unless another vehicle starts at the
/// candidate. Connectivity coverage is the fraction of the candidate's
/// neighbours not yet on `route`, or `0` for an isolated stop.
#[must_use]
pub fn coverage_factor(
    mode: CoverageMode,
    candidate: &Stop,
    route: &Route,
    occupied_starts: &BTreeSet<StopId>,
) -> f64 {
    match mode {
        CoverageMode::Geographic => {
            if occupied_starts.contains(&candidate.id()) {
                0.0
            } else {
                1.0
            }
        }
        CoverageMode::GraphConnectivity => {
            let neighbours = candidate.neighbours();
            let fresh = neighbours.iter().filter(|id| !route.contains(**id)).count();
            ratio(fresh, neighbours.len())
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "neighbour counts are far below the f64 mantissa range"
)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}
