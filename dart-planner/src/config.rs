//! Planner configuration and scoring strategy.

use std::fmt;
use std::str::FromStr;

use dart_core::PlanError;
use thiserror::Error;

/// Errors returned by [`PlannerConfig::validate`] and [`CoverageMode::from_str`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerConfigError {
    /// Routes must be allowed at least one stop.
    #[error("max_stops must be at least 1")]
    ZeroMaxStops,
    /// A score weight was negative or not finite.
    #[error("{name} weight must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Which weight was rejected.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// The zero-distance substitute must be a positive distance.
    #[error("distance epsilon must be finite and positive, got {value} km")]
    InvalidEpsilon {
        /// Value supplied.
        value: f64,
    },
    /// A coverage mode name was not recognised.
    #[error("unknown coverage mode '{value}' (expected 'geographic' or 'graph-connectivity')")]
    UnknownCoverageMode {
        /// Name supplied.
        value: String,
    },
}

impl From<PlannerConfigError> for PlanError {
    fn from(err: PlannerConfigError) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

/// Weights applied to the demand, distance and coverage factors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Weight of `available / capacity`.
    pub demand: f64,
    /// Weight of `1 / distance`.
    pub distance: f64,
    /// Weight of the coverage factor.
    pub coverage: f64,
}

impl ScoreWeights {
    /// Weights used by geographic planning.
    pub const GEOGRAPHIC: Self = Self::new(0.4, 0.4, 0.2);
    /// Weights used by connectivity-constrained planning.
    pub const CONNECTIVITY: Self = Self::new(0.5, 0.3, 0.2);

    /// Construct explicit weights.
    #[must_use]
    pub const fn new(demand: f64, distance: f64, coverage: f64) -> Self {
        Self {
            demand,
            distance,
            coverage,
        }
    }

    /// Check every weight is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError::InvalidWeight`] naming the first bad weight.
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        for (name, value) in [
            ("demand", self.demand),
            ("distance", self.distance),
            ("coverage", self.coverage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::GEOGRAPHIC
    }
}

/// How the coverage factor is computed and which stops are candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CoverageMode {
    /// Any stop is reachable; stops where other vehicles start score no
    /// coverage.
    #[default]
    Geographic,
    /// Only neighbours of the current stop are reachable; coverage rewards
    /// stops whose neighbours are not yet on the route.
    GraphConnectivity,
}

impl CoverageMode {
    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Geographic => "geographic",
            Self::GraphConnectivity => "graph-connectivity",
        }
    }
}

impl fmt::Display for CoverageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageMode {
    type Err = PlannerConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "geographic" => Ok(Self::Geographic),
            "graph-connectivity" | "graph" => Ok(Self::GraphConnectivity),
            _ => Err(PlannerConfigError::UnknownCoverageMode {
                value: s.to_owned(),
            }),
        }
    }
}

/// Configuration for [`RouteBuilder`](crate::RouteBuilder) and
/// [`FleetPlanner`](crate::FleetPlanner).
///
/// # Examples
/// ```
/// use dart_planner::{CoverageMode, PlannerConfig, ScoreWeights};
///
/// let config = PlannerConfig::connectivity();
/// assert_eq!(config.coverage_mode, CoverageMode::GraphConnectivity);
/// assert_eq!(config.weights, ScoreWeights::CONNECTIVITY);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Upper bound on visits per route, counting the start stop.
    pub max_stops: usize,
    /// Score weights.
    pub weights: ScoreWeights,
    /// Candidate and coverage strategy.
    pub coverage_mode: CoverageMode,
    /// Distance substituted when a candidate coincides with the current
    /// position, in kilometres.
    pub distance_epsilon_km: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_stops: 5,
            weights: ScoreWeights::GEOGRAPHIC,
            coverage_mode: CoverageMode::Geographic,
            distance_epsilon_km: 0.1,
        }
    }
}

impl PlannerConfig {
    /// Preset for connectivity-constrained planning.
    #[must_use]
    pub fn connectivity() -> Self {
        Self {
            weights: ScoreWeights::CONNECTIVITY,
            coverage_mode: CoverageMode::GraphConnectivity,
            ..Self::default()
        }
    }

    /// Reject configurations the planner cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError`] for a zero stop limit, invalid weights
    /// or a non-positive epsilon.
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        if self.max_stops == 0 {
            return Err(PlannerConfigError::ZeroMaxStops);
        }
        self.weights.validate()?;
        if !self.distance_epsilon_km.is_finite() || self.distance_epsilon_km <= 0.0 {
            return Err(PlannerConfigError::InvalidEpsilon {
                value: self.distance_epsilon_km,
            });
        }
        Ok(())
    }
}
