//! Great-circle distances between stops.
//!
//! The [`DistanceModel`] trait abstracts how far apart two coordinates are.
//! [`GreatCircle`] implements the haversine formula on a spherical Earth.
//! Coincident points return exactly `0.0`; callers that divide by the distance
//! must substitute their own epsilon.

use geo::{Coord, Distance, HaversineMeasure, Point};

/// Mean Earth radius used by [`GreatCircle`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine measure reporting kilometres.
const KM_HAVERSINE: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM);

/// Measure distances between WGS84 coordinates.
///
/// Implementations must return finite, non-negative kilometres for finite
/// inputs and must be `Send + Sync` so a planner can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use dart_core::DistanceModel;
///
/// struct Manhattan;
///
/// impl DistanceModel for Manhattan {
///     fn distance_km(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
///         (a.x - b.x).abs() + (a.y - b.y).abs()
///     }
/// }
///
/// let d = Manhattan.distance_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 2.0 });
/// assert_eq!(d, 3.0);
/// ```
pub trait DistanceModel: Send + Sync {
    /// Return the distance from `a` to `b` in kilometres.
    fn distance_km(&self, a: Coord<f64>, b: Coord<f64>) -> f64;
}

/// Haversine distance on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dart_core::{DistanceModel, GreatCircle};
///
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let d = GreatCircle.distance_km(london, paris);
/// assert!((d - 343.5).abs() < 1.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GreatCircle;

impl DistanceModel for GreatCircle {
    fn distance_km(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        KM_HAVERSINE.distance(Point::from(a), Point::from(b))
    }
}

/// Return `true` for finite coordinates inside the WGS84 range.
pub(crate) fn is_valid_coord(coord: Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && (-180.0..=180.0).contains(&coord.x)
        && (-90.0..=90.0).contains(&coord.y)
}
