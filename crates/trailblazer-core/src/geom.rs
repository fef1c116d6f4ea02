//! Geometry primitives: [`Position`] and the crow-fly [`Metric`]s.

use std::fmt;
use std::ops::{Add, Sub};

/// Mean Earth radius in kilometres, used by [`haversine`].
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A location on the map.
///
/// For [`Metric::Euclidean`] graphs `x`/`y` are plane coordinates. For
/// [`Metric::Haversine`] graphs `x` is the longitude and `y` the latitude, both
/// in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return a position shifted by (dx, dy).
    #[inline]
    pub fn shift(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Distances
// ---------------------------------------------------------------------------

/// Straight-line (L2) distance between two plane positions.
#[inline]
pub fn euclidean(a: Position, b: Position) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Great-circle distance in kilometres between two (longitude, latitude)
/// positions given in degrees.
pub fn haversine(a: Position, b: Position) -> f64 {
    let (lat1, lat2) = (a.y.to_radians(), b.y.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.x - a.x).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// How crow-fly distances are measured on a graph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    /// Plane coordinates, [`euclidean`] distance.
    #[default]
    Euclidean,
    /// Longitude/latitude in degrees, [`haversine`] distance in kilometres.
    Haversine,
}

impl Metric {
    /// Distance between `a` and `b` under this metric.
    #[inline]
    pub fn distance(self, a: Position, b: Position) -> f64 {
        match self {
            Metric::Euclidean => euclidean(a, b),
            Metric::Haversine => haversine(a, b),
        }
    }
}
