//! Geographic coordinate type.

use std::fmt;

/// A WGS84 latitude/longitude pair in degrees.
///
/// Both components are guaranteed to be finite. Anything else (NaN,
/// infinities, missing provider fields) is represented as an absent
/// coordinate, i.e. `Option::<Coordinate>::None`.
///
/// # Examples
///
/// ```
/// use metro_reporter::domain::Coordinate;
///
/// let kremlin = Coordinate::new(55.752, 37.617).unwrap();
/// assert_eq!(kremlin.lat(), 55.752);
///
/// assert!(Coordinate::new(f64::NAN, 37.617).is_none());
/// assert!(Coordinate::new(55.752, f64::INFINITY).is_none());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, or `None` if either component is not finite.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Build a coordinate from two optional components.
    ///
    /// Absent when either side is missing or not finite.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Self::new(lat?, lon?)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}
