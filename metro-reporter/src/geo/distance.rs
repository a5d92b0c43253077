//! Great-circle distance.

use crate::domain::Coordinate;

/// Mean Earth radius used for all distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two coordinates, in kilometres.
///
/// # Examples
///
/// ```
/// use metro_reporter::domain::Coordinate;
/// use metro_reporter::geo::distance_km;
///
/// let a = Coordinate::new(55.75, 37.62).unwrap();
/// assert_eq!(distance_km(a, a), 0.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();

    let sin_d_lat = (d_lat / 2.0).sin();
    let sin_d_lon = (d_lon / 2.0).sin();

    // Rounding can push h fractionally outside [0, 1] for antipodal points.
    let h = (sin_d_lat * sin_d_lat + sin_d_lon * sin_d_lon * lat1.cos() * lat2.cos())
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn zero_for_same_point() {
        let a = coord(55.75, 37.62);
        assert_eq!(distance_km(a, a), 0.0);
    }

    #[test]
    fn short_hop_in_moscow() {
        let a = coord(55.75, 37.62);
        let b = coord(55.751, 37.621);
        let d = distance_km(a, b);
        assert!(d > 0.1 && d < 0.15, "got {d}");
    }

    #[test]
    fn moscow_to_saint_petersburg() {
        let moscow = coord(55.7558, 37.6173);
        let spb = coord(59.9343, 30.3351);
        let d = distance_km(moscow, spb);
        assert!((d - 634.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
