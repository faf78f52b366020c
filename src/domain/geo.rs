//! Great-circle distance between two coordinates.

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Returns the haversine distance in kilometres between two points given as
/// `(latitude, longitude)` degree pairs.
///
/// Pure function: `distance_km(a, a) == 0` and the result is symmetric in
/// its arguments.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(distance_km(37.7, -122.4, 37.7, -122.4), 0.0);
    }

    #[test]
    fn symmetric() {
        let d1 = distance_km(37.7, -122.4, 45.5, -122.6);
        let d2 = distance_km(45.5, -122.6, 37.7, -122.4);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn sf_to_la_is_roughly_560_km() {
        // San Francisco to Los Angeles
        let d = distance_km(37.7749, -122.4194, 34.0522, -118.2437);
        assert!((d - 559.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn short_distance_is_accurate() {
        // ~6 km across San Francisco Bay
        let d = distance_km(37.7, -122.4, 37.75, -122.45);
        assert!(d > 5.0 && d < 8.0, "got {d}");
    }

    #[test]
    fn antimeridian_crossing() {
        let d = distance_km(0.0, 179.5, 0.0, -179.5);
        // One degree of longitude at the equator is ~111 km
        assert!(d < 120.0, "got {d}");
    }
}
