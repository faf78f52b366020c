//! Fixed installation table and nearest-point lookup.
//!
//! An alternate lens on sighting reports: distance to the nearest entry in
//! a fixed list of military installations. Deliberately a small static
//! table with a linear scan; it is not part of the piezoelectric composite.

use serde::Serialize;

use super::geo::distance_km;

/// A named installation with its coordinates.
#[derive(Debug, Clone, Copy, Serialize, utoipa::ToSchema)]
pub struct Installation {
    /// Installation name.
    pub name: &'static str,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// US installations used by the proximity lens.
pub const INSTALLATIONS: &[Installation] = &[
    Installation {
        name: "Edwards AFB",
        latitude: 34.905,
        longitude: -117.884,
    },
    Installation {
        name: "Nellis AFB",
        latitude: 36.236,
        longitude: -115.034,
    },
    Installation {
        name: "Groom Lake",
        latitude: 37.235,
        longitude: -115.811,
    },
    Installation {
        name: "Wright-Patterson AFB",
        latitude: 39.826,
        longitude: -84.048,
    },
    Installation {
        name: "White Sands Missile Range",
        latitude: 32.381,
        longitude: -106.476,
    },
    Installation {
        name: "Vandenberg SFB",
        latitude: 34.742,
        longitude: -120.572,
    },
    Installation {
        name: "Kirtland AFB",
        latitude: 35.040,
        longitude: -106.551,
    },
    Installation {
        name: "Fort Irwin",
        latitude: 35.262,
        longitude: -116.685,
    },
    Installation {
        name: "Dugway Proving Ground",
        latitude: 40.193,
        longitude: -112.936,
    },
    Installation {
        name: "China Lake NAWS",
        latitude: 35.685,
        longitude: -117.692,
    },
    Installation {
        name: "Luke AFB",
        latitude: 33.535,
        longitude: -112.383,
    },
    Installation {
        name: "Eglin AFB",
        latitude: 30.483,
        longitude: -86.525,
    },
];

/// Returns the nearest installation to `(lat, lon)` and its distance in
/// kilometres. `None` only if the table is empty.
#[must_use]
pub fn nearest(lat: f64, lon: f64) -> Option<(Installation, f64)> {
    INSTALLATIONS
        .iter()
        .map(|inst| (*inst, distance_km(lat, lon, inst.latitude, inst.longitude)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Distance-bucketed lens score: closer to an installation scores higher.
/// `< 25 km → 20`, `< 50 → 15`, `< 100 → 10`, `< 200 → 5`, else 0.
#[must_use]
pub fn installation_score(distance_km: f64) -> f64 {
    if distance_km < 25.0 {
        20.0
    } else if distance_km < 50.0 {
        15.0
    } else if distance_km < 100.0 {
        10.0
    } else if distance_km < 200.0 {
        5.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn nearest_finds_the_closest_entry() {
        // Just outside Groom Lake
        let Some((inst, dist)) = nearest(37.2, -115.8) else {
            panic!("table is non-empty");
        };
        assert_eq!(inst.name, "Groom Lake");
        assert!(dist < 10.0, "got {dist}");
    }

    #[test]
    fn nearest_from_the_east_coast_is_far() {
        let Some((inst, dist)) = nearest(40.7, -74.0) else {
            panic!("table is non-empty");
        };
        // New York is closest to Wright-Patterson, hundreds of km away
        assert_eq!(inst.name, "Wright-Patterson AFB");
        assert!(dist > 500.0, "got {dist}");
    }

    #[test]
    fn lens_score_buckets() {
        assert_eq!(installation_score(10.0), 20.0);
        assert_eq!(installation_score(25.0), 15.0);
        assert_eq!(installation_score(49.9), 15.0);
        assert_eq!(installation_score(50.0), 10.0);
        assert_eq!(installation_score(100.0), 5.0);
        assert_eq!(installation_score(200.0), 0.0);
    }
}
