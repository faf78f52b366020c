//! Piezoelectric score components and the composite breakdown.
//!
//! All component arithmetic is pure and table-driven. Every missing-data
//! case degrades to a documented numeric default; no component ever fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::distance_km;

/// Points awarded when the anomaly is unknown (outside the grid or the grid
/// is disabled) but coordinates are present.
const MAGNETIC_UNKNOWN: f64 = 10.0;

/// Points awarded for a shape that matches neither the weight table nor the
/// structured-craft list.
const SHAPE_DEFAULT: f64 = 5.0;

/// Maximum points from the physical-effects keyword scan.
const PHYSICAL_MAX: f64 = 25.0;

/// Maximum points from the seismic proximity component.
const SEISMIC_MAX: f64 = 25.0;

/// Candidate radius for the seismic proximity component, in kilometres.
const SEISMIC_RADIUS_KM: f64 = 150.0;

/// Candidate window for the seismic proximity component, in hours.
const SEISMIC_WINDOW_HOURS: f64 = 72.0;

/// Shape substrings consistent with plasma-like phenomena, with weights
/// applied against the 20-point shape maximum. Ordered table, first match
/// wins.
const SHAPE_WEIGHTS: &[(&str, f64)] = &[
    ("orb", 1.0),
    ("sphere", 1.0),
    ("circle", 0.9),
    ("fireball", 0.9),
    ("light", 0.8),
    ("flash", 0.8),
    ("oval", 0.7),
    ("egg", 0.7),
    ("disk", 0.6),
    ("changing", 0.6),
];

/// Structured-craft shapes that score zero.
const STRUCTURED_SHAPES: &[&str] = &["triangle", "chevron", "rectangle", "cigar"];

/// Keywords in a description that indicate electromagnetic or seismic
/// physical effects. Each distinct hit is worth 5 points.
const EFFECT_KEYWORDS: &[&str] = &[
    "earthquake",
    "tremor",
    "shaking",
    "rumbling",
    "static",
    "electrical",
    "tingling",
    "hair standing",
    "compass",
    "magnetic",
    "interference",
    "radio",
    "car stopped",
    "engine died",
    "lights flickered",
    "ground shook",
    "seismic",
    "quake",
];

/// `|anomaly|` boundary between the low- and high-magnetic zones, in nT.
/// Used consistently by the zone filters, stats, and correlation breakdown.
pub const ZONE_BOUNDARY_NT: f64 = 100.0;

/// Magnetic zone filter for report queries and aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GeologyZone {
    /// `|anomaly| < 100 nT`, candidate piezoelectric terrain.
    LowMagnetic,
    /// `|anomaly| ≥ 100 nT`.
    HighMagnetic,
    /// No zone filter.
    All,
}

impl std::str::FromStr for GeologyZone {
    type Err = crate::error::TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_magnetic" => Ok(Self::LowMagnetic),
            "high_magnetic" => Ok(Self::HighMagnetic),
            "all" => Ok(Self::All),
            other => Err(crate::error::TrackerError::InvalidRequest(format!(
                "unknown zone: {other}"
            ))),
        }
    }
}

/// A seismic event considered by the proximity component.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuake {
    /// Epicenter latitude in degrees.
    pub latitude: f64,
    /// Epicenter longitude in degrees.
    pub longitude: f64,
    /// Event origin time.
    pub occurred_at: DateTime<Utc>,
    /// Reported magnitude, when known.
    pub magnitude: Option<f64>,
}

/// Qualitative interpretation of a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreLabel {
    /// Score in the top band for the enabled component mix.
    High,
    /// Score in the middle band.
    Moderate,
    /// Everything below the moderate threshold.
    Low,
}

impl ScoreLabel {
    /// Uppercase string form, as surfaced by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
        }
    }
}

/// Composite score with per-component breakdown.
///
/// `seismic` is `None` when the proximity component is disabled, and the
/// `seismic_enabled` flag records which component mix (and therefore which
/// label thresholds) applied.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScoreBreakdown {
    /// Magnetic signature component (0–30).
    pub magnetic: f64,
    /// Shape classification component (0–20).
    pub shape: f64,
    /// Physical-effects keyword component (0–25).
    pub physical_effects: f64,
    /// Seismic proximity component (0–25), present only when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seismic: Option<f64>,
    /// Sum of the enabled components.
    pub total: f64,
    /// Qualitative interpretation under the enabled thresholds.
    pub label: ScoreLabel,
    /// Whether the seismic proximity component participated.
    pub seismic_enabled: bool,
}

impl ScoreBreakdown {
    /// Computes the full breakdown from pre-resolved inputs.
    ///
    /// `anomaly` is the grid sample at the report coordinates (`None` when
    /// out of grid or the grid is unavailable); `quakes` are candidate
    /// seismic events, only consulted when `seismic_enabled` is set.
    #[must_use]
    pub fn compute(
        coordinates: Option<(f64, f64)>,
        anomaly: Option<f64>,
        shape: Option<&str>,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
        quakes: &[NearbyQuake],
        seismic_enabled: bool,
    ) -> Self {
        let magnetic = magnetic_component(coordinates, anomaly);
        let shape = shape_component(shape);
        let physical_effects = physical_effects_component(description);
        let seismic = seismic_enabled
            .then(|| seismic_component(coordinates, occurred_at, quakes));

        let total = magnetic + shape + physical_effects + seismic.unwrap_or(0.0);

        Self {
            magnetic,
            shape,
            physical_effects,
            seismic,
            total,
            label: label_for(total, seismic_enabled),
            seismic_enabled,
        }
    }
}

/// Magnetic signature component: low anomaly reads as piezoelectric terrain.
///
/// Missing coordinates score 0; an unknown anomaly scores the neutral 10;
/// otherwise `|anomaly|` buckets as `<50 → 30`, `<100 → 20`, `<200 → 10`,
/// else 0.
#[must_use]
pub fn magnetic_component(coordinates: Option<(f64, f64)>, anomaly: Option<f64>) -> f64 {
    if coordinates.is_none() {
        return 0.0;
    }
    let Some(anomaly) = anomaly else {
        return MAGNETIC_UNKNOWN;
    };
    let abs = anomaly.abs();
    if abs < 50.0 {
        30.0
    } else if abs < 100.0 {
        20.0
    } else if abs < 200.0 {
        10.0
    } else {
        0.0
    }
}

/// Shape component: case-insensitive substring match against the weight
/// table, zero for structured craft, neutral 5 for anything unrecognized.
#[must_use]
pub fn shape_component(shape: Option<&str>) -> f64 {
    let Some(shape) = shape else {
        return SHAPE_DEFAULT;
    };
    let shape = shape.trim().to_lowercase();
    if shape.is_empty() {
        return SHAPE_DEFAULT;
    }

    for (pattern, weight) in SHAPE_WEIGHTS {
        if shape.contains(pattern) {
            return 20.0 * weight;
        }
    }

    if STRUCTURED_SHAPES.iter().any(|s| shape.contains(s)) {
        return 0.0;
    }

    SHAPE_DEFAULT
}

/// Physical-effects component: 5 points per distinct keyword hit, capped at 25.
#[must_use]
pub fn physical_effects_component(description: Option<&str>) -> f64 {
    let Some(description) = description else {
        return 0.0;
    };
    if description.is_empty() {
        return 0.0;
    }

    let text = description.to_lowercase();
    let matches = EFFECT_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count();

    (matches as f64 * 5.0).min(PHYSICAL_MAX)
}

/// Seismic proximity component: the best single candidate within 150 km and
/// 72 h, weighted by distance, recency, and magnitude.
#[must_use]
pub fn seismic_component(
    coordinates: Option<(f64, f64)>,
    occurred_at: DateTime<Utc>,
    quakes: &[NearbyQuake],
) -> f64 {
    let Some((lat, lon)) = coordinates else {
        return 0.0;
    };

    let mut best = 0.0_f64;
    for quake in quakes {
        let dist = distance_km(lat, lon, quake.latitude, quake.longitude);
        let delta_hours =
            (occurred_at - quake.occurred_at).num_seconds().abs() as f64 / 3600.0;

        if dist > SEISMIC_RADIUS_KM || delta_hours > SEISMIC_WINDOW_HOURS {
            continue;
        }

        let dist_factor = (1.0 - dist / SEISMIC_RADIUS_KM).max(0.0);
        let time_factor = (1.0 - delta_hours / SEISMIC_WINDOW_HOURS).max(0.0);
        let mag_factor = quake
            .magnitude
            .map_or(0.5, |mag| (mag / 5.0).min(1.0));

        best = best.max(SEISMIC_MAX * dist_factor * time_factor * mag_factor);
    }
    best
}

/// Maps a total to its qualitative label. Thresholds scale with the enabled
/// component mix: 55/35 out of 75 with seismic disabled, 70/40 out of 100
/// with it enabled.
#[must_use]
pub fn label_for(total: f64, seismic_enabled: bool) -> ScoreLabel {
    let (high, moderate) = if seismic_enabled {
        (70.0, 40.0)
    } else {
        (55.0, 35.0)
    };
    if total >= high {
        ScoreLabel::High
    } else if total >= moderate {
        ScoreLabel::Moderate
    } else {
        ScoreLabel::Low
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const COORDS: Option<(f64, f64)> = Some((37.7, -122.4));

    #[test]
    fn magnetic_buckets_resolve_to_lower_bucket_at_boundaries() {
        assert_eq!(magnetic_component(COORDS, Some(49.9)), 30.0);
        assert_eq!(magnetic_component(COORDS, Some(50.0)), 20.0);
        assert_eq!(magnetic_component(COORDS, Some(99.9)), 20.0);
        assert_eq!(magnetic_component(COORDS, Some(100.0)), 10.0);
        assert_eq!(magnetic_component(COORDS, Some(199.9)), 10.0);
        assert_eq!(magnetic_component(COORDS, Some(200.0)), 0.0);
        assert_eq!(magnetic_component(COORDS, Some(350.0)), 0.0);
    }

    #[test]
    fn magnetic_uses_absolute_anomaly() {
        assert_eq!(magnetic_component(COORDS, Some(-30.0)), 30.0);
        assert_eq!(magnetic_component(COORDS, Some(-150.0)), 10.0);
    }

    #[test]
    fn magnetic_defaults() {
        // No coordinates at all
        assert_eq!(magnetic_component(None, None), 0.0);
        // Coordinates present but out of grid: neutral default
        assert_eq!(magnetic_component(COORDS, None), 10.0);
    }

    #[test]
    fn shape_substring_match_is_case_insensitive() {
        assert_eq!(shape_component(Some("orb")), 20.0);
        assert_eq!(shape_component(Some("Orb-like object")), 20.0);
        assert_eq!(shape_component(Some("FIREBALL")), 18.0);
        assert_eq!(shape_component(Some("bright light")), 16.0);
        assert_eq!(shape_component(Some("egg")), 14.0);
        assert_eq!(shape_component(Some("changing")), 12.0);
    }

    #[test]
    fn structured_craft_shapes_score_zero() {
        assert_eq!(shape_component(Some("triangle")), 0.0);
        assert_eq!(shape_component(Some("black chevron")), 0.0);
        assert_eq!(shape_component(Some("Cigar")), 0.0);
    }

    #[test]
    fn unknown_shape_scores_neutral_default() {
        assert_eq!(shape_component(None), 5.0);
        assert_eq!(shape_component(Some("")), 5.0);
        assert_eq!(shape_component(Some("  ")), 5.0);
        assert_eq!(shape_component(Some("teardrop")), 5.0);
    }

    #[test]
    fn physical_effects_counts_distinct_keywords() {
        assert_eq!(physical_effects_component(None), 0.0);
        assert_eq!(physical_effects_component(Some("")), 0.0);
        assert_eq!(physical_effects_component(Some("nothing unusual")), 0.0);
        assert_eq!(
            physical_effects_component(Some("felt a tremor and static in the air")),
            10.0
        );
        // Repeating one keyword does not add points
        assert_eq!(
            physical_effects_component(Some("static static static")),
            5.0
        );
    }

    #[test]
    fn physical_effects_caps_at_25() {
        let description =
            "earthquake tremor shaking rumbling static electrical tingling compass";
        assert_eq!(physical_effects_component(Some(description)), 25.0);
    }

    fn at(hour: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    #[test]
    fn seismic_component_takes_best_candidate() {
        let quakes = [
            // Far away: excluded by radius
            NearbyQuake {
                latitude: 45.0,
                longitude: -100.0,
                occurred_at: at(0),
                magnitude: Some(5.0),
            },
            // Same spot, same hour, strong magnitude: near-full score
            NearbyQuake {
                latitude: 37.7,
                longitude: -122.4,
                occurred_at: at(12),
                magnitude: Some(6.0),
            },
        ];
        let score = seismic_component(COORDS, at(12), &quakes);
        assert!((score - 25.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn seismic_component_defaults_magnitude_factor() {
        let quakes = [NearbyQuake {
            latitude: 37.7,
            longitude: -122.4,
            occurred_at: at(12),
            magnitude: None,
        }];
        let score = seismic_component(COORDS, at(12), &quakes);
        assert!((score - 12.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn seismic_component_zero_without_events_or_coordinates() {
        assert_eq!(seismic_component(COORDS, at(0), &[]), 0.0);
        let quakes = [NearbyQuake {
            latitude: 37.7,
            longitude: -122.4,
            occurred_at: at(0),
            magnitude: Some(5.0),
        }];
        assert_eq!(seismic_component(None, at(0), &quakes), 0.0);
    }

    #[test]
    fn labels_scale_with_component_mix() {
        assert_eq!(label_for(55.0, false), ScoreLabel::High);
        assert_eq!(label_for(54.9, false), ScoreLabel::Moderate);
        assert_eq!(label_for(35.0, false), ScoreLabel::Moderate);
        assert_eq!(label_for(34.9, false), ScoreLabel::Low);

        assert_eq!(label_for(70.0, true), ScoreLabel::High);
        assert_eq!(label_for(55.0, true), ScoreLabel::Moderate);
        assert_eq!(label_for(39.9, true), ScoreLabel::Low);
    }

    #[test]
    fn structured_shape_outside_grid_totals_ten_and_low() {
        let breakdown = ScoreBreakdown::compute(
            Some((45.0, -100.0)),
            None,
            Some("triangle"),
            Some("nothing unusual"),
            at(12),
            &[],
            false,
        );
        assert_eq!(breakdown.magnetic, 10.0);
        assert_eq!(breakdown.shape, 0.0);
        assert_eq!(breakdown.physical_effects, 0.0);
        assert_eq!(breakdown.seismic, None);
        assert_eq!(breakdown.total, 10.0);
        assert_eq!(breakdown.label, ScoreLabel::Low);
    }

    #[test]
    fn breakdown_records_enabled_mix() {
        let enabled = ScoreBreakdown::compute(
            COORDS,
            Some(30.0),
            Some("orb"),
            None,
            at(12),
            &[],
            true,
        );
        assert!(enabled.seismic_enabled);
        assert_eq!(enabled.seismic, Some(0.0));
        assert_eq!(enabled.total, 50.0);
        assert_eq!(enabled.label, ScoreLabel::Moderate);

        let disabled = ScoreBreakdown::compute(
            COORDS,
            Some(30.0),
            Some("orb"),
            None,
            at(12),
            &[],
            false,
        );
        assert!(!disabled.seismic_enabled);
        assert_eq!(disabled.total, 50.0);
        assert_eq!(disabled.label, ScoreLabel::Moderate);
    }
}
