//! Sighting report records: raw ingestion shape and persisted row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw sighting record as handed over by the upstream report source.
///
/// This is the plain-data ingestion interface: the scraper (an external
/// collaborator) produces these, and `POST /api/v1/reports/ingest` accepts
/// them as a JSON batch. Coordinates may already be resolved upstream.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RawSightingRecord {
    /// Source-assigned identifier, unique per report. Used for
    /// de-duplication.
    pub external_id: String,
    /// When the sighting occurred.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    /// Free-text city.
    #[serde(default)]
    pub city: Option<String>,
    /// Free-text state or region.
    #[serde(default)]
    pub state: Option<String>,
    /// Free-text country.
    #[serde(default)]
    pub country: Option<String>,
    /// Reported shape label.
    #[serde(default)]
    pub shape: Option<String>,
    /// Duration in seconds, when the source could parse it.
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    /// Original duration text.
    #[serde(default)]
    pub duration_text: Option<String>,
    /// Free-text description of the sighting.
    #[serde(default)]
    pub description: Option<String>,
    /// Resolved latitude, when geocoded upstream.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Resolved longitude, when geocoded upstream.
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A persisted sighting report.
///
/// Created on ingestion with nulls for all computed fields, mutated once by
/// scoring (anomaly, score, breakdown, `scored` flag), never deleted.
#[derive(Debug, Clone, Serialize)]
pub struct SightingReport {
    /// Database row id.
    pub id: i64,
    /// Source-assigned identifier (unique).
    pub external_id: String,
    /// When the sighting occurred.
    pub occurred_at: Option<DateTime<Utc>>,
    /// Free-text city.
    pub city: Option<String>,
    /// Free-text state or region.
    pub state: Option<String>,
    /// Free-text country.
    pub country: Option<String>,
    /// Reported shape label.
    pub shape: Option<String>,
    /// Duration in seconds.
    pub duration_seconds: Option<i64>,
    /// Original duration text.
    pub duration_text: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Resolved latitude.
    pub latitude: Option<f64>,
    /// Resolved longitude.
    pub longitude: Option<f64>,
    /// Grid anomaly sampled at the resolved coordinates, in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Composite score, set by the scoring job.
    pub score: Option<f64>,
    /// Structured score breakdown, set by the scoring job.
    pub score_breakdown: Option<serde_json::Value>,
    /// Whether coordinates have been resolved.
    pub geocoded: bool,
    /// Whether the scoring job has processed this report.
    pub scored: bool,
    /// When the row was ingested.
    pub ingested_at: DateTime<Utc>,
}

impl SightingReport {
    /// Returns the resolved `(latitude, longitude)` pair, if both are set.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn report() -> SightingReport {
        SightingReport {
            id: 1,
            external_id: "r-1".to_string(),
            occurred_at: None,
            city: None,
            state: None,
            country: None,
            shape: None,
            duration_seconds: None,
            duration_text: None,
            description: None,
            latitude: Some(37.7),
            longitude: Some(-122.4),
            magnetic_anomaly: None,
            score: None,
            score_breakdown: None,
            geocoded: true,
            scored: false,
            ingested_at: Utc::now(),
        }
    }

    #[test]
    fn coordinates_require_both_axes() {
        let mut r = report();
        assert_eq!(r.coordinates(), Some((37.7, -122.4)));

        r.longitude = None;
        assert_eq!(r.coordinates(), None);
    }

    #[test]
    fn raw_record_deserializes_with_defaults() {
        let json = r#"{"external_id": "abc", "occurred_at": null}"#;
        let Ok(raw) = serde_json::from_str::<RawSightingRecord>(json) else {
            panic!("minimal raw record should deserialize");
        };
        assert_eq!(raw.external_id, "abc");
        assert!(raw.shape.is_none());
        assert!(raw.latitude.is_none());
    }
}
