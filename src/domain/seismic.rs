//! Seismic event records: raw catalog shape and persisted row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::NearbyQuake;

/// A raw seismic event as produced by the earthquake catalog client.
///
/// Rows missing an identifier, origin time, or coordinates are dropped at
/// the parsing boundary, so these fields are always present here.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RawSeismicRecord {
    /// Catalog-assigned identifier, unique per event.
    pub external_id: String,
    /// Event origin time.
    pub occurred_at: DateTime<Utc>,
    /// Epicenter latitude in degrees.
    pub latitude: f64,
    /// Epicenter longitude in degrees.
    pub longitude: f64,
    /// Hypocenter depth in kilometres.
    #[serde(default)]
    pub depth_km: Option<f64>,
    /// Reported magnitude.
    #[serde(default)]
    pub magnitude: Option<f64>,
    /// Magnitude scale label (e.g. `"ml"`, `"mw"`).
    #[serde(default)]
    pub magnitude_type: Option<String>,
    /// Human-readable place description.
    #[serde(default)]
    pub place: Option<String>,
}

/// A persisted seismic event. Immutable after ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct SeismicEvent {
    /// Database row id.
    pub id: i64,
    /// Catalog-assigned identifier (unique).
    pub external_id: String,
    /// Event origin time.
    pub occurred_at: DateTime<Utc>,
    /// Epicenter latitude in degrees.
    pub latitude: f64,
    /// Epicenter longitude in degrees.
    pub longitude: f64,
    /// Hypocenter depth in kilometres.
    pub depth_km: Option<f64>,
    /// Reported magnitude.
    pub magnitude: Option<f64>,
    /// Magnitude scale label.
    pub magnitude_type: Option<String>,
    /// Human-readable place description.
    pub place: Option<String>,
    /// When the row was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl SeismicEvent {
    /// Projects the event into the shape consumed by the seismic proximity
    /// score component.
    #[must_use]
    pub fn as_nearby_quake(&self) -> NearbyQuake {
        NearbyQuake {
            latitude: self.latitude,
            longitude: self.longitude,
            occurred_at: self.occurred_at,
            magnitude: self.magnitude,
        }
    }
}
