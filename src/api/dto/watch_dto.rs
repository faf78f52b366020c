//! Watch DTOs for list and detail endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Watch, WatchId, WatchMatch, WatchStatus};

/// Query parameters for `GET /watches`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct WatchQuery {
    /// Optional status filter: `active`, `triggered`, or `expired`.
    #[serde(default)]
    pub status: Option<String>,
    /// Maximum number of watches (clamped to 200).
    #[serde(default = "default_watch_limit")]
    pub limit: i64,
}

fn default_watch_limit() -> i64 {
    50
}

/// One watch as surfaced by the API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WatchDto {
    /// Watch identifier.
    pub id: WatchId,
    /// External id of the source seismic event.
    pub seismic_external_id: String,
    /// Event origin time.
    pub event_at: DateTime<Utc>,
    /// Epicenter latitude.
    pub latitude: f64,
    /// Epicenter longitude.
    pub longitude: f64,
    /// Event magnitude.
    pub magnitude: Option<f64>,
    /// Place description.
    pub place: Option<String>,
    /// Match radius in kilometres.
    pub radius_km: f64,
    /// Window start.
    pub watch_start: DateTime<Utc>,
    /// Window end.
    pub watch_end: Option<DateTime<Utc>>,
    /// Epicenter grid anomaly in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Derived piezoelectric probability in `[0, 1]`.
    pub piezo_probability: f64,
    /// Lifecycle status.
    pub status: WatchStatus,
    /// When the watch was opened.
    pub created_at: DateTime<Utc>,
}

impl From<&Watch> for WatchDto {
    fn from(watch: &Watch) -> Self {
        Self {
            id: watch.id,
            seismic_external_id: watch.seismic_external_id.clone(),
            event_at: watch.event_at,
            latitude: watch.latitude,
            longitude: watch.longitude,
            magnitude: watch.magnitude,
            place: watch.place.clone(),
            radius_km: watch.radius_km,
            watch_start: watch.watch_start,
            watch_end: watch.watch_end,
            magnetic_anomaly: watch.magnetic_anomaly,
            piezo_probability: watch.piezo_probability,
            status: watch.status,
            created_at: watch.created_at,
        }
    }
}

/// One recorded match inside a watch detail response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WatchMatchDto {
    /// Match row id.
    pub id: i64,
    /// Matched sighting row id.
    pub sighting_id: i64,
    /// Distance from the epicenter in kilometres.
    pub distance_km: f64,
    /// Hours elapsed since the watch start.
    pub time_delta_hours: f64,
    /// When the match was recorded.
    pub created_at: DateTime<Utc>,
}

impl From<&WatchMatch> for WatchMatchDto {
    fn from(m: &WatchMatch) -> Self {
        Self {
            id: m.id,
            sighting_id: m.sighting_id,
            distance_km: m.distance_km,
            time_delta_hours: m.time_delta_hours,
            created_at: m.created_at,
        }
    }
}

/// List response for `GET /watches`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WatchListResponse {
    /// Number of watches returned.
    pub count: usize,
    /// The watches.
    pub watches: Vec<WatchDto>,
}

/// Detail response for `GET /watches/{id}`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WatchDetailResponse {
    /// The watch.
    pub watch: WatchDto,
    /// Its recorded matches, oldest first.
    pub matches: Vec<WatchMatchDto>,
}
