//! DTOs for the statistics, correlation, hotspot, and event endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{HotspotSummary, SeismicEvent};
use crate::persistence::models::ScoreBucket;

/// Query parameters for `GET /earthquakes`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct EarthquakeQuery {
    /// Days of history to include. Defaults to 7.
    #[serde(default = "default_eq_days")]
    pub days: i64,
    /// Minimum magnitude filter. Defaults to 3.0.
    #[serde(default = "default_eq_magnitude")]
    pub min_magnitude: f64,
    /// Maximum number of events (clamped to 200).
    #[serde(default = "default_eq_limit")]
    pub limit: i64,
}

fn default_eq_days() -> i64 {
    7
}

fn default_eq_magnitude() -> f64 {
    3.0
}

fn default_eq_limit() -> i64 {
    100
}

/// One seismic event as surfaced by the API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EarthquakeDto {
    /// Row id.
    pub id: i64,
    /// Catalog-assigned identifier.
    pub external_id: String,
    /// Event origin time.
    pub occurred_at: DateTime<Utc>,
    /// Epicenter latitude.
    pub latitude: f64,
    /// Epicenter longitude.
    pub longitude: f64,
    /// Magnitude.
    pub magnitude: Option<f64>,
    /// Place description.
    pub place: Option<String>,
}

impl From<&SeismicEvent> for EarthquakeDto {
    fn from(event: &SeismicEvent) -> Self {
        Self {
            id: event.id,
            external_id: event.external_id.clone(),
            occurred_at: event.occurred_at,
            latitude: event.latitude,
            longitude: event.longitude,
            magnitude: event.magnitude,
            place: event.place.clone(),
        }
    }
}

/// List response for `GET /earthquakes`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EarthquakeListResponse {
    /// Number of events returned.
    pub count: usize,
    /// The events.
    pub earthquakes: Vec<EarthquakeDto>,
}

/// Response for `GET /stats`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StatsResponse {
    /// Server timestamp.
    pub timestamp: DateTime<Utc>,
    /// Record counters.
    pub totals: StatsTotals,
    /// Geology-focused counters.
    pub geology: StatsGeology,
}

/// Record counters inside [`StatsResponse`].
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StatsTotals {
    /// Total sighting reports.
    pub sighting_reports: i64,
    /// Total seismic events.
    pub seismic_events: i64,
    /// Reports with a sampled anomaly.
    pub reports_with_magnetic_data: i64,
}

/// Geology counters inside [`StatsResponse`].
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StatsGeology {
    /// Reports in the low-magnetic zone.
    pub low_magnetic_reports: i64,
    /// Reports scoring at least 60.
    pub high_score_reports: i64,
    /// Average composite score, rounded to one decimal.
    pub average_score: Option<f64>,
}

/// Score histogram response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HistogramResponse {
    /// 10-point buckets with counts.
    pub buckets: Vec<ScoreBucket>,
}

/// Per-zone aggregate inside the correlation response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ZoneBreakdown {
    /// Reports in the zone.
    pub count: usize,
    /// Average composite score of scored reports in the zone.
    pub avg_score: Option<f64>,
    /// Share of reports with an orb-like shape, in percent.
    pub orb_percentage: Option<f64>,
}

/// Response for `GET /correlation`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CorrelationResponse {
    /// `"ok"` or `"insufficient_data"`.
    pub status: &'static str,
    /// Reports considered.
    pub total_reports: usize,
    /// Low-magnetic zone aggregate (`|anomaly| < 100 nT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_magnetic: Option<ZoneBreakdown>,
    /// High-magnetic zone aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_magnetic: Option<ZoneBreakdown>,
}

/// One hotspot row as surfaced by the API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HotspotDto {
    /// City label.
    pub city: Option<String>,
    /// State label.
    pub state: Option<String>,
    /// Representative latitude.
    pub latitude: Option<f64>,
    /// Representative longitude.
    pub longitude: Option<f64>,
    /// Reports at this location.
    pub report_count: i64,
    /// Average composite score.
    pub avg_score: Option<f64>,
    /// Average grid anomaly in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Share of reports that matched a watch window.
    pub seismic_ratio: Option<f64>,
}

impl From<&HotspotSummary> for HotspotDto {
    fn from(h: &HotspotSummary) -> Self {
        Self {
            city: h.city.clone(),
            state: h.state.clone(),
            latitude: h.latitude,
            longitude: h.longitude,
            report_count: h.report_count,
            avg_score: h.avg_score,
            magnetic_anomaly: h.magnetic_anomaly,
            seismic_ratio: h.seismic_ratio,
        }
    }
}

/// List response for `GET /hotspots`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HotspotListResponse {
    /// Number of hotspots returned.
    pub count: usize,
    /// The hotspots.
    pub hotspots: Vec<HotspotDto>,
}
