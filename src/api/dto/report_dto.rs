//! Sighting report DTOs for ingestion and list endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common_dto::default_limit;
use crate::domain::score::GeologyZone;
use crate::domain::{RawSightingRecord, SightingReport};

/// Request body for `POST /reports/ingest`: a raw record batch.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IngestRequest {
    /// Raw sighting records as produced by the report source.
    pub reports: Vec<RawSightingRecord>,
}

/// Query parameters for `GET /reports`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ReportQuery {
    /// Days of history to include. Defaults to 30.
    #[serde(default = "default_days")]
    pub days: i64,
    /// Minimum composite score; 0 disables the filter.
    #[serde(default)]
    pub min_score: f64,
    /// Maximum number of reports (clamped to 200).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_days() -> i64 {
    30
}

/// Query parameters for `GET /reports/by-zone`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ZoneQuery {
    /// Magnetic zone filter.
    #[serde(default = "default_zone")]
    pub zone: GeologyZone,
    /// Maximum number of reports (clamped to 200).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_zone() -> GeologyZone {
    GeologyZone::LowMagnetic
}

/// Query parameters for `GET /reports/top`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct TopQuery {
    /// Minimum composite score. Defaults to 60.
    #[serde(default = "default_top_score")]
    pub min_score: f64,
    /// Maximum number of reports (clamped to 100).
    #[serde(default = "default_top_limit")]
    pub limit: i64,
}

fn default_top_score() -> f64 {
    60.0
}

fn default_top_limit() -> i64 {
    20
}

/// One sighting report as surfaced by the API. Missing derived fields stay
/// `null` rather than erroring.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReportDto {
    /// Row id.
    pub id: i64,
    /// Source-assigned identifier.
    pub external_id: String,
    /// When the sighting occurred.
    pub occurred_at: Option<DateTime<Utc>>,
    /// City label.
    pub city: Option<String>,
    /// State label.
    pub state: Option<String>,
    /// Reported shape.
    pub shape: Option<String>,
    /// Resolved latitude.
    pub latitude: Option<f64>,
    /// Resolved longitude.
    pub longitude: Option<f64>,
    /// Composite score, when scored.
    pub score: Option<f64>,
    /// Structured score breakdown, when scored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<serde_json::Value>,
    /// Sampled grid anomaly in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Description, truncated to 200 characters.
    pub description: Option<String>,
}

impl ReportDto {
    /// Builds the list-endpoint projection (no breakdown).
    #[must_use]
    pub fn from_report(report: &SightingReport) -> Self {
        Self::project(report, false)
    }

    /// Builds the detail projection including the score breakdown.
    #[must_use]
    pub fn with_breakdown(report: &SightingReport) -> Self {
        Self::project(report, true)
    }

    fn project(report: &SightingReport, include_breakdown: bool) -> Self {
        Self {
            id: report.id,
            external_id: report.external_id.clone(),
            occurred_at: report.occurred_at,
            city: report.city.clone(),
            state: report.state.clone(),
            shape: report.shape.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            score: report.score,
            score_breakdown: include_breakdown
                .then(|| report.score_breakdown.clone())
                .flatten(),
            magnetic_anomaly: report.magnetic_anomaly,
            description: report
                .description
                .as_ref()
                .map(|d| d.chars().take(200).collect()),
        }
    }
}

/// List response for the report endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReportListResponse {
    /// Number of reports returned.
    pub count: usize,
    /// The reports.
    pub reports: Vec<ReportDto>,
}
