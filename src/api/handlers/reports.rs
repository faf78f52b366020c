//! Sighting report handlers: ingestion and list endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, Utc};

use crate::api::dto::{
    clamp_limit, IngestRequest, ReportDto, ReportListResponse, ReportQuery, TopQuery, ZoneQuery,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, TrackerError};
use crate::service::IngestSummary;

/// `POST /reports/ingest` — Ingest a batch of raw sighting records.
///
/// # Errors
///
/// Returns [`TrackerError`] only on state-level failures; individual bad
/// records are counted in the summary, not raised.
#[utoipa::path(
    post,
    path = "/api/v1/reports/ingest",
    tag = "Reports",
    summary = "Ingest raw sighting records",
    description = "Accepts a batch of raw sighting records from the report source. Duplicates (by external id) are skipped silently; malformed records are counted and dropped.",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Batch processed", body = IngestSummary),
    )
)]
pub async fn ingest_reports(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Result<impl IntoResponse, TrackerError> {
    let summary = state.ingest.ingest_sightings(&req.reports).await;
    Ok((StatusCode::OK, Json(summary)))
}

/// `GET /reports` — Recent reports with optional score filter.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    summary = "List recent reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Recent reports, newest first", body = ReportListResponse),
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let cutoff = Utc::now() - Duration::days(params.days.clamp(1, 365));
    let reports = state
        .store
        .recent_sightings(cutoff, params.min_score, clamp_limit(params.limit, 200))
        .await?;

    let reports: Vec<ReportDto> = reports.iter().map(ReportDto::from_report).collect();
    Ok(Json(ReportListResponse {
        count: reports.len(),
        reports,
    }))
}

/// `GET /reports/by-zone` — Reports filtered by magnetic zone.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/reports/by-zone",
    tag = "Reports",
    summary = "List reports by magnetic zone",
    description = "Filters reports by the |anomaly| < 100 nT zone boundary. Only reports with coordinates and a sampled anomaly participate.",
    params(ZoneQuery),
    responses(
        (status = 200, description = "Zone-filtered reports, best scores first", body = ReportListResponse),
    )
)]
pub async fn reports_by_zone(
    State(state): State<AppState>,
    Query(params): Query<ZoneQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let reports = state
        .store
        .sightings_by_zone(params.zone, clamp_limit(params.limit, 200))
        .await?;

    let reports: Vec<ReportDto> = reports.iter().map(ReportDto::from_report).collect();
    Ok(Json(ReportListResponse {
        count: reports.len(),
        reports,
    }))
}

/// `GET /reports/top` — Highest-scoring reports with breakdowns.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/reports/top",
    tag = "Reports",
    summary = "List top-scoring reports",
    params(TopQuery),
    responses(
        (status = 200, description = "Top reports with score breakdowns", body = ReportListResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
    )
)]
pub async fn top_reports(
    State(state): State<AppState>,
    Query(params): Query<TopQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let reports = state
        .store
        .top_sightings(params.min_score, clamp_limit(params.limit, 100))
        .await?;

    let reports: Vec<ReportDto> = reports.iter().map(ReportDto::with_breakdown).collect();
    Ok(Json(ReportListResponse {
        count: reports.len(),
        reports,
    }))
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/ingest", post(ingest_reports))
        .route("/reports", get(list_reports))
        .route("/reports/by-zone", get(reports_by_zone))
        .route("/reports/top", get(top_reports))
}
