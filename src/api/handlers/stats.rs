//! Aggregate statistics, correlation, and hotspot handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    clamp_limit, CorrelationResponse, HistogramResponse, HotspotDto, HotspotListResponse,
    LimitParams, StatsGeology, StatsResponse, StatsTotals, ZoneBreakdown,
};
use crate::app_state::AppState;
use crate::domain::score::ZONE_BOUNDARY_NT;
use crate::error::TrackerError;
use crate::persistence::models::CorrelationRow;

/// Minimum reports with magnetic data before the correlation breakdown is
/// considered meaningful.
const MIN_CORRELATION_REPORTS: usize = 10;

/// Shape labels counted as orb-like by the zone breakdown.
const ORB_SHAPES: &[&str] = &["orb", "sphere", "circle", "light", "fireball", "flash"];

/// `GET /stats` — System-wide counters.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "Stats",
    summary = "System statistics",
    responses(
        (status = 200, description = "Counters and averages", body = StatsResponse),
    )
)]
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let totals = state.store.totals().await?;

    Ok(Json(StatsResponse {
        timestamp: Utc::now(),
        totals: StatsTotals {
            sighting_reports: totals.sightings,
            seismic_events: totals.seismic_events,
            reports_with_magnetic_data: totals.with_anomaly,
        },
        geology: StatsGeology {
            low_magnetic_reports: totals.low_magnetic,
            high_score_reports: totals.high_score,
            average_score: totals.avg_score.map(round1),
        },
    }))
}

/// `GET /stats/histogram` — Score distribution in 10-point buckets.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/stats/histogram",
    tag = "Stats",
    summary = "Score histogram",
    responses(
        (status = 200, description = "Bucketed score counts", body = HistogramResponse),
    )
)]
pub async fn histogram(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let buckets = state.store.score_histogram().await?;
    Ok(Json(HistogramResponse { buckets }))
}

/// `GET /correlation` — Zone breakdown of scores and orb-like shapes.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/correlation",
    tag = "Stats",
    summary = "Magnetic zone correlation breakdown",
    description = "Splits reports with magnetic data at the |anomaly| < 100 nT boundary and compares counts, average scores, and orb-shape percentages. Reports `insufficient_data` below 10 reports.",
    responses(
        (status = 200, description = "Per-zone aggregates", body = CorrelationResponse),
    )
)]
pub async fn correlation(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let rows = state.store.correlation_rows().await?;

    if rows.len() < MIN_CORRELATION_REPORTS {
        return Ok(Json(CorrelationResponse {
            status: "insufficient_data",
            total_reports: rows.len(),
            low_magnetic: None,
            high_magnetic: None,
        }));
    }

    let (low, high): (Vec<&CorrelationRow>, Vec<&CorrelationRow>) = rows.iter().partition(|r| {
        r.magnetic_anomaly
            .map(|a| a.abs() < ZONE_BOUNDARY_NT)
            .unwrap_or(false)
    });

    Ok(Json(CorrelationResponse {
        status: "ok",
        total_reports: rows.len(),
        low_magnetic: Some(zone_breakdown(&low)),
        high_magnetic: Some(zone_breakdown(&high)),
    }))
}

/// `GET /hotspots` — Cached per-location aggregates.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/hotspots",
    tag = "Stats",
    summary = "Hotspot locations",
    params(LimitParams),
    responses(
        (status = 200, description = "Hotspots, best average score first", body = HotspotListResponse),
    )
)]
pub async fn hotspots(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<impl IntoResponse, TrackerError> {
    let hotspots = state.hotspots.list(clamp_limit(params.limit, 100)).await?;

    let hotspots: Vec<HotspotDto> = hotspots.iter().map(HotspotDto::from).collect();
    Ok(Json(HotspotListResponse {
        count: hotspots.len(),
        hotspots,
    }))
}

fn zone_breakdown(rows: &[&CorrelationRow]) -> ZoneBreakdown {
    let scores: Vec<f64> = rows.iter().filter_map(|r| r.score).collect();
    let avg_score = if scores.is_empty() {
        None
    } else {
        Some(round1(scores.iter().sum::<f64>() / scores.len() as f64))
    };

    let orb_count = rows
        .iter()
        .filter(|r| {
            r.shape
                .as_deref()
                .map(|s| ORB_SHAPES.contains(&s.trim().to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .count();
    let orb_percentage = if rows.is_empty() {
        None
    } else {
        Some(round1(100.0 * orb_count as f64 / rows.len() as f64))
    };

    ZoneBreakdown {
        count: rows.len(),
        avg_score,
        orb_percentage,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Stats routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/stats/histogram", get(histogram))
        .route("/correlation", get(correlation))
        .route("/hotspots", get(hotspots))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn row(anomaly: Option<f64>, score: Option<f64>, shape: Option<&str>) -> CorrelationRow {
        CorrelationRow {
            magnetic_anomaly: anomaly,
            score,
            shape: shape.map(str::to_string),
        }
    }

    #[test]
    fn zone_breakdown_averages_and_counts_orbs() {
        let rows = [
            row(Some(20.0), Some(60.0), Some("Orb")),
            row(Some(30.0), Some(40.0), Some("triangle")),
            row(Some(40.0), None, Some("light")),
        ];
        let refs: Vec<&CorrelationRow> = rows.iter().collect();
        let breakdown = zone_breakdown(&refs);

        assert_eq!(breakdown.count, 3);
        assert_eq!(breakdown.avg_score, Some(50.0));
        // "Orb" and "light" are orb-like: 2 of 3
        assert_eq!(breakdown.orb_percentage, Some(66.7));
    }

    #[test]
    fn empty_zone_has_no_aggregates() {
        let breakdown = zone_breakdown(&[]);
        assert_eq!(breakdown.count, 0);
        assert_eq!(breakdown.avg_score, None);
        assert_eq!(breakdown.orb_percentage, None);
    }
}
