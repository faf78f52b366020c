//! Stateless scoring, anomaly lookup, and proximity lens handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    MagneticResponse, NearestInstallationResponse, PointQuery, ScoreQuery, ScoreResponse,
};
use crate::app_state::AppState;
use crate::domain::installation;
use crate::domain::score::ZONE_BOUNDARY_NT;
use crate::error::{ErrorResponse, TrackerError};

fn validate_point(latitude: f64, longitude: f64) -> Result<(), TrackerError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(TrackerError::InvalidRequest(format!(
            "latitude out of range: {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(TrackerError::InvalidRequest(format!(
            "longitude out of range: {longitude}"
        )));
    }
    Ok(())
}

/// `GET /score` — Score an arbitrary location.
///
/// Stateless: no persisted data is consulted, and no seismic candidates
/// participate (the endpoint scores terrain, not timing).
///
/// # Errors
///
/// Returns [`TrackerError::InvalidRequest`] on out-of-range coordinates.
#[utoipa::path(
    get,
    path = "/api/v1/score",
    tag = "Scoring",
    summary = "Score a location",
    params(ScoreQuery),
    responses(
        (status = 200, description = "Component breakdown and total", body = ScoreResponse),
        (status = 400, description = "Coordinates out of range", body = ErrorResponse),
    )
)]
pub async fn score_location(
    State(state): State<AppState>,
    Query(params): Query<ScoreQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    validate_point(params.latitude, params.longitude)?;

    let breakdown = state
        .scoring
        .score_location(
            params.latitude,
            params.longitude,
            params.shape.as_deref(),
            params.description.as_deref(),
            Utc::now(),
            &[],
        )
        .await;

    let anomaly = state.scoring.anomaly(params.latitude, params.longitude).await;

    Ok(Json(ScoreResponse {
        latitude: params.latitude,
        longitude: params.longitude,
        shape: params.shape,
        score: breakdown,
        magnetic_anomaly: anomaly,
        piezoelectric_zone: anomaly.map(|a| a.abs() < ZONE_BOUNDARY_NT),
    }))
}

/// `GET /magnetic` — Grid anomaly at a point.
///
/// A point outside the grid is not an error: the value is `null` with an
/// explanatory status.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidRequest`] on out-of-range coordinates.
#[utoipa::path(
    get,
    path = "/api/v1/magnetic",
    tag = "Scoring",
    summary = "Magnetic anomaly at a point",
    params(PointQuery),
    responses(
        (status = 200, description = "Anomaly value or out-of-bounds status", body = MagneticResponse),
        (status = 400, description = "Coordinates out of range", body = ErrorResponse),
    )
)]
pub async fn magnetic_at(
    State(state): State<AppState>,
    Query(params): Query<PointQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    validate_point(params.latitude, params.longitude)?;

    let anomaly = state.scoring.anomaly(params.latitude, params.longitude).await;

    let response = match anomaly {
        Some(value) => MagneticResponse {
            latitude: params.latitude,
            longitude: params.longitude,
            magnetic_anomaly: Some(value),
            status: "ok",
            geology_type: Some(if value.abs() < ZONE_BOUNDARY_NT {
                "piezoelectric"
            } else {
                "non_piezoelectric"
            }),
        },
        None => MagneticResponse {
            latitude: params.latitude,
            longitude: params.longitude,
            magnetic_anomaly: None,
            status: "out_of_grid_bounds",
            geology_type: None,
        },
    };

    Ok(Json(response))
}

/// `GET /installations/nearest` — Nearest fixed installation to a point.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidRequest`] on out-of-range coordinates.
#[utoipa::path(
    get,
    path = "/api/v1/installations/nearest",
    tag = "Scoring",
    summary = "Nearest installation lens",
    params(PointQuery),
    responses(
        (status = 200, description = "Nearest installation with lens score", body = NearestInstallationResponse),
        (status = 400, description = "Coordinates out of range", body = ErrorResponse),
    )
)]
pub async fn nearest_installation(
    Query(params): Query<PointQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    validate_point(params.latitude, params.longitude)?;

    let (inst, distance) = installation::nearest(params.latitude, params.longitude)
        .ok_or_else(|| TrackerError::Internal("installation table is empty".to_string()))?;

    Ok(Json(NearestInstallationResponse {
        latitude: params.latitude,
        longitude: params.longitude,
        installation: inst,
        distance_km: distance,
        proximity_score: installation::installation_score(distance),
    }))
}

/// Scoring routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/score", get(score_location))
        .route("/magnetic", get(magnetic_at))
        .route("/installations/nearest", get(nearest_installation))
}
