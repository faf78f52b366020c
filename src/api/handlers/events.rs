//! Stored seismic event handlers (map overlay data, not predictions).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, Utc};

use crate::api::dto::{clamp_limit, EarthquakeDto, EarthquakeListResponse, EarthquakeQuery};
use crate::app_state::AppState;
use crate::error::TrackerError;

/// `GET /earthquakes` — Recent stored seismic events.
///
/// # Errors
///
/// Returns [`TrackerError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/earthquakes",
    tag = "Earthquakes",
    summary = "List recent earthquakes",
    params(EarthquakeQuery),
    responses(
        (status = 200, description = "Stored events, newest first", body = EarthquakeListResponse),
    )
)]
pub async fn list_earthquakes(
    State(state): State<AppState>,
    Query(params): Query<EarthquakeQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let cutoff = Utc::now() - Duration::days(params.days.clamp(1, 30));
    let events = state
        .store
        .recent_seismic(cutoff, params.min_magnitude, clamp_limit(params.limit, 200))
        .await?;

    let earthquakes: Vec<EarthquakeDto> = events.iter().map(EarthquakeDto::from).collect();
    Ok(Json(EarthquakeListResponse {
        count: earthquakes.len(),
        earthquakes,
    }))
}

/// Earthquake routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/earthquakes", get(list_earthquakes))
}
