//! Watch list and detail handlers.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{WatchDetailResponse, WatchDto, WatchListResponse, WatchMatchDto, WatchQuery};
use crate::app_state::AppState;
use crate::domain::{WatchId, WatchStatus};
use crate::error::{ErrorResponse, TrackerError};

/// `GET /watches` — List watches with an optional status filter.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidStatus`] on an unknown status string, or
/// a store failure.
#[utoipa::path(
    get,
    path = "/api/v1/watches",
    tag = "Watches",
    summary = "List watches",
    params(WatchQuery),
    responses(
        (status = 200, description = "Watches, newest event first", body = WatchListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
    )
)]
pub async fn list_watches(
    State(state): State<AppState>,
    Query(params): Query<WatchQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<WatchStatus>)
        .transpose()?;

    let watches = state
        .watches
        .list(status, params.limit.clamp(1, 200))
        .await?;

    let watches: Vec<WatchDto> = watches.iter().map(WatchDto::from).collect();
    Ok(Json(WatchListResponse {
        count: watches.len(),
        watches,
    }))
}

/// `GET /watches/{id}` — Watch detail with its recorded matches.
///
/// # Errors
///
/// Returns [`TrackerError::WatchNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/watches/{id}",
    tag = "Watches",
    summary = "Get watch details",
    params(
        ("id" = uuid::Uuid, Path, description = "Watch UUID"),
    ),
    responses(
        (status = 200, description = "Watch with matches", body = WatchDetailResponse),
        (status = 404, description = "Watch not found", body = ErrorResponse),
    )
)]
pub async fn get_watch(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, TrackerError> {
    let (watch, matches) = state.watches.detail(WatchId::from_uuid(id)).await?;

    Ok(Json(WatchDetailResponse {
        watch: WatchDto::from(&watch),
        matches: matches.iter().map(WatchMatchDto::from).collect(),
    }))
}

/// Watch routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/watches", get(list_watches))
        .route("/watches/{id}", get(get_watch))
}
