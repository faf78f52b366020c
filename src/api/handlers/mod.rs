//! REST endpoint handlers organized by resource.

pub mod events;
pub mod reports;
pub mod score;
pub mod stats;
pub mod system;
pub mod watches;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(reports::routes())
        .merge(watches::routes())
        .merge(score::routes())
        .merge(stats::routes())
        .merge(events::routes())
}
