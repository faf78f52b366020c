//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::PostgresStore;
use crate::service::{HotspotService, IngestService, ScoringEngine, WatchManager};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Everything here is constructed once at process start and passed by
/// handle; there are no process-global singletons.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Direct store access for read-only aggregate queries.
    pub store: PostgresStore,
    /// Scoring engine over the shared anomaly grid.
    pub scoring: Arc<ScoringEngine>,
    /// Watch lifecycle manager.
    pub watches: Arc<WatchManager>,
    /// Raw record ingestion.
    pub ingest: Arc<IngestService>,
    /// Hotspot aggregates.
    pub hotspots: Arc<HotspotService>,
}
