//! Hotspot aggregation service.

use crate::domain::HotspotSummary;
use crate::error::TrackerError;
use crate::persistence::PostgresStore;

/// Minimum reports a location needs before it appears as a hotspot.
const MIN_REPORTS_PER_HOTSPOT: i64 = 3;

/// Rebuilds and serves the per-location aggregates.
#[derive(Debug, Clone)]
pub struct HotspotService {
    store: PostgresStore,
}

impl HotspotService {
    /// Creates a new `HotspotService`.
    #[must_use]
    pub fn new(store: PostgresStore) -> Self {
        Self { store }
    }

    /// Rebuilds the hotspot table from current report data. The table is
    /// purely derived, so a full rebuild is the simplest correct refresh.
    /// Returns the number of aggregate rows written.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn refresh(&self) -> Result<u64, TrackerError> {
        let written = self.store.refresh_hotspots(MIN_REPORTS_PER_HOTSPOT).await?;
        tracing::info!(hotspots = written, "hotspot refresh complete");
        Ok(written)
    }

    /// Returns the cached hotspots, best average score first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn list(&self, limit: i64) -> Result<Vec<HotspotSummary>, TrackerError> {
        self.store.hotspots(limit).await
    }
}
