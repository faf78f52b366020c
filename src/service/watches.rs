//! Watch lifecycle service: open, expire, and match against the store.
//!
//! The decision rules (eligibility, probability buckets, window matching)
//! live in [`crate::domain::watch`] as pure functions; this service applies
//! them against persisted state. Per-record failures inside a batch are
//! logged and skipped so one bad row never aborts a run.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::watch::{open_eligible, Watch};
use crate::domain::{MagneticGrid, RawSeismicRecord, SightingReport, WatchId, WatchMatch, WatchStatus};
use crate::error::TrackerError;
use crate::persistence::PostgresStore;

/// Orchestrates the watch lifecycle against the store.
#[derive(Debug, Clone)]
pub struct WatchManager {
    store: PostgresStore,
    grid: Arc<MagneticGrid>,
    radius_km: f64,
}

impl WatchManager {
    /// Creates a new `WatchManager` with the configured watch radius.
    #[must_use]
    pub fn new(store: PostgresStore, grid: Arc<MagneticGrid>, radius_km: f64) -> Self {
        Self {
            store,
            grid,
            radius_km,
        }
    }

    /// Opens a watch for a qualifying seismic event.
    ///
    /// Returns `Ok(None)` when the event does not qualify (magnitude below
    /// 3.0 or older than the window), when a watch already exists for its
    /// external id, or when a concurrent open won the insert race. The
    /// storage constraint is the authority; the lookup here is only a
    /// cheap pre-check.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn open_watch(
        &self,
        event: &RawSeismicRecord,
        now: DateTime<Utc>,
    ) -> Result<Option<Watch>, TrackerError> {
        if !open_eligible(event.magnitude, event.occurred_at, now) {
            return Ok(None);
        }
        if self.store.watch_exists(&event.external_id).await? {
            return Ok(None);
        }

        // Keep the event row around even if it arrived outside the normal
        // ingestion path; the insert is idempotent on external id.
        self.store.insert_seismic(event).await?;

        let anomaly = self.grid.anomaly(event.latitude, event.longitude).await;
        let watch = Watch::open(event, anomaly, self.radius_km);

        if self.store.insert_watch(&watch).await? {
            tracing::info!(
                watch_id = %watch.id,
                event_id = %watch.seismic_external_id,
                magnitude = ?watch.magnitude,
                piezo_probability = watch.piezo_probability,
                "watch opened"
            );
            Ok(Some(watch))
        } else {
            Ok(None)
        }
    }

    /// Opens watches for a batch of events, containing per-event failures.
    /// Returns the number of watches opened.
    pub async fn open_watches(&self, events: &[RawSeismicRecord], now: DateTime<Utc>) -> usize {
        let mut opened = 0;
        for event in events {
            match self.open_watch(event, now).await {
                Ok(Some(_)) => opened += 1,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(external_id = %event.external_id, %err, "watch open failed, event skipped");
                }
            }
        }
        opened
    }

    /// Expires every active watch whose window ended before `now`.
    /// Returns the count transitioned.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn expire_due_watches(&self, now: DateTime<Utc>) -> Result<u64, TrackerError> {
        let expired = self.store.expire_due_watches(now).await?;
        if expired > 0 {
            tracing::info!(expired, "watches expired");
        }
        Ok(expired)
    }

    /// Matches candidate reports against all active watches.
    ///
    /// The nested loop is O(active watches × candidate reports), which is
    /// fine at the volumes involved (hundreds × thousands per run). The
    /// watch snapshot is taken once, so a watch triggered mid-run keeps
    /// collecting match records from the same batch; only the first match
    /// flips its status. Returns the number of new match rows.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] when the active-watch fetch
    /// fails. Per-pair insert failures are logged and skipped.
    pub async fn match_reports(
        &self,
        reports: &[SightingReport],
        now: DateTime<Utc>,
    ) -> Result<usize, TrackerError> {
        let active = self.store.active_watches().await?;
        if active.is_empty() || reports.is_empty() {
            return Ok(0);
        }

        let mut matched = 0;
        for report in reports {
            for watch in &active {
                let Some(hit) = watch.match_report(report, now) else {
                    continue;
                };

                match self
                    .store
                    .insert_match(watch.id, report.id, hit.distance_km, hit.time_delta_hours)
                    .await
                {
                    Ok(true) => {
                        matched += 1;
                        if let Err(err) = self.store.trigger_watch(watch.id).await {
                            tracing::warn!(watch_id = %watch.id, %err, "trigger update failed");
                        }
                        tracing::info!(
                            watch_id = %watch.id,
                            sighting_id = report.id,
                            distance_km = hit.distance_km,
                            time_delta_hours = hit.time_delta_hours,
                            "watch matched"
                        );
                    }
                    Ok(false) => {} // already recorded on an earlier run
                    Err(err) => {
                        tracing::warn!(
                            watch_id = %watch.id,
                            sighting_id = report.id,
                            %err,
                            "match insert failed, pair skipped"
                        );
                    }
                }
            }
        }
        Ok(matched)
    }

    /// Returns watches, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn list(
        &self,
        status: Option<WatchStatus>,
        limit: i64,
    ) -> Result<Vec<Watch>, TrackerError> {
        self.store.watches_by_status(status, limit).await
    }

    /// Returns one watch with its recorded matches.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WatchNotFound`] for an unknown id, or
    /// [`TrackerError::Persistence`] on database failure.
    pub async fn detail(&self, id: WatchId) -> Result<(Watch, Vec<WatchMatch>), TrackerError> {
        let watch = self
            .store
            .watch_by_id(id)
            .await?
            .ok_or(TrackerError::WatchNotFound(*id.as_uuid()))?;
        let matches = self.store.matches_for_watch(id).await?;
        Ok((watch, matches))
    }
}
