//! Scoring service: grid-backed score computation and the scoring job.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::score::ScoreBreakdown;
use crate::domain::watch::WATCH_DURATION_HOURS;
use crate::domain::{MagneticGrid, NearbyQuake};
use crate::error::TrackerError;
use crate::persistence::models::ScoreUpdate;
use crate::persistence::PostgresStore;

/// Computes composite scores against the shared anomaly grid.
///
/// Constructed once at startup and handed to the API layer and the
/// scoring job by reference; there is no hidden shared state beyond the
/// read-only grid.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    grid: Arc<MagneticGrid>,
    store: PostgresStore,
    seismic_enabled: bool,
}

impl ScoringEngine {
    /// Creates a new `ScoringEngine`.
    #[must_use]
    pub fn new(grid: Arc<MagneticGrid>, store: PostgresStore, seismic_enabled: bool) -> Self {
        Self {
            grid,
            store,
            seismic_enabled,
        }
    }

    /// Whether the seismic proximity component participates in totals.
    #[must_use]
    pub const fn seismic_enabled(&self) -> bool {
        self.seismic_enabled
    }

    /// Returns the grid anomaly at a point, or `None` outside the grid.
    pub async fn anomaly(&self, lat: f64, lon: f64) -> Option<f64> {
        self.grid.anomaly(lat, lon).await
    }

    /// Scores an arbitrary location. Stateless: usable without any
    /// persisted data, which is how the `/score` endpoint calls it.
    pub async fn score_location(
        &self,
        lat: f64,
        lon: f64,
        shape: Option<&str>,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
        quakes: &[NearbyQuake],
    ) -> ScoreBreakdown {
        let anomaly = self.grid.anomaly(lat, lon).await;
        ScoreBreakdown::compute(
            Some((lat, lon)),
            anomaly,
            shape,
            description,
            occurred_at,
            quakes,
            self.seismic_enabled,
        )
    }

    /// Scores pending reports and writes the results back in one batch.
    /// Returns the number of reports scored.
    ///
    /// Per-report failures are logged and skipped; a report that fails to
    /// serialize simply stays unscored for the next run.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] when the pending fetch or
    /// the final batch write fails.
    pub async fn score_pending(&self, limit: i64) -> Result<usize, TrackerError> {
        let pending = self.store.unscored_sightings(limit).await?;
        if pending.is_empty() {
            return Ok(0);
        }

        // One candidate fetch covers every report in the batch when the
        // seismic component is on; the component itself filters by
        // distance and the 72-hour window.
        let quakes = if self.seismic_enabled {
            let times: Vec<DateTime<Utc>> =
                pending.iter().filter_map(|r| r.occurred_at).collect();
            match (times.iter().min(), times.iter().max()) {
                (Some(&min), Some(&max)) => self
                    .store
                    .seismic_between(
                        min - Duration::hours(WATCH_DURATION_HOURS),
                        max + Duration::hours(WATCH_DURATION_HOURS),
                    )
                    .await?
                    .iter()
                    .map(crate::domain::SeismicEvent::as_nearby_quake)
                    .collect(),
                _ => Vec::new(),
            }
        } else {
            Vec::new()
        };

        let mut updates: Vec<ScoreUpdate> = Vec::with_capacity(pending.len());
        for report in &pending {
            let coordinates = report.coordinates();
            let anomaly = match coordinates {
                Some((lat, lon)) => self.grid.anomaly(lat, lon).await,
                None => None,
            };

            let breakdown = ScoreBreakdown::compute(
                coordinates,
                anomaly,
                report.shape.as_deref(),
                report.description.as_deref(),
                report.occurred_at.unwrap_or_else(Utc::now),
                &quakes,
                self.seismic_enabled,
            );

            match serde_json::to_value(&breakdown) {
                Ok(value) => updates.push(ScoreUpdate {
                    sighting_id: report.id,
                    anomaly,
                    score: breakdown.total,
                    breakdown: value,
                }),
                Err(err) => {
                    tracing::warn!(sighting_id = report.id, %err, "breakdown serialization failed, report skipped");
                }
            }
        }

        let scored = updates.len();
        self.store.apply_scores(&updates).await?;
        tracing::info!(scored, "scoring run complete");
        Ok(scored)
    }
}
