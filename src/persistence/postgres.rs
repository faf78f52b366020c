//! PostgreSQL implementation of the persistence layer.
//!
//! All inserts of externally identified records use `ON CONFLICT DO
//! NOTHING`, so duplicate ingestion is silently skipped and the
//! check-then-create races around watches and matches collapse into
//! constraint conflicts handled here.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::models::{CorrelationRow, ScoreBucket, ScoreUpdate, StoreTotals};
use crate::domain::score::{GeologyZone, ZONE_BOUNDARY_NT};
use crate::domain::{
    HotspotSummary, RawSeismicRecord, RawSightingRecord, SeismicEvent, SightingReport, Watch,
    WatchId, WatchMatch, WatchStatus,
};
use crate::error::TrackerError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on migration failure.
    pub async fn migrate(&self) -> Result<(), TrackerError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TrackerError::Persistence(e.to_string()))
    }

    // ── Sightings ───────────────────────────────────────────────────────

    /// Inserts a raw sighting record, skipping duplicates by external id.
    /// Returns `true` when a new row was created.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn insert_sighting(&self, raw: &RawSightingRecord) -> Result<bool, TrackerError> {
        let geocoded = raw.latitude.is_some() && raw.longitude.is_some();
        let result = sqlx::query(
            "INSERT INTO sightings \
             (external_id, occurred_at, city, state, country, shape, duration_seconds, \
              duration_text, description, latitude, longitude, geocoded) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (external_id) DO NOTHING",
        )
        .bind(&raw.external_id)
        .bind(raw.occurred_at)
        .bind(&raw.city)
        .bind(&raw.state)
        .bind(&raw.country)
        .bind(&raw.shape)
        .bind(raw.duration_seconds)
        .bind(&raw.duration_text)
        .bind(&raw.description)
        .bind(raw.latitude)
        .bind(raw.longitude)
        .bind(geocoded)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Returns geocoded reports that the scoring job has not yet processed.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn unscored_sightings(&self, limit: i64) -> Result<Vec<SightingReport>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM sightings \
             WHERE scored = FALSE AND latitude IS NOT NULL AND longitude IS NOT NULL \
             ORDER BY id ASC LIMIT $1",
        )
        .bind(limit)
        .try_map(|row: PgRow| sighting_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Writes back a batch of scoring results in one transaction and flips
    /// the `scored` flags. Committing once per run keeps the
    /// partial-failure window small.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure; the
    /// whole batch rolls back.
    pub async fn apply_scores(&self, updates: &[ScoreUpdate]) -> Result<(), TrackerError> {
        let mut tx = self.pool.begin().await?;
        for update in updates {
            sqlx::query(
                "UPDATE sightings \
                 SET magnetic_anomaly = $2, score = $3, score_breakdown = $4, scored = TRUE \
                 WHERE id = $1",
            )
            .bind(update.sighting_id)
            .bind(update.anomaly)
            .bind(update.score)
            .bind(&update.breakdown)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Returns reports at or after `cutoff`, optionally score-filtered,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn recent_sightings(
        &self,
        cutoff: DateTime<Utc>,
        min_score: f64,
        limit: i64,
    ) -> Result<Vec<SightingReport>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM sightings \
             WHERE occurred_at >= $1 AND ($2 <= 0 OR score >= $2) \
             ORDER BY occurred_at DESC LIMIT $3",
        )
        .bind(cutoff)
        .bind(min_score)
        .bind(limit)
        .try_map(|row: PgRow| sighting_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns reports filtered by magnetic zone, best scores first. Only
    /// reports with coordinates and a sampled anomaly participate.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn sightings_by_zone(
        &self,
        zone: GeologyZone,
        limit: i64,
    ) -> Result<Vec<SightingReport>, TrackerError> {
        let zone_clause = match zone {
            GeologyZone::LowMagnetic => "AND abs(magnetic_anomaly) < $2",
            GeologyZone::HighMagnetic => "AND abs(magnetic_anomaly) >= $2",
            GeologyZone::All => "AND $2 >= 0",
        };
        let sql = format!(
            "SELECT * FROM sightings \
             WHERE latitude IS NOT NULL AND magnetic_anomaly IS NOT NULL {zone_clause} \
             ORDER BY score DESC NULLS LAST LIMIT $1",
        );
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(ZONE_BOUNDARY_NT)
            .try_map(|row: PgRow| sighting_from_row(&row))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Returns the highest-scoring reports at or above `min_score`.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn top_sightings(
        &self,
        min_score: f64,
        limit: i64,
    ) -> Result<Vec<SightingReport>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM sightings \
             WHERE scored = TRUE AND score >= $1 \
             ORDER BY score DESC LIMIT $2",
        )
        .bind(min_score)
        .bind(limit)
        .try_map(|row: PgRow| sighting_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns reports usable as watch-match candidates: coordinates and a
    /// timestamp at or after `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn match_candidates(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SightingReport>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM sightings \
             WHERE occurred_at >= $1 AND latitude IS NOT NULL AND longitude IS NOT NULL \
             ORDER BY occurred_at ASC",
        )
        .bind(cutoff)
        .try_map(|row: PgRow| sighting_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ── Seismic events ──────────────────────────────────────────────────

    /// Inserts a raw seismic event, skipping duplicates by external id.
    /// Returns `true` when a new row was created.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn insert_seismic(&self, raw: &RawSeismicRecord) -> Result<bool, TrackerError> {
        let result = sqlx::query(
            "INSERT INTO seismic_events \
             (external_id, occurred_at, latitude, longitude, depth_km, magnitude, \
              magnitude_type, place) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (external_id) DO NOTHING",
        )
        .bind(&raw.external_id)
        .bind(raw.occurred_at)
        .bind(raw.latitude)
        .bind(raw.longitude)
        .bind(raw.depth_km)
        .bind(raw.magnitude)
        .bind(&raw.magnitude_type)
        .bind(&raw.place)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Returns stored events at or after `cutoff` with at least the given
    /// magnitude, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn recent_seismic(
        &self,
        cutoff: DateTime<Utc>,
        min_magnitude: f64,
        limit: i64,
    ) -> Result<Vec<SeismicEvent>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM seismic_events \
             WHERE occurred_at >= $1 AND magnitude >= $2 \
             ORDER BY occurred_at DESC LIMIT $3",
        )
        .bind(cutoff)
        .bind(min_magnitude)
        .bind(limit)
        .try_map(|row: PgRow| seismic_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns stored events inside `[start, end]`, used as scoring
    /// candidates when the seismic component is enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn seismic_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SeismicEvent>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM seismic_events \
             WHERE occurred_at >= $1 AND occurred_at <= $2 \
             ORDER BY occurred_at ASC",
        )
        .bind(start)
        .bind(end)
        .try_map(|row: PgRow| seismic_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ── Watches ─────────────────────────────────────────────────────────

    /// Whether a watch already exists for the given seismic external id.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn watch_exists(&self, seismic_external_id: &str) -> Result<bool, TrackerError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM watches WHERE seismic_external_id = $1",
        )
        .bind(seismic_external_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Inserts a watch. The unique constraint on `seismic_external_id`
    /// makes concurrent opens for the same event collapse into a no-op;
    /// returns `true` only when this call created the row.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn insert_watch(&self, watch: &Watch) -> Result<bool, TrackerError> {
        let result = sqlx::query(
            "INSERT INTO watches \
             (id, seismic_external_id, event_at, latitude, longitude, magnitude, place, \
              radius_km, watch_start, watch_end, magnetic_anomaly, piezo_probability, \
              status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (seismic_external_id) DO NOTHING",
        )
        .bind(watch.id.as_uuid())
        .bind(&watch.seismic_external_id)
        .bind(watch.event_at)
        .bind(watch.latitude)
        .bind(watch.longitude)
        .bind(watch.magnitude)
        .bind(&watch.place)
        .bind(watch.radius_km)
        .bind(watch.watch_start)
        .bind(watch.watch_end)
        .bind(watch.magnetic_anomaly)
        .bind(watch.piezo_probability)
        .bind(watch.status.as_str())
        .bind(watch.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Returns all watches with status `active`, newest event first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn active_watches(&self) -> Result<Vec<Watch>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM watches WHERE status = 'active' ORDER BY event_at DESC",
        )
        .try_map(|row: PgRow| watch_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns watches, optionally filtered by status, newest event first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn watches_by_status(
        &self,
        status: Option<WatchStatus>,
        limit: i64,
    ) -> Result<Vec<Watch>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM watches \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY event_at DESC LIMIT $2",
        )
        .bind(status.map(WatchStatus::as_str))
        .bind(limit)
        .try_map(|row: PgRow| watch_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns one watch by id.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn watch_by_id(&self, id: WatchId) -> Result<Option<Watch>, TrackerError> {
        let row = sqlx::query("SELECT * FROM watches WHERE id = $1")
            .bind(id.as_uuid())
            .try_map(|row: PgRow| watch_from_row(&row))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Returns the recorded matches for a watch, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn matches_for_watch(&self, id: WatchId) -> Result<Vec<WatchMatch>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM watch_matches WHERE watch_id = $1 ORDER BY created_at ASC",
        )
        .bind(id.as_uuid())
        .try_map(|row: PgRow| match_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Records a watch/report match. The `(watch_id, sighting_id)` unique
    /// constraint swallows re-matches on overlapping runs; returns `true`
    /// only when a new match row was created.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn insert_match(
        &self,
        watch_id: WatchId,
        sighting_id: i64,
        distance_km: f64,
        time_delta_hours: f64,
    ) -> Result<bool, TrackerError> {
        let result = sqlx::query(
            "INSERT INTO watch_matches (watch_id, sighting_id, distance_km, time_delta_hours) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (watch_id, sighting_id) DO NOTHING",
        )
        .bind(watch_id.as_uuid())
        .bind(sighting_id)
        .bind(distance_km)
        .bind(time_delta_hours)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Flips an active watch to `triggered`. A no-op for watches already
    /// triggered or expired, so the first match wins and nothing reverts.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn trigger_watch(&self, id: WatchId) -> Result<(), TrackerError> {
        sqlx::query("UPDATE watches SET status = 'triggered' WHERE id = $1 AND status = 'active'")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Expires every active watch whose window ended before `now`. Returns
    /// the number of watches transitioned.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn expire_due_watches(&self, now: DateTime<Utc>) -> Result<u64, TrackerError> {
        let result = sqlx::query(
            "UPDATE watches SET status = 'expired' \
             WHERE status = 'active' AND watch_end IS NOT NULL AND watch_end < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    // ── Aggregates ──────────────────────────────────────────────────────

    /// Returns the system-wide counters for the stats endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn totals(&self) -> Result<StoreTotals, TrackerError> {
        let sightings =
            sqlx::query_scalar::<_, i64>("SELECT count(*) FROM sightings")
                .fetch_one(&self.pool)
                .await?;
        let seismic_events =
            sqlx::query_scalar::<_, i64>("SELECT count(*) FROM seismic_events")
                .fetch_one(&self.pool)
                .await?;
        let with_anomaly = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM sightings WHERE magnetic_anomaly IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        let high_score = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM sightings WHERE score >= 60",
        )
        .fetch_one(&self.pool)
        .await?;
        let low_magnetic = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM sightings \
             WHERE magnetic_anomaly IS NOT NULL AND abs(magnetic_anomaly) < $1",
        )
        .bind(ZONE_BOUNDARY_NT)
        .fetch_one(&self.pool)
        .await?;
        let avg_score = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT avg(score) FROM sightings WHERE scored = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StoreTotals {
            sightings,
            seismic_events,
            with_anomaly,
            high_score,
            low_magnetic,
            avg_score,
        })
    }

    /// Returns the score histogram in 10-point buckets.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn score_histogram(&self) -> Result<Vec<ScoreBucket>, TrackerError> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            "SELECT floor(score / 10)::bigint AS bucket, count(*) \
             FROM sightings WHERE scored = TRUE AND score IS NOT NULL \
             GROUP BY bucket ORDER BY bucket",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(bucket, count)| ScoreBucket { bucket, count })
            .collect())
    }

    /// Returns the per-report fields needed by the zone correlation
    /// breakdown (reports with both coordinates and a sampled anomaly).
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn correlation_rows(&self) -> Result<Vec<CorrelationRow>, TrackerError> {
        let rows = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<String>)>(
            "SELECT magnetic_anomaly, score, shape FROM sightings \
             WHERE magnetic_anomaly IS NOT NULL AND latitude IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(magnetic_anomaly, score, shape)| CorrelationRow {
                magnetic_anomaly,
                score,
                shape,
            })
            .collect())
    }

    /// Rebuilds the hotspot table from scratch. Returns the number of
    /// aggregate rows written.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn refresh_hotspots(&self, min_reports: i64) -> Result<u64, TrackerError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM hotspots").execute(&mut *tx).await?;

        let result = sqlx::query(
            "INSERT INTO hotspots \
             (city, state, latitude, longitude, report_count, avg_score, \
              magnetic_anomaly, seismic_ratio) \
             SELECT s.city, s.state, avg(s.latitude), avg(s.longitude), count(*), \
                    avg(s.score) FILTER (WHERE s.scored), \
                    avg(s.magnetic_anomaly), \
                    avg(CASE WHEN EXISTS \
                        (SELECT 1 FROM watch_matches m WHERE m.sighting_id = s.id) \
                        THEN 1.0 ELSE 0.0 END) \
             FROM sightings s \
             WHERE s.city IS NOT NULL \
             GROUP BY s.city, s.state \
             HAVING count(*) >= $1",
        )
        .bind(min_reports)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Returns the cached hotspots, best average score first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::Persistence`] on database failure.
    pub async fn hotspots(&self, limit: i64) -> Result<Vec<HotspotSummary>, TrackerError> {
        let rows = sqlx::query(
            "SELECT * FROM hotspots ORDER BY avg_score DESC NULLS LAST LIMIT $1",
        )
        .bind(limit)
        .try_map(|row: PgRow| hotspot_from_row(&row))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

// ── Row mappers ─────────────────────────────────────────────────────────

fn sighting_from_row(row: &PgRow) -> Result<SightingReport, sqlx::Error> {
    Ok(SightingReport {
        id: row.try_get("id")?,
        external_id: row.try_get("external_id")?,
        occurred_at: row.try_get("occurred_at")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        country: row.try_get("country")?,
        shape: row.try_get("shape")?,
        duration_seconds: row.try_get("duration_seconds")?,
        duration_text: row.try_get("duration_text")?,
        description: row.try_get("description")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        magnetic_anomaly: row.try_get("magnetic_anomaly")?,
        score: row.try_get("score")?,
        score_breakdown: row.try_get("score_breakdown")?,
        geocoded: row.try_get("geocoded")?,
        scored: row.try_get("scored")?,
        ingested_at: row.try_get("ingested_at")?,
    })
}

fn seismic_from_row(row: &PgRow) -> Result<SeismicEvent, sqlx::Error> {
    Ok(SeismicEvent {
        id: row.try_get("id")?,
        external_id: row.try_get("external_id")?,
        occurred_at: row.try_get("occurred_at")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        depth_km: row.try_get("depth_km")?,
        magnitude: row.try_get("magnitude")?,
        magnitude_type: row.try_get("magnitude_type")?,
        place: row.try_get("place")?,
        fetched_at: row.try_get("fetched_at")?,
    })
}

fn watch_from_row(row: &PgRow) -> Result<Watch, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<WatchStatus>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Watch {
        id: WatchId::from_uuid(row.try_get("id")?),
        seismic_external_id: row.try_get("seismic_external_id")?,
        event_at: row.try_get("event_at")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        magnitude: row.try_get("magnitude")?,
        place: row.try_get("place")?,
        radius_km: row.try_get("radius_km")?,
        watch_start: row.try_get("watch_start")?,
        watch_end: row.try_get("watch_end")?,
        magnetic_anomaly: row.try_get("magnetic_anomaly")?,
        piezo_probability: row.try_get("piezo_probability")?,
        status,
        created_at: row.try_get("created_at")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<WatchMatch, sqlx::Error> {
    Ok(WatchMatch {
        id: row.try_get("id")?,
        watch_id: WatchId::from_uuid(row.try_get("watch_id")?),
        sighting_id: row.try_get("sighting_id")?,
        distance_km: row.try_get("distance_km")?,
        time_delta_hours: row.try_get("time_delta_hours")?,
        created_at: row.try_get("created_at")?,
    })
}

fn hotspot_from_row(row: &PgRow) -> Result<HotspotSummary, sqlx::Error> {
    Ok(HotspotSummary {
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        report_count: row.try_get("report_count")?,
        avg_score: row.try_get("avg_score")?,
        magnetic_anomaly: row.try_get("magnetic_anomaly")?,
        seismic_ratio: row.try_get("seismic_ratio")?,
        refreshed_at: row.try_get("refreshed_at")?,
    })
}
