//! Aggregate row shapes returned by the statistics queries.

use serde::Serialize;

/// System-wide counters for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StoreTotals {
    /// Total sighting reports ingested.
    pub sightings: i64,
    /// Total seismic events ingested.
    pub seismic_events: i64,
    /// Reports with a sampled grid anomaly.
    pub with_anomaly: i64,
    /// Reports scoring at or above the high-score cutoff (60).
    pub high_score: i64,
    /// Reports in the low-magnetic zone (`|anomaly| < 100 nT`).
    pub low_magnetic: i64,
    /// Average composite score across scored reports.
    pub avg_score: Option<f64>,
}

/// One bar of the score histogram: `bucket` is `floor(score / 10)`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ScoreBucket {
    /// Bucket index (0 ⇒ scores 0–9.99, 1 ⇒ 10–19.99, ...).
    pub bucket: i64,
    /// Number of reports in the bucket.
    pub count: i64,
}

/// One scoring result to write back, batched per job run.
#[derive(Debug, Clone)]
pub struct ScoreUpdate {
    /// Target sighting row.
    pub sighting_id: i64,
    /// Grid anomaly sampled at the report coordinates.
    pub anomaly: Option<f64>,
    /// Composite score.
    pub score: f64,
    /// Structured breakdown as stored JSON.
    pub breakdown: serde_json::Value,
}

/// Per-report fields consumed by the zone correlation breakdown.
#[derive(Debug, Clone)]
pub struct CorrelationRow {
    /// Sampled grid anomaly, in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Composite score, when scored.
    pub score: Option<f64>,
    /// Reported shape label.
    pub shape: Option<String>,
}
