//! Precomputed per-location aggregates for the dashboard surface.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate of reports sharing a city/state, rebuilt by a periodic job.
/// Purely derived and disposable.
#[derive(Debug, Clone, Serialize)]
pub struct HotspotSummary {
    /// City label.
    pub city: Option<String>,
    /// State or region label.
    pub state: Option<String>,
    /// Representative latitude (average of member reports).
    pub latitude: Option<f64>,
    /// Representative longitude (average of member reports).
    pub longitude: Option<f64>,
    /// Number of reports at this location.
    pub report_count: i64,
    /// Average composite score of scored reports.
    pub avg_score: Option<f64>,
    /// Average grid anomaly of member reports, in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Fraction of member reports that matched a watch window.
    pub seismic_ratio: Option<f64>,
    /// When this aggregate was last rebuilt.
    pub refreshed_at: DateTime<Utc>,
}
