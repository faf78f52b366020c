//! Watch records and lifecycle policy.
//!
//! A watch is a time- and radius-bounded monitoring window opened in
//! response to a qualifying seismic event. The eligibility, probability,
//! and matching rules live here as pure functions so the lifecycle can be
//! tested without a database; [`crate::service::WatchManager`] applies them
//! against the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::geo::distance_km;
use super::seismic::RawSeismicRecord;
use super::sighting::SightingReport;
use crate::error::TrackerError;

/// Watch window length in hours. Also the staleness cutoff for opening.
pub const WATCH_DURATION_HOURS: i64 = 72;

/// Default watch radius in kilometres.
pub const WATCH_RADIUS_KM: f64 = 150.0;

/// Minimum event magnitude that opens a watch.
pub const MIN_MAGNITUDE: f64 = 3.0;

/// Unique identifier for a watch.
///
/// Wraps a UUID v4. Generated once when the watch is opened and immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct WatchId(uuid::Uuid);

impl WatchId {
    /// Creates a new random `WatchId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `WatchId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for WatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for WatchId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<WatchId> for uuid::Uuid {
    fn from(id: WatchId) -> Self {
        id.0
    }
}

/// Watch lifecycle state.
///
/// `Active → Triggered` on the first report match (later matches still
/// record but the status stays `Triggered`); `Active → Expired` when the
/// window closes without a match. Neither terminal state reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    /// Window open, accepting matches.
    Active,
    /// At least one report matched inside the window.
    Triggered,
    /// Window closed with no match.
    Expired,
}

impl WatchStatus {
    /// Lowercase string form, as stored and surfaced by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Triggered => "triggered",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for WatchStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "triggered" => Ok(Self::Triggered),
            "expired" => Ok(Self::Expired),
            other => Err(TrackerError::InvalidStatus(other.to_string())),
        }
    }
}

/// A persisted watch with the denormalized details of its source event.
#[derive(Debug, Clone, Serialize)]
pub struct Watch {
    /// Watch identifier.
    pub id: WatchId,
    /// External id of the seismic event this watch derives from. At most
    /// one watch exists per event id (storage-layer constraint).
    pub seismic_external_id: String,
    /// Event origin time (denormalized).
    pub event_at: DateTime<Utc>,
    /// Epicenter latitude (denormalized).
    pub latitude: f64,
    /// Epicenter longitude (denormalized).
    pub longitude: f64,
    /// Event magnitude (denormalized).
    pub magnitude: Option<f64>,
    /// Place description (denormalized).
    pub place: Option<String>,
    /// Match radius around the epicenter, in kilometres.
    pub radius_km: f64,
    /// Window start (the event origin time).
    pub watch_start: DateTime<Utc>,
    /// Window end, 72 hours after start.
    pub watch_end: Option<DateTime<Utc>>,
    /// Grid anomaly sampled at the epicenter, in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Coarse piezoelectric probability in `[0, 1]` derived from the
    /// epicenter anomaly.
    pub piezo_probability: f64,
    /// Lifecycle state.
    pub status: WatchStatus,
    /// When the watch was opened.
    pub created_at: DateTime<Utc>,
}

impl Watch {
    /// Builds a new active watch for a qualifying event. Callers gate on
    /// [`open_eligible`] first; this constructor only assembles the record.
    #[must_use]
    pub fn open(event: &RawSeismicRecord, anomaly: Option<f64>, radius_km: f64) -> Self {
        let now = Utc::now();
        Self {
            id: WatchId::new(),
            seismic_external_id: event.external_id.clone(),
            event_at: event.occurred_at,
            latitude: event.latitude,
            longitude: event.longitude,
            magnitude: event.magnitude,
            place: event.place.clone(),
            radius_km,
            watch_start: event.occurred_at,
            watch_end: Some(event.occurred_at + Duration::hours(WATCH_DURATION_HOURS)),
            magnetic_anomaly: anomaly,
            piezo_probability: piezo_probability(anomaly),
            status: WatchStatus::Active,
            created_at: now,
        }
    }

    /// Tests a report against this watch's radius and window, returning the
    /// distance and elapsed hours on a hit. Only meaningful for `Active`
    /// watches; the caller filters by status.
    #[must_use]
    pub fn match_report(&self, report: &SightingReport, now: DateTime<Utc>) -> Option<MatchHit> {
        let (lat, lon) = report.coordinates()?;
        let occurred_at = report.occurred_at?;

        let distance = distance_km(lat, lon, self.latitude, self.longitude);
        if distance > self.radius_km {
            return None;
        }
        if !in_match_window(occurred_at, self.watch_start, self.watch_end, now) {
            return None;
        }

        let time_delta_hours =
            (occurred_at - self.watch_start).num_seconds() as f64 / 3600.0;
        Some(MatchHit {
            distance_km: distance,
            time_delta_hours,
        })
    }
}

/// Distance and timing of a report that fell inside a watch window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchHit {
    /// Distance from the epicenter, in kilometres.
    pub distance_km: f64,
    /// Hours elapsed since the watch start.
    pub time_delta_hours: f64,
}

/// A persisted link between a watch and a sighting report that matched it.
///
/// Created at most once per `(watch, report)` pair; the storage layer
/// enforces the uniqueness.
#[derive(Debug, Clone, Serialize)]
pub struct WatchMatch {
    /// Database row id.
    pub id: i64,
    /// The matched watch.
    pub watch_id: WatchId,
    /// The matching report row.
    pub sighting_id: i64,
    /// Distance from the epicenter, in kilometres.
    pub distance_km: f64,
    /// Hours elapsed since the watch start.
    pub time_delta_hours: f64,
    /// When the match was recorded.
    pub created_at: DateTime<Utc>,
}

/// Whether an event qualifies to open a watch: magnitude at least 3.0 and
/// not older than the window length (a watch for a staler event would
/// already be over).
#[must_use]
pub fn open_eligible(
    magnitude: Option<f64>,
    occurred_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    if magnitude.unwrap_or(0.0) < MIN_MAGNITUDE {
        return false;
    }
    now - occurred_at <= Duration::hours(WATCH_DURATION_HOURS)
}

/// Maps the epicenter anomaly to a coarse piezoelectric probability:
/// `|a| < 50 → 0.9`, `< 100 → 0.7`, `< 200 → 0.4`, else `0.2`; unknown
/// anomaly (no grid data or no coordinates) → `0.5`.
#[must_use]
pub fn piezo_probability(anomaly: Option<f64>) -> f64 {
    let Some(anomaly) = anomaly else {
        return 0.5;
    };
    let abs = anomaly.abs();
    if abs < 50.0 {
        0.9
    } else if abs < 100.0 {
        0.7
    } else if abs < 200.0 {
        0.4
    } else {
        0.2
    }
}

/// Whether a report timestamp falls inside `[start, end]`, treating a
/// missing end as open-ended clamped to `now`.
#[must_use]
pub fn in_match_window(
    report_at: DateTime<Utc>,
    watch_start: DateTime<Utc>,
    watch_end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    let end = watch_end.unwrap_or(now);
    report_at >= watch_start && report_at <= end
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    fn event() -> RawSeismicRecord {
        RawSeismicRecord {
            external_id: "us7000test".to_string(),
            occurred_at: at(10, 0),
            latitude: 37.7,
            longitude: -122.4,
            depth_km: Some(8.2),
            magnitude: Some(5.1),
            magnitude_type: Some("mw".to_string()),
            place: Some("near San Francisco, CA".to_string()),
        }
    }

    fn report_at(lat: f64, lon: f64, when: DateTime<Utc>) -> SightingReport {
        SightingReport {
            id: 7,
            external_id: "r-7".to_string(),
            occurred_at: Some(when),
            city: None,
            state: None,
            country: None,
            shape: None,
            duration_seconds: None,
            duration_text: None,
            description: None,
            latitude: Some(lat),
            longitude: Some(lon),
            magnetic_anomaly: None,
            score: None,
            score_breakdown: None,
            geocoded: true,
            scored: false,
            ingested_at: Utc::now(),
        }
    }

    #[test]
    fn watch_ids_are_unique_and_round_trip() {
        let a = WatchId::new();
        let b = WatchId::new();
        assert_ne!(a, b);

        let uuid = uuid::Uuid::new_v4();
        assert_eq!(*WatchId::from_uuid(uuid).as_uuid(), uuid);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [WatchStatus::Active, WatchStatus::Triggered, WatchStatus::Expired] {
            assert_eq!(status.as_str().parse::<WatchStatus>().ok(), Some(status));
        }
        assert!("open".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn eligibility_rejects_low_magnitude() {
        assert!(!open_eligible(Some(2.9), at(10, 0), at(10, 1)));
        assert!(!open_eligible(None, at(10, 0), at(10, 1)));
        assert!(open_eligible(Some(3.0), at(10, 0), at(10, 1)));
    }

    #[test]
    fn eligibility_rejects_stale_events() {
        let event_time = at(10, 0);
        // 72 hours later, still eligible
        assert!(open_eligible(Some(4.0), event_time, at(13, 0)));
        // 73 hours later, stale
        assert!(!open_eligible(Some(4.0), event_time, at(13, 1)));
    }

    #[test]
    fn piezo_probability_buckets() {
        assert_eq!(piezo_probability(Some(10.0)), 0.9);
        assert_eq!(piezo_probability(Some(-75.0)), 0.7);
        assert_eq!(piezo_probability(Some(150.0)), 0.4);
        assert_eq!(piezo_probability(Some(500.0)), 0.2);
        assert_eq!(piezo_probability(None), 0.5);
    }

    #[test]
    fn open_builds_72_hour_window() {
        let watch = Watch::open(&event(), Some(42.0), WATCH_RADIUS_KM);
        assert_eq!(watch.status, WatchStatus::Active);
        assert_eq!(watch.watch_start, at(10, 0));
        assert_eq!(watch.watch_end, Some(at(13, 0)));
        assert_eq!(watch.radius_km, 150.0);
        assert_eq!(watch.piezo_probability, 0.9);
        assert_eq!(watch.seismic_external_id, "us7000test");
    }

    #[test]
    fn nearby_report_inside_window_matches() {
        let watch = Watch::open(&event(), None, WATCH_RADIUS_KM);
        let report = report_at(37.75, -122.45, at(10, 2));

        let Some(hit) = watch.match_report(&report, at(10, 3)) else {
            panic!("report ~6 km away at +2h should match");
        };
        assert!(hit.distance_km > 5.0 && hit.distance_km < 8.0, "got {}", hit.distance_km);
        assert!((hit.time_delta_hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn report_beyond_radius_never_matches() {
        let watch = Watch::open(&event(), None, WATCH_RADIUS_KM);
        // ~1.5 degrees of latitude north: ~167 km
        let report = report_at(39.2, -122.4, at(10, 2));
        assert!(watch.match_report(&report, at(10, 3)).is_none());
    }

    #[test]
    fn report_outside_window_never_matches() {
        let watch = Watch::open(&event(), None, WATCH_RADIUS_KM);
        let before = report_at(37.7, -122.4, at(9, 23));
        let after = report_at(37.7, -122.4, at(13, 1));
        assert!(watch.match_report(&before, at(13, 2)).is_none());
        assert!(watch.match_report(&after, at(13, 2)).is_none());
    }

    #[test]
    fn missing_window_end_clamps_to_now() {
        let mut watch = Watch::open(&event(), None, WATCH_RADIUS_KM);
        watch.watch_end = None;

        let now = at(11, 0);
        let inside = report_at(37.7, -122.4, at(10, 12));
        let future = report_at(37.7, -122.4, at(11, 1));
        assert!(watch.match_report(&inside, now).is_some());
        assert!(watch.match_report(&future, now).is_none());
    }

    #[test]
    fn report_without_coordinates_or_time_is_skipped() {
        let watch = Watch::open(&event(), None, WATCH_RADIUS_KM);

        let mut no_coords = report_at(37.7, -122.4, at(10, 2));
        no_coords.latitude = None;
        assert!(watch.match_report(&no_coords, at(10, 3)).is_none());

        let mut no_time = report_at(37.7, -122.4, at(10, 2));
        no_time.occurred_at = None;
        assert!(watch.match_report(&no_time, at(10, 3)).is_none());
    }
}
