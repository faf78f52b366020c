//! Earthquake catalog client.
//!
//! Queries an fdsnws-style event endpoint (GeoJSON format) and parses the
//! feature collection into [`RawSeismicRecord`]s. The parsing step is pure
//! so it can be tested without a network.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::RawSeismicRecord;
use crate::error::TrackerError;

/// Default fdsnws event query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// HTTP client for the earthquake catalog.
#[derive(Debug, Clone)]
pub struct QuakeCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl QuakeCatalog {
    /// Creates a catalog client against the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Catalog`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TrackerError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("piezo-watch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| TrackerError::Catalog(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetches recent events worldwide.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Catalog`] on request or decode failure. The
    /// caller (a periodic job) logs and retries on its next invocation.
    pub async fn recent(
        &self,
        days: i64,
        min_magnitude: f64,
        limit: u32,
    ) -> Result<Vec<RawSeismicRecord>, TrackerError> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(days);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "geojson".to_string()),
                ("starttime", start.format("%Y-%m-%d").to_string()),
                ("endtime", end.format("%Y-%m-%d").to_string()),
                ("minmagnitude", min_magnitude.to_string()),
                ("limit", limit.to_string()),
                ("orderby", "time".to_string()),
            ])
            .send()
            .await
            .map_err(|err| TrackerError::Catalog(err.to_string()))?
            .error_for_status()
            .map_err(|err| TrackerError::Catalog(err.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| TrackerError::Catalog(err.to_string()))?;

        Ok(parse_geojson(&body))
    }

    /// Fetches recent events within `radius_km` of a point.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Catalog`] on request or decode failure.
    pub async fn near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        days: i64,
        min_magnitude: f64,
    ) -> Result<Vec<RawSeismicRecord>, TrackerError> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(days);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "geojson".to_string()),
                ("starttime", start.format("%Y-%m-%d").to_string()),
                ("endtime", end.format("%Y-%m-%d").to_string()),
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("maxradiuskm", radius_km.to_string()),
                ("minmagnitude", min_magnitude.to_string()),
                ("orderby", "time".to_string()),
            ])
            .send()
            .await
            .map_err(|err| TrackerError::Catalog(err.to_string()))?
            .error_for_status()
            .map_err(|err| TrackerError::Catalog(err.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| TrackerError::Catalog(err.to_string()))?;

        Ok(parse_geojson(&body))
    }
}

/// Parses an fdsnws GeoJSON feature collection.
///
/// Features missing an id, origin time, or coordinates are dropped (the
/// malformed-record boundary: skip, never abort the batch). Coordinates
/// arrive as `[longitude, latitude, depth_km]`.
#[must_use]
pub fn parse_geojson(body: &serde_json::Value) -> Vec<RawSeismicRecord> {
    let Some(features) = body.get("features").and_then(|f| f.as_array()) else {
        return Vec::new();
    };

    features
        .iter()
        .filter_map(|feature| {
            let external_id = feature.get("id").and_then(|v| v.as_str())?;
            let props = feature.get("properties")?;
            let occurred_at = epoch_millis(props.get("time").and_then(|v| v.as_i64())?)?;

            let coords = feature
                .get("geometry")
                .and_then(|g| g.get("coordinates"))
                .and_then(|c| c.as_array())?;
            let longitude = coords.first().and_then(|v| v.as_f64())?;
            let latitude = coords.get(1).and_then(|v| v.as_f64())?;
            let depth_km = coords.get(2).and_then(|v| v.as_f64());

            Some(RawSeismicRecord {
                external_id: external_id.to_string(),
                occurred_at,
                latitude,
                longitude,
                depth_km,
                magnitude: props.get("mag").and_then(|v| v.as_f64()),
                magnitude_type: props
                    .get("magType")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                place: props
                    .get("place")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            })
        })
        .collect()
}

fn epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_full_feature() {
        let body = json!({
            "features": [{
                "id": "us7000abcd",
                "properties": {
                    "time": 1_710_072_000_000_i64,
                    "mag": 5.1,
                    "magType": "mw",
                    "place": "10 km NE of San Jose, CA"
                },
                "geometry": { "coordinates": [-122.4, 37.7, 8.2] }
            }]
        });

        let records = parse_geojson(&body);
        assert_eq!(records.len(), 1);
        let Some(record) = records.first() else {
            panic!("one record expected");
        };
        assert_eq!(record.external_id, "us7000abcd");
        assert_eq!(record.longitude, -122.4);
        assert_eq!(record.latitude, 37.7);
        assert_eq!(record.depth_km, Some(8.2));
        assert_eq!(record.magnitude, Some(5.1));
        assert_eq!(record.magnitude_type.as_deref(), Some("mw"));
        assert_eq!(record.occurred_at.timestamp_millis(), 1_710_072_000_000);
    }

    #[test]
    fn skips_features_missing_essentials() {
        let body = json!({
            "features": [
                { "properties": { "time": 1000 }, "geometry": { "coordinates": [-122.0, 37.0] } },
                { "id": "no-time", "properties": {}, "geometry": { "coordinates": [-122.0, 37.0] } },
                { "id": "no-coords", "properties": { "time": 1000 }, "geometry": {} },
                {
                    "id": "ok",
                    "properties": { "time": 1000 },
                    "geometry": { "coordinates": [-122.0, 37.0] }
                }
            ]
        });

        let records = parse_geojson(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records.first().map(|r| r.external_id.as_str()), Some("ok"));
    }

    #[test]
    fn missing_magnitude_stays_none() {
        let body = json!({
            "features": [{
                "id": "x",
                "properties": { "time": 1000 },
                "geometry": { "coordinates": [-122.0, 37.0, 5.0] }
            }]
        });
        let records = parse_geojson(&body);
        assert_eq!(records.first().and_then(|r| r.magnitude), None);
    }

    #[test]
    fn empty_or_malformed_body_yields_no_records() {
        assert!(parse_geojson(&json!({})).is_empty());
        assert!(parse_geojson(&json!({ "features": "nope" })).is_empty());
    }
}
