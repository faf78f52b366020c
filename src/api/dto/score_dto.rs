//! DTOs for the stateless scoring, anomaly, and proximity endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::installation::Installation;
use crate::domain::ScoreBreakdown;

/// Query parameters for `GET /score`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ScoreQuery {
    /// Latitude in degrees (−90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (−180 to 180).
    pub longitude: f64,
    /// Reported shape label.
    #[serde(default)]
    pub shape: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response for `GET /score`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScoreResponse {
    /// Echoed latitude.
    pub latitude: f64,
    /// Echoed longitude.
    pub longitude: f64,
    /// Echoed shape.
    pub shape: Option<String>,
    /// Component breakdown and total.
    pub score: ScoreBreakdown,
    /// Raw grid anomaly at the point, in nT.
    pub magnetic_anomaly: Option<f64>,
    /// Whether the point sits in the low-magnetic zone; `null` when the
    /// anomaly is unknown.
    pub piezoelectric_zone: Option<bool>,
}

/// Query parameters for `GET /magnetic` and `GET /installations/nearest`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct PointQuery {
    /// Latitude in degrees (−90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (−180 to 180).
    pub longitude: f64,
}

/// Response for `GET /magnetic`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MagneticResponse {
    /// Echoed latitude.
    pub latitude: f64,
    /// Echoed longitude.
    pub longitude: f64,
    /// Grid anomaly in nT; `null` outside the grid.
    pub magnetic_anomaly: Option<f64>,
    /// `"ok"` or `"out_of_grid_bounds"`.
    pub status: &'static str,
    /// Zone classification, when the anomaly is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geology_type: Option<&'static str>,
}

/// Response for `GET /installations/nearest`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NearestInstallationResponse {
    /// Echoed latitude.
    pub latitude: f64,
    /// Echoed longitude.
    pub longitude: f64,
    /// The nearest installation.
    pub installation: Installation,
    /// Distance to it in kilometres.
    pub distance_km: f64,
    /// Distance-bucketed proximity lens score.
    pub proximity_score: f64,
}
