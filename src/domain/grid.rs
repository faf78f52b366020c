//! Geomagnetic anomaly grid: file loading and bilinear point queries.
//!
//! [`MagneticGrid`] reads a whitespace-delimited table of
//! `longitude latitude anomaly_nT` rows into a regular 2-D grid and answers
//! point queries by bilinear interpolation. Loading is lazy and single-flight:
//! the first query triggers the load, concurrent queries await the same
//! in-flight load, and the outcome (including a failed load) is cached for
//! the process lifetime.

use std::cmp::Ordering;
use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::error::TrackerError;

/// Lazily loaded anomaly grid with bilinear interpolation.
///
/// A missing grid file is not fatal: the lookup stays disabled and every
/// query returns `None`. A present but malformed file fails the whole load
/// (integrity error) with the same disabled outcome.
#[derive(Debug)]
pub struct MagneticGrid {
    path: PathBuf,
    data: OnceCell<Option<GridData>>,
}

#[derive(Debug)]
struct GridData {
    /// Sorted unique latitudes (row axis).
    lats: Vec<f64>,
    /// Sorted unique longitudes (column axis).
    lons: Vec<f64>,
    /// Row-major values: index `lat_idx * lons.len() + lon_idx`.
    values: Vec<f64>,
}

impl MagneticGrid {
    /// Creates a lazy handle for the grid file at `path`. Nothing is read
    /// until the first query.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: OnceCell::new(),
        }
    }

    /// Builds a grid directly from an in-memory table (the same format as
    /// the grid file). Used by tests and by the file loader.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::GridFormat`] when a row does not have exactly
    /// three numeric columns or the rows do not cover a full regular grid.
    pub fn from_table(table: &str) -> Result<Self, TrackerError> {
        let data = GridData::parse(table)?;
        Ok(Self {
            path: PathBuf::new(),
            data: OnceCell::new_with(Some(Some(data))),
        })
    }

    /// Returns the interpolated anomaly in nT at `(lat, lon)`, or `None`
    /// when the point falls outside the grid's bounding box or no grid is
    /// available. Triggers the lazy load on first use.
    pub async fn anomaly(&self, lat: f64, lon: f64) -> Option<f64> {
        let data = self.data.get_or_init(|| self.load()).await;
        data.as_ref().and_then(|grid| grid.query(lat, lon))
    }

    /// Reads and parses the grid file. Failures are logged and leave the
    /// lookup disabled; they are never raised to the caller.
    async fn load(&self) -> Option<GridData> {
        let table = match tokio::fs::read_to_string(&self.path).await {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "magnetic grid unavailable, lookup disabled");
                return None;
            }
        };

        match GridData::parse(&table) {
            Ok(grid) => {
                tracing::info!(
                    rows = grid.lats.len(),
                    cols = grid.lons.len(),
                    "magnetic grid loaded"
                );
                Some(grid)
            }
            Err(err) => {
                tracing::error!(path = %self.path.display(), %err, "magnetic grid malformed, lookup disabled");
                None
            }
        }
    }
}

impl GridData {
    /// Parses `longitude latitude anomaly` rows into a dense regular grid.
    fn parse(table: &str) -> Result<Self, TrackerError> {
        let mut rows: Vec<(f64, f64, f64)> = Vec::new();

        for (line_no, line) in table.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split_whitespace();
            let (Some(lon), Some(lat), Some(value), None) =
                (cols.next(), cols.next(), cols.next(), cols.next())
            else {
                return Err(TrackerError::GridFormat(format!(
                    "line {}: expected 3 columns",
                    line_no + 1
                )));
            };
            let parse = |s: &str| -> Result<f64, TrackerError> {
                s.parse().map_err(|_| {
                    TrackerError::GridFormat(format!("line {}: non-numeric value {s:?}", line_no + 1))
                })
            };
            rows.push((parse(lon)?, parse(lat)?, parse(value)?));
        }

        if rows.is_empty() {
            return Err(TrackerError::GridFormat("empty grid table".to_string()));
        }

        let mut lons: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let mut lats: Vec<f64> = rows.iter().map(|r| r.1).collect();
        sort_dedup(&mut lons);
        sort_dedup(&mut lats);

        if lats.len() * lons.len() != rows.len() {
            return Err(TrackerError::GridFormat(format!(
                "{} rows do not form a {} x {} grid",
                rows.len(),
                lats.len(),
                lons.len()
            )));
        }

        let mut values = vec![f64::NAN; rows.len()];
        for (lon, lat, value) in rows {
            let (Some(lat_idx), Some(lon_idx)) = (axis_index(&lats, lat), axis_index(&lons, lon))
            else {
                return Err(TrackerError::GridFormat(
                    "grid row outside its own axes".to_string(),
                ));
            };
            if let Some(slot) = values.get_mut(lat_idx * lons.len() + lon_idx) {
                *slot = value;
            }
        }

        if values.iter().any(|v| v.is_nan()) {
            return Err(TrackerError::GridFormat(
                "grid has duplicate or missing vertices".to_string(),
            ));
        }

        Ok(Self { lats, lons, values })
    }

    /// Bilinear interpolation at `(lat, lon)`; `None` outside the bounding box.
    fn query(&self, lat: f64, lon: f64) -> Option<f64> {
        let (lat_lo, lat_hi, t_lat) = bracket(&self.lats, lat)?;
        let (lon_lo, lon_hi, t_lon) = bracket(&self.lons, lon)?;

        let v00 = self.at(lat_lo, lon_lo)?;
        let v01 = self.at(lat_lo, lon_hi)?;
        let v10 = self.at(lat_hi, lon_lo)?;
        let v11 = self.at(lat_hi, lon_hi)?;

        Some(
            v00 * (1.0 - t_lat) * (1.0 - t_lon)
                + v01 * (1.0 - t_lat) * t_lon
                + v10 * t_lat * (1.0 - t_lon)
                + v11 * t_lat * t_lon,
        )
    }

    fn at(&self, lat_idx: usize, lon_idx: usize) -> Option<f64> {
        self.values.get(lat_idx * self.lons.len() + lon_idx).copied()
    }
}

fn sort_dedup(axis: &mut Vec<f64>) {
    axis.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    axis.dedup();
}

/// Exact index of `value` on a sorted axis (grid rows reuse axis values
/// bit-for-bit, so exact comparison is valid here).
fn axis_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.binary_search_by(|probe| probe.partial_cmp(&value).unwrap_or(Ordering::Equal))
        .ok()
}

/// Finds the bracketing indices `(lo, hi)` and interpolation weight `t` for
/// `value` on a sorted axis. Returns `None` outside the axis range.
fn bracket(axis: &[f64], value: f64) -> Option<(usize, usize, f64)> {
    let (&first, &last) = (axis.first()?, axis.last()?);
    if value < first || value > last {
        return None;
    }

    let upper = axis.partition_point(|&x| x <= value);
    // value >= first, so upper >= 1
    let lo = upper.saturating_sub(1);
    let hi = upper.min(axis.len().saturating_sub(1));

    let (&a, &b) = (axis.get(lo)?, axis.get(hi)?);
    let t = if hi == lo || (b - a).abs() < f64::EPSILON {
        0.0
    } else {
        (value - a) / (b - a)
    };
    Some((lo, hi, t))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // 3 x 3 grid over lon [-123, -121], lat [37, 39]
    const TABLE: &str = "\
-123.0 37.0 10.0
-122.0 37.0 20.0
-121.0 37.0 30.0
-123.0 38.0 40.0
-122.0 38.0 50.0
-121.0 38.0 60.0
-123.0 39.0 70.0
-122.0 39.0 80.0
-121.0 39.0 90.0
";

    fn grid() -> MagneticGrid {
        let Ok(grid) = MagneticGrid::from_table(TABLE) else {
            panic!("sample table should parse");
        };
        grid
    }

    #[tokio::test]
    async fn vertex_query_returns_exact_value() {
        let grid = grid();
        assert_eq!(grid.anomaly(38.0, -122.0).await, Some(50.0));
        assert_eq!(grid.anomaly(37.0, -123.0).await, Some(10.0));
        assert_eq!(grid.anomaly(39.0, -121.0).await, Some(90.0));
    }

    #[tokio::test]
    async fn midpoint_interpolates_linearly() {
        let grid = grid();
        let Some(v) = grid.anomaly(37.5, -122.5).await else {
            panic!("interior point should interpolate");
        };
        // Average of the four surrounding vertices 10, 20, 40, 50
        assert!((v - 30.0).abs() < 1e-9, "got {v}");
    }

    #[tokio::test]
    async fn edge_point_interpolates_along_edge() {
        let grid = grid();
        let Some(v) = grid.anomaly(37.0, -122.5).await else {
            panic!("edge point is inside the bounding box");
        };
        assert!((v - 15.0).abs() < 1e-9, "got {v}");
    }

    #[tokio::test]
    async fn outside_bounding_box_returns_none() {
        let grid = grid();
        assert_eq!(grid.anomaly(45.0, -100.0).await, None);
        assert_eq!(grid.anomaly(36.9, -122.0).await, None);
        assert_eq!(grid.anomaly(38.0, -120.9).await, None);
    }

    #[tokio::test]
    async fn missing_file_disables_lookup() {
        let grid = MagneticGrid::new("/nonexistent/anomalies.xyz");
        assert_eq!(grid.anomaly(38.0, -122.0).await, None);
        // Second query reuses the cached failed load
        assert_eq!(grid.anomaly(38.0, -122.0).await, None);
    }

    #[test]
    fn wrong_column_count_fails_load() {
        let result = MagneticGrid::from_table("-122.0 37.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_value_fails_load() {
        let result = MagneticGrid::from_table("-122.0 37.0 abc\n");
        assert!(result.is_err());
    }

    #[test]
    fn incomplete_grid_fails_load() {
        // 3 unique lons x 2 unique lats but only 5 rows
        let table = "\
-123.0 37.0 10.0
-122.0 37.0 20.0
-121.0 37.0 30.0
-123.0 38.0 40.0
-122.0 38.0 50.0
";
        assert!(MagneticGrid::from_table(table).is_err());
    }
}
