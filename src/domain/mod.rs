//! Domain layer: geospatial arithmetic, the anomaly grid, score components,
//! and the record types shared by services, persistence, and the API.

pub mod geo;
pub mod grid;
pub mod hotspot;
pub mod installation;
pub mod score;
pub mod seismic;
pub mod sighting;
pub mod watch;

pub use grid::MagneticGrid;
pub use hotspot::HotspotSummary;
pub use score::{GeologyZone, NearbyQuake, ScoreBreakdown, ScoreLabel};
pub use seismic::{RawSeismicRecord, SeismicEvent};
pub use sighting::{RawSightingRecord, SightingReport};
pub use watch::{Watch, WatchId, WatchMatch, WatchStatus};
