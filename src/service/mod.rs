//! Service layer: batch jobs and orchestration over the store.

pub mod hotspots;
pub mod ingest;
pub mod scoring;
pub mod watches;

pub use hotspots::HotspotService;
pub use ingest::{IngestService, IngestSummary};
pub use scoring::ScoringEngine;
pub use watches::WatchManager;
