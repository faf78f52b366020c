//! Ingestion service: idempotent upserts of raw records.
//!
//! Both ingestion paths are batch loops with per-record error containment:
//! a malformed or failing record is logged and skipped, and the batch
//! continues. Duplicates (by external id) are silently skipped by the
//! storage constraints, so re-running an overlapping batch is a no-op.

use serde::Serialize;

use crate::domain::{RawSeismicRecord, RawSightingRecord};
use crate::persistence::PostgresStore;

/// Outcome counters for one ingestion batch.
#[derive(Debug, Clone, Copy, Default, Serialize, utoipa::ToSchema)]
pub struct IngestSummary {
    /// Records handed to the batch.
    pub received: usize,
    /// New rows created.
    pub inserted: usize,
    /// Records already present (external id collision).
    pub duplicates: usize,
    /// Records dropped as malformed or failing.
    pub skipped: usize,
}

/// Batch ingestion of raw sighting and seismic records.
#[derive(Debug, Clone)]
pub struct IngestService {
    store: PostgresStore,
}

impl IngestService {
    /// Creates a new `IngestService`.
    #[must_use]
    pub fn new(store: PostgresStore) -> Self {
        Self { store }
    }

    /// Ingests a batch of raw sighting records.
    pub async fn ingest_sightings(&self, records: &[RawSightingRecord]) -> IngestSummary {
        let mut summary = IngestSummary {
            received: records.len(),
            ..IngestSummary::default()
        };

        for record in records {
            if record.external_id.trim().is_empty() {
                tracing::warn!("sighting record without external id skipped");
                summary.skipped += 1;
                continue;
            }
            match self.store.insert_sighting(record).await {
                Ok(true) => summary.inserted += 1,
                Ok(false) => summary.duplicates += 1,
                Err(err) => {
                    tracing::warn!(external_id = %record.external_id, %err, "sighting insert failed, record skipped");
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            received = summary.received,
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "sighting ingestion complete"
        );
        summary
    }

    /// Ingests a batch of raw seismic records.
    pub async fn ingest_seismic(&self, records: &[RawSeismicRecord]) -> IngestSummary {
        let mut summary = IngestSummary {
            received: records.len(),
            ..IngestSummary::default()
        };

        for record in records {
            if record.external_id.trim().is_empty() {
                tracing::warn!("seismic record without external id skipped");
                summary.skipped += 1;
                continue;
            }
            match self.store.insert_seismic(record).await {
                Ok(true) => summary.inserted += 1,
                Ok(false) => summary.duplicates += 1,
                Err(err) => {
                    tracing::warn!(external_id = %record.external_id, %err, "seismic insert failed, record skipped");
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            received = summary.received,
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "seismic ingestion complete"
        );
        summary
    }
}
