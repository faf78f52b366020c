//! # piezo-watch
//!
//! Ingests sighting reports and earthquake data, computes a heuristic
//! piezoelectric probability score per report, opens time- and
//! radius-bounded watches around qualifying seismic events, and serves the
//! results through a JSON API.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── IngestService / ScoringEngine / WatchManager / HotspotService (service/)
//!     ├── Periodic jobs (jobs.rs)
//!     │
//!     ├── MagneticGrid + score/watch policy (domain/)
//!     ├── QuakeCatalog (catalog.rs)
//!     │
//!     └── PostgreSQL Persistence
//! ```
//!
//! The scoring arithmetic and watch lifecycle rules are pure functions in
//! `domain/`; services apply them against persisted state, and every
//! ingestion path is idempotent on external ids.

pub mod api;
pub mod app_state;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod jobs;
pub mod persistence;
pub mod service;
