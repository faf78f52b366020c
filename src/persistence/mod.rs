//! Persistence layer: PostgreSQL storage for all record types.
//!
//! The concrete implementation uses `sqlx::PgPool` for async PostgreSQL
//! access. Uniqueness constraints on external ids (and on watch/match
//! pairs) make every ingestion and matching run idempotent.

pub mod models;
pub mod postgres;

pub use postgres::PostgresStore;
