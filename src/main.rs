//! piezo-watch server entry point.
//!
//! Starts the Axum HTTP server and the periodic background jobs.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use piezo_watch::api;
use piezo_watch::app_state::AppState;
use piezo_watch::catalog::QuakeCatalog;
use piezo_watch::config::AppConfig;
use piezo_watch::domain::MagneticGrid;
use piezo_watch::jobs;
use piezo_watch::persistence::PostgresStore;
use piezo_watch::service::{HotspotService, IngestService, ScoringEngine, WatchManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting piezo-watch");

    // Connect to PostgreSQL and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("database connection failed")?;

    let store = PostgresStore::new(pool);
    store.migrate().await.context("schema migration failed")?;

    // The grid loads lazily on first query; a missing file only disables
    // the lookup.
    let grid = Arc::new(MagneticGrid::new(config.grid_path.clone()));

    // Build service layer
    let scoring = Arc::new(ScoringEngine::new(
        Arc::clone(&grid),
        store.clone(),
        config.seismic_scoring_enabled,
    ));
    let watches = Arc::new(WatchManager::new(
        store.clone(),
        Arc::clone(&grid),
        config.watch_radius_km,
    ));
    let ingest = Arc::new(IngestService::new(store.clone()));
    let hotspots = Arc::new(HotspotService::new(store.clone()));

    // Build application state
    let app_state = AppState {
        store,
        scoring,
        watches,
        ingest,
        hotspots,
    };

    // Spawn the periodic jobs
    if config.jobs_enabled {
        let catalog = QuakeCatalog::new(config.catalog_base_url.clone())
            .context("catalog client construction failed")?;
        jobs::spawn_all(&app_state, catalog, &config);
    } else {
        tracing::warn!("background jobs disabled by configuration");
    }

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
