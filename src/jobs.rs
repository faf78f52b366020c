//! Periodic background jobs.
//!
//! Each job is a simple interval loop: run, log the outcome, sleep until
//! the next tick. Jobs are idempotent (all writes dedupe on external ids
//! or pair constraints), so a failed run is simply retried on its next
//! scheduled invocation, with no internal backoff.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::app_state::AppState;
use crate::catalog::QuakeCatalog;
use crate::config::AppConfig;
use crate::error::TrackerError;

/// Spawns all periodic jobs onto the runtime.
pub fn spawn_all(state: &AppState, catalog: QuakeCatalog, config: &AppConfig) {
    spawn_loop("catalog_fetch", config.fetch_interval_secs, {
        let state = state.clone();
        let config = config.clone();
        move || {
            let state = state.clone();
            let catalog = catalog.clone();
            let config = config.clone();
            async move { fetch_and_open(&state, &catalog, &config).await }
        }
    });

    spawn_loop("watch_check", config.watch_check_interval_secs, {
        let state = state.clone();
        move || {
            let state = state.clone();
            async move { check_watches(&state).await }
        }
    });

    spawn_loop("scoring", config.scoring_interval_secs, {
        let state = state.clone();
        move || {
            let state = state.clone();
            async move { score_pending(&state).await }
        }
    });

    spawn_loop("hotspot_refresh", config.hotspot_interval_secs, {
        let state = state.clone();
        move || {
            let state = state.clone();
            async move { refresh_hotspots(&state).await }
        }
    });
}

/// Fetches recent catalog events, ingests them, and opens watches for the
/// qualifying ones.
///
/// # Errors
///
/// Returns a [`TrackerError::Catalog`] when the upstream fetch fails; the
/// loop logs it and retries on the next tick.
pub async fn fetch_and_open(
    state: &AppState,
    catalog: &QuakeCatalog,
    config: &AppConfig,
) -> Result<(), TrackerError> {
    let records = catalog
        .recent(
            config.catalog_fetch_days,
            config.catalog_min_magnitude,
            config.catalog_fetch_limit,
        )
        .await?;

    let summary = state.ingest.ingest_seismic(&records).await;
    let opened = state.watches.open_watches(&records, Utc::now()).await;

    tracing::info!(
        fetched = records.len(),
        new_events = summary.inserted,
        watches_opened = opened,
        "catalog fetch complete"
    );
    Ok(())
}

/// Expires due watches and matches recent reports against the active ones.
///
/// # Errors
///
/// Returns a [`TrackerError::Persistence`] on store failure.
pub async fn check_watches(state: &AppState) -> Result<(), TrackerError> {
    let now = Utc::now();
    let expired = state.watches.expire_due_watches(now).await?;

    // Candidates are bounded to the watch window length: anything older
    // can no longer fall inside an active window.
    let cutoff = now - chrono::Duration::hours(crate::domain::watch::WATCH_DURATION_HOURS);
    let candidates = state.store.match_candidates(cutoff).await?;
    let matched = state.watches.match_reports(&candidates, now).await?;

    tracing::info!(expired, matched, "watch check complete");
    Ok(())
}

/// Scores reports the scoring job has not yet processed.
///
/// # Errors
///
/// Returns a [`TrackerError::Persistence`] on store failure.
pub async fn score_pending(state: &AppState) -> Result<(), TrackerError> {
    let scored = state.scoring.score_pending(100).await?;
    if scored > 0 {
        tracing::info!(scored, "scoring job complete");
    }
    Ok(())
}

/// Rebuilds the hotspot aggregates.
///
/// # Errors
///
/// Returns a [`TrackerError::Persistence`] on store failure.
pub async fn refresh_hotspots(state: &AppState) -> Result<(), TrackerError> {
    state.hotspots.refresh().await?;
    Ok(())
}

/// Runs `job` every `interval_secs` seconds, logging failures and
/// continuing. Missed ticks are delayed rather than bursted, so a slow run
/// never overlaps the next invocation of the same job.
fn spawn_loop<F, Fut>(name: &'static str, interval_secs: u64, job: F)
where
    F: Fn() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<(), TrackerError>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let Err(err) = job().await {
                tracing::error!(job = name, %err, "job run failed, retrying on next tick");
            }
        }
    });
}
