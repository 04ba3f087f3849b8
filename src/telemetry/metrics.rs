//! Prometheus metrics

use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and register metric descriptions
///
/// Exposes a scrape endpoint on the given port. Counters are recorded at the
/// call sites via the `metrics` macros.
pub fn install_metrics(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus exporter: {}", e))?;

    describe_counter!(
        "statsync_props_fetched_total",
        Unit::Count,
        "Player props fetched, labeled by provider"
    );
    describe_counter!(
        "statsync_provider_failures_total",
        Unit::Count,
        "Provider fetches that degraded to fallback data"
    );
    describe_counter!(
        "statsync_parlays_generated_total",
        Unit::Count,
        "Parlays produced by the builder"
    );
    describe_counter!(
        "statsync_cache_hits_total",
        Unit::Count,
        "Parlay requests served from cache"
    );
    describe_counter!(
        "statsync_cache_misses_total",
        Unit::Count,
        "Parlay requests that triggered regeneration"
    );
    describe_counter!(
        "statsync_refresh_runs_total",
        Unit::Count,
        "Completed per-sport refresh passes"
    );
    describe_counter!(
        "statsync_notifications_sent_total",
        Unit::Count,
        "Discord notifications delivered"
    );

    tracing::info!(port, "Prometheus metrics exporter listening");
    Ok(())
}
