//! Telemetry module
//!
//! Structured logging and Prometheus metrics. Logging is initialized for
//! every command; the metrics exporter only runs under `serve`, where a
//! long-lived process exists to scrape.

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::install_metrics;
