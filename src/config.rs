//! Configuration types for stat-sync

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub builder: BuilderSettings,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Provider endpoints and credentials
///
/// API keys resolve from the environment first (SPORTSDATAIO_API_KEY,
/// ODDSJAM_API_KEY, ODDS_API_KEY), then from the file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub sportsdata: ProviderConfig,
    #[serde(default)]
    pub oddsjam: ProviderConfig,
    #[serde(default)]
    pub odds_api: ProviderConfig,
}

/// A single provider's connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL override; each client carries its production default
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Historical dataset location
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("./data/historical_props.csv")
}

/// Confidence scoring windows
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_hit_rate_window_days")]
    pub hit_rate_window_days: i64,
    #[serde(default = "default_prop_hit_rate_days")]
    pub prop_hit_rate_days: i64,
    #[serde(default = "default_recent_form_games")]
    pub recent_form_games: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            hit_rate_window_days: default_hit_rate_window_days(),
            prop_hit_rate_days: default_prop_hit_rate_days(),
            recent_form_games: default_recent_form_games(),
        }
    }
}

fn default_hit_rate_window_days() -> i64 {
    90
}
fn default_prop_hit_rate_days() -> i64 {
    30
}
fn default_recent_form_games() -> usize {
    5
}

/// Parlay builder limits
#[derive(Debug, Clone, Deserialize)]
pub struct BuilderSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_min_legs")]
    pub min_legs: usize,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_legs: default_min_legs(),
        }
    }
}

fn default_max_attempts() -> usize {
    50
}
fn default_min_legs() -> usize {
    5
}

/// Parlay cache TTL
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    600
}

/// Periodic refresh and notification settings
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_refresh_minutes")]
    pub refresh_interval_minutes: u64,
    /// Parlays at or above this confidence trigger a notification
    #[serde(default = "default_notify_min_confidence")]
    pub notify_min_confidence: Decimal,
    pub discord_webhook_url: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: default_refresh_minutes(),
            notify_min_confidence: default_notify_min_confidence(),
            discord_webhook_url: None,
        }
    }
}

fn default_refresh_minutes() -> u64 {
    10
}
fn default_notify_min_confidence() -> Decimal {
    dec!(85)
}

/// HTTP API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_metrics_port() -> u16 {
    9090
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
