//! SportsDataIO client
//!
//! Fetches per-player prop lines and odds from the SportsDataIO v3 API.
//! Every failure path (missing key, unsupported sport, HTTP error, decode
//! error) falls back to the static mock dataset so downstream generation
//! keeps working.

use super::{mock, resolve_api_key, PropsProvider};
use crate::config::ProviderConfig;
use crate::props::{PlayerProp, PropType, Sport};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// SportsDataIO API base URL
pub const SPORTSDATA_API_URL: &str = "https://api.sportsdata.io/v3";

const API_KEY_ENV: &str = "SPORTSDATAIO_API_KEY";

/// Placeholder values overwritten during scoring
const PLACEHOLDER_CONFIDENCE: Decimal = dec!(75);
const PLACEHOLDER_HIT_RATE: Decimal = dec!(0.55);

/// Configuration for the SportsDataIO client
#[derive(Debug, Clone)]
pub struct SportsDataConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for SportsDataConfig {
    fn default() -> Self {
        Self {
            base_url: SPORTSDATA_API_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the SportsDataIO odds API
pub struct SportsDataClient {
    config: SportsDataConfig,
    client: Client,
}

impl SportsDataClient {
    pub fn new() -> Self {
        Self::with_config(SportsDataConfig::default())
    }

    pub fn with_config(config: SportsDataConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        if config.api_key.is_none() {
            tracing::warn!("SportsDataIO API key not configured, mock data will be served");
        }

        Self { config, client }
    }

    /// Build from the `[providers.sportsdata]` config section
    pub fn from_settings(settings: &ProviderConfig) -> Self {
        Self::with_config(SportsDataConfig {
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| SPORTSDATA_API_URL.to_string()),
            api_key: resolve_api_key(&settings.api_key, API_KEY_ENV),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    fn props_endpoint(&self, sport: Sport, date: NaiveDate) -> Option<String> {
        let key = match sport {
            Sport::Nfl => "nfl",
            Sport::Mlb => "mlb",
            _ => return None,
        };
        Some(format!(
            "{}/{}/odds/{}/playerprop",
            self.config.base_url,
            key,
            date.format("%Y-%m-%d")
        ))
    }

    fn injury_endpoint(&self, sport: Sport) -> Option<String> {
        let key = match sport {
            Sport::Nfl => "nfl",
            Sport::Mlb => "mlb",
            _ => return None,
        };
        Some(format!("{}/{}/injuries", self.config.base_url, key))
    }

    async fn fetch_raw_props(
        &self,
        url: &str,
        api_key: &str,
    ) -> anyhow::Result<Vec<SportsDataProp>> {
        let response = self
            .client
            .get(url)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("SportsDataIO request failed with status {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Current injury report, falling back to mock data on any failure
    pub async fn fetch_injury_report(&self, sport: Sport) -> Vec<InjuryReport> {
        let (Some(api_key), Some(url)) = (&self.config.api_key, self.injury_endpoint(sport))
        else {
            return mock::injuries_for(sport);
        };

        let result = async {
            let response = self
                .client
                .get(&url)
                .header("Ocp-Apim-Subscription-Key", api_key)
                .send()
                .await?;
            if !response.status().is_success() {
                anyhow::bail!("status {}", response.status());
            }
            Ok::<Vec<InjuryReport>, anyhow::Error>(response.json().await?)
        }
        .await;

        match result {
            Ok(injuries) => {
                tracing::info!(%sport, count = injuries.len(), "Fetched injury report");
                injuries
            }
            Err(e) => {
                tracing::warn!(%sport, error = %e, "Injury report fetch failed, using mock data");
                mock::injuries_for(sport)
            }
        }
    }
}

impl Default for SportsDataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropsProvider for SportsDataClient {
    fn name(&self) -> &'static str {
        "sportsdata_io"
    }

    async fn fetch_player_props(
        &self,
        sport: Sport,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<PlayerProp>> {
        let (Some(api_key), Some(url)) = (&self.config.api_key, self.props_endpoint(sport, date))
        else {
            tracing::info!(%sport, %date, "Serving mock SportsDataIO props");
            return Ok(mock::props_for(sport, date));
        };

        match self.fetch_raw_props(&url, api_key).await {
            Ok(raw) => {
                tracing::info!(%sport, %date, count = raw.len(), "Fetched SportsDataIO props");
                Ok(normalize(raw, date))
            }
            Err(e) => {
                tracing::warn!(%sport, error = %e, "SportsDataIO fetch failed, using mock data");
                metrics::counter!("statsync_provider_failures_total", "provider" => "sportsdata_io")
                    .increment(1);
                Ok(mock::props_for(sport, date))
            }
        }
    }
}

/// Raw prop record as returned by the odds endpoint
#[derive(Debug, Deserialize)]
struct SportsDataProp {
    player_name: String,
    team: String,
    opponent: String,
    prop_type: String,
    line: Decimal,
    over_odds: i32,
    under_odds: i32,
    game_date: Option<NaiveDate>,
    #[serde(default)]
    position: String,
}

/// Injury report entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryReport {
    pub player_name: String,
    pub status: String,
    pub injury: Option<String>,
}

/// Convert raw records, dropping unrecognized prop types
fn normalize(raw: Vec<SportsDataProp>, fallback_date: NaiveDate) -> Vec<PlayerProp> {
    raw.into_iter()
        .filter_map(|r| {
            let prop_type = match r.prop_type.parse::<PropType>() {
                Ok(p) => p,
                Err(_) => {
                    tracing::debug!(prop_type = %r.prop_type, "Skipping unknown prop type");
                    return None;
                }
            };
            Some(PlayerProp {
                player_name: r.player_name,
                team: r.team,
                opponent: r.opponent,
                prop_type,
                line: r.line,
                over_odds: r.over_odds,
                under_odds: r.under_odds,
                game_date: r.game_date.unwrap_or(fallback_date),
                position: r.position,
                source: "sportsdata_io".to_string(),
                confidence_score: PLACEHOLDER_CONFIDENCE,
                hit_rate: PLACEHOLDER_HIT_RATE,
                recent_form: None,
            })
        })
        .collect()
}
