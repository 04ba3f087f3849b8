//! The Odds API client
//!
//! Pulls FanDuel game odds from The Odds API. The free tier exposes only
//! main markets, so MLB game totals are reshaped into team-level pseudo
//! props as a stand-in until real player props are available.

use super::{resolve_api_key, team_code, PropsProvider};
use crate::config::ProviderConfig;
use crate::props::{PlayerProp, PropType, Sport};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;

/// The Odds API base URL
pub const ODDS_API_URL: &str = "https://api.the-odds-api.com/v4";

const API_KEY_ENV: &str = "ODDS_API_KEY";

/// Derived pseudo props carry a weaker prior than real player props
const PLACEHOLDER_CONFIDENCE: Decimal = dec!(65);
const PLACEHOLDER_HIT_RATE: Decimal = dec!(0.52);

/// Configuration for The Odds API client
#[derive(Debug, Clone)]
pub struct OddsApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub bookmaker: String,
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: ODDS_API_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(30),
            bookmaker: "fanduel".to_string(),
        }
    }
}

/// Client for The Odds API
pub struct OddsApiClient {
    config: OddsApiConfig,
    client: Client,
}

impl OddsApiClient {
    pub fn new() -> Self {
        Self::with_config(OddsApiConfig::default())
    }

    pub fn with_config(config: OddsApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build from the `[providers.odds_api]` config section
    pub fn from_settings(settings: &ProviderConfig) -> Self {
        Self::with_config(OddsApiConfig {
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| ODDS_API_URL.to_string()),
            api_key: resolve_api_key(&settings.api_key, API_KEY_ENV),
            timeout: Duration::from_secs(settings.timeout_secs),
            bookmaker: "fanduel".to_string(),
        })
    }
}

impl Default for OddsApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropsProvider for OddsApiClient {
    fn name(&self) -> &'static str {
        "odds_api"
    }

    async fn fetch_player_props(
        &self,
        sport: Sport,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<PlayerProp>> {
        let Some(api_key) = &self.config.api_key else {
            tracing::debug!("The Odds API key missing, returning empty results");
            return Ok(Vec::new());
        };

        let Some(key) = sport_key(sport) else {
            return Ok(Vec::new());
        };

        let url = format!("{}/sports/{}/odds", self.config.base_url, key);
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("apiKey", api_key.as_str()),
                    ("regions", "us"),
                    ("markets", "h2h,spreads,totals"),
                    ("bookmakers", self.config.bookmaker.as_str()),
                    ("oddsFormat", "american"),
                    ("dateFormat", "iso"),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("The Odds API error {}: {}", status, body);
            }

            Ok::<Vec<OddsApiEvent>, anyhow::Error>(response.json().await?)
        }
        .await;

        match result {
            Ok(events) => {
                let props = transform(events, sport, &self.config.bookmaker, date);
                tracing::info!(%sport, count = props.len(), "Derived props from game odds");
                Ok(props)
            }
            Err(e) => {
                tracing::error!(%sport, error = %e, "The Odds API fetch failed");
                metrics::counter!("statsync_provider_failures_total", "provider" => "odds_api")
                    .increment(1);
                Ok(Vec::new())
            }
        }
    }
}

fn sport_key(sport: Sport) -> Option<&'static str> {
    match sport {
        Sport::Mlb => Some("baseball_mlb"),
        Sport::Nfl => Some("americanfootball_nfl"),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct OddsApiEvent {
    #[serde(default)]
    home_team: String,
    #[serde(default)]
    away_team: String,
    commence_time: Option<String>,
    #[serde(default)]
    bookmakers: Vec<OddsApiBookmaker>,
}

#[derive(Debug, Deserialize)]
struct OddsApiBookmaker {
    key: String,
    #[serde(default)]
    markets: Vec<OddsApiMarket>,
}

#[derive(Debug, Deserialize)]
struct OddsApiMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<OddsApiOutcome>,
}

#[derive(Debug, Deserialize)]
struct OddsApiOutcome {
    #[allow(dead_code)]
    name: String,
    point: Option<Decimal>,
    price: Option<i32>,
}

/// Reshape MLB game totals into team-level pseudo hit props
fn transform(
    events: Vec<OddsApiEvent>,
    sport: Sport,
    bookmaker: &str,
    fallback_date: NaiveDate,
) -> Vec<PlayerProp> {
    if sport != Sport::Mlb {
        // Only MLB totals translate into a sensible pseudo prop
        return Vec::new();
    }

    let mut props = Vec::new();

    for event in events {
        let Some(book) = event.bookmakers.iter().find(|b| b.key == bookmaker) else {
            continue;
        };

        let game_date = event
            .commence_time
            .as_deref()
            .and_then(|t| t.get(..10))
            .and_then(|d| d.parse::<NaiveDate>().ok())
            .unwrap_or(fallback_date);

        for market in &book.markets {
            if market.key != "totals" {
                continue;
            }
            for outcome in &market.outcomes {
                let total_line = outcome.point.unwrap_or(dec!(8.5));
                let odds = outcome.price.unwrap_or(-110);

                for (team, opponent) in [
                    (&event.home_team, &event.away_team),
                    (&event.away_team, &event.home_team),
                ] {
                    props.push(PlayerProp {
                        player_name: format!("{} Team", team),
                        team: team_code(team),
                        opponent: team_code(opponent),
                        prop_type: PropType::Hits,
                        line: (total_line / dec!(2.2)).round_dp(1),
                        over_odds: odds,
                        under_odds: -130,
                        game_date,
                        position: String::new(),
                        source: "fanduel_game_data".to_string(),
                        confidence_score: PLACEHOLDER_CONFIDENCE,
                        hit_rate: PLACEHOLDER_HIT_RATE,
                        recent_form: None,
                    });
                }
            }
        }
    }

    props
}
