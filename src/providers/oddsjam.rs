//! OddsJam client
//!
//! Fetches real FanDuel player prop odds from the OddsJam v2 API. Without a
//! configured key the client returns empty results rather than failing.

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

/// OddsJam API base URL
pub const ODDSJAM_API_URL: &str = "https://api.oddsjam.com/api/v2";

const API_KEY_ENV: &str = "ODDSJAM_API_KEY";

/// Real-odds props start from a strong prior; scoring refines both values
const PLACEHOLDER_CONFIDENCE: Decimal = dec!(80);
const PLACEHOLDER_HIT_RATE: Decimal = dec!(0.55);

/// Configuration for the OddsJam client
#[derive(Debug, Clone)]
pub struct OddsJamConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Sportsbook whose odds we extract
    pub sportsbook: String,
}

impl Default for OddsJamConfig {
    fn default() -> Self {
        Self {
            base_url: ODDSJAM_API_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(30),
            sportsbook: "fanduel".to_string(),
        }
    }
}

/// Client for the OddsJam game-odds API
pub struct OddsJamClient {
    config: OddsJamConfig,
    client: Client,
}

impl OddsJamClient {
    pub fn new() -> Self {
        Self::with_config(OddsJamConfig::default())
    }

    pub fn with_config(config: OddsJamConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        if config.api_key.is_none() {
            tracing::warn!("OddsJam API key not configured, provider will return empty results");
        }

        Self { config, client }
    }

    /// Build from the `[providers.oddsjam]` config section
    pub fn from_settings(settings: &ProviderConfig) -> Self {
        Self::with_config(OddsJamConfig {
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| ODDSJAM_API_URL.to_string()),
            api_key: resolve_api_key(&settings.api_key, API_KEY_ENV),
            timeout: Duration::from_secs(settings.timeout_secs),
            sportsbook: "fanduel".to_string(),
        })
    }

    /// Live in-game props for halftime parlays
    pub async fn fetch_live_props(&self, sport: Sport) -> anyhow::Result<Vec<PlayerProp>> {
        let Some(api_key) = &self.config.api_key else {
            return Ok(Vec::new());
        };

        let url = format!("{}/live-odds", self.config.base_url);
        let params = [
            ("sport", sport_key(sport)),
            ("sportsbook", self.config.sportsbook.as_str()),
            ("market_name", "player_props"),
            ("is_live", "true"),
        ];

        match self.request(&url, &params, api_key).await {
            Ok(response) => {
                let props = transform(response, sport, &self.config.sportsbook, None);
                tracing::info!(%sport, count = props.len(), "Fetched live OddsJam props");
                Ok(props)
            }
            Err(e) => {
                tracing::error!(%sport, error = %e, "OddsJam live fetch failed");
                Ok(Vec::new())
            }
        }
    }

    async fn request(
        &self,
        url: &str,
        params: &[(&str, &str)],
        api_key: &str,
    ) -> anyhow::Result<OddsJamResponse> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header("User-Agent", "StatsSync/1.0")
            .header("Accept", "application/json")
            .bearer_auth(api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OddsJam API error {}: {}", status, body);
        }

        Ok(response.json().await?)
    }
}

impl Default for OddsJamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropsProvider for OddsJamClient {
    fn name(&self) -> &'static str {
        "oddsjam"
    }

    async fn fetch_player_props(
        &self,
        sport: Sport,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<PlayerProp>> {
        let Some(api_key) = &self.config.api_key else {
            tracing::debug!("OddsJam key missing, returning empty results");
            return Ok(Vec::new());
        };

        let url = format!("{}/game-odds", self.config.base_url);
        let date_string = date.format("%Y-%m-%d").to_string();
        let params = [
            ("sport", sport_key(sport)),
            ("sportsbook", self.config.sportsbook.as_str()),
            ("market_name", "player_props"),
            ("is_main", "false"),
            ("date", date_string.as_str()),
        ];

        match self.request(&url, &params, api_key).await {
            Ok(response) => {
                let props = transform(response, sport, &self.config.sportsbook, Some(date));
                tracing::info!(%sport, count = props.len(), "Transformed OddsJam props");
                Ok(props)
            }
            Err(e) => {
                tracing::error!(%sport, error = %e, "OddsJam fetch failed");
                metrics::counter!("statsync_provider_failures_total", "provider" => "oddsjam")
                    .increment(1);
                Ok(Vec::new())
            }
        }
    }
}

fn sport_key(sport: Sport) -> &'static str {
    match sport {
        Sport::Mlb => "baseball_mlb",
        Sport::Nfl => "americanfootball_nfl",
        Sport::Nba => "basketball_nba",
        Sport::Nhl => "icehockey_nhl",
    }
}

#[derive(Debug, Deserialize)]
struct OddsJamResponse {
    #[serde(default)]
    data: Vec<OddsJamGame>,
}

#[derive(Debug, Deserialize)]
struct OddsJamGame {
    #[serde(default)]
    home_team: String,
    #[serde(default)]
    away_team: String,
    commence_time: Option<String>,
    #[serde(default)]
    markets: Vec<OddsJamMarket>,
}

#[derive(Debug, Deserialize)]
struct OddsJamMarket {
    name: String,
    #[serde(default)]
    outcomes: Vec<OddsJamOutcome>,
}

#[derive(Debug, Deserialize)]
struct OddsJamOutcome {
    name: String,
    point: Option<Decimal>,
    #[serde(default)]
    sportsbooks: Vec<OddsJamBook>,
}

#[derive(Debug, Deserialize)]
struct OddsJamBook {
    sportsbook: String,
    over_odds: Option<i32>,
    under_odds: Option<i32>,
}

/// Flatten the nested game/market/outcome response into player props
fn transform(
    response: OddsJamResponse,
    sport: Sport,
    sportsbook: &str,
    fallback_date: Option<NaiveDate>,
) -> Vec<PlayerProp> {
    let mut props = Vec::new();

    for game in response.data {
        let game_date = game
            .commence_time
            .as_deref()
            .and_then(|t| t.get(..10))
            .and_then(|d| d.parse::<NaiveDate>().ok())
            .or(fallback_date)
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        for market in &game.markets {
            let Some(prop_type) = map_market_name(&market.name, sport) else {
                tracing::debug!(market = %market.name, "Skipping unmapped OddsJam market");
                continue;
            };

            for outcome in &market.outcomes {
                let Some(book) = outcome
                    .sportsbooks
                    .iter()
                    .find(|b| b.sportsbook == sportsbook)
                else {
                    continue;
                };

                // Roster lookup is out of reach here; the home team is the
                // best available attribution
                let team = game.home_team.as_str();
                let opponent = game.away_team.as_str();

                props.push(PlayerProp {
                    player_name: outcome.name.clone(),
                    team: team_code(team),
                    opponent: team_code(opponent),
                    prop_type,
                    line: outcome.point.unwrap_or_else(|| prop_type.default_line()),
                    over_odds: book.over_odds.unwrap_or(-110),
                    under_odds: book.under_odds.unwrap_or(-110),
                    game_date,
                    position: String::new(),
                    source: "oddsjam_fanduel".to_string(),
                    confidence_score: PLACEHOLDER_CONFIDENCE,
                    hit_rate: PLACEHOLDER_HIT_RATE,
                    recent_form: None,
                });
            }
        }
    }

    props
}

/// Map OddsJam market names to prop types by substring, per sport
fn map_market_name(market_name: &str, sport: Sport) -> Option<PropType> {
    let market = market_name.to_lowercase();

    match sport {
        Sport::Mlb => {
            if market.contains("home run") || market.contains("homer") {
                Some(PropType::HomeRuns)
            } else if market.contains("rbi") {
                Some(PropType::Rbis)
            } else if market.contains("strikeout") {
                if market.contains("pitcher") {
                    Some(PropType::PitcherStrikeouts)
                } else {
                    Some(PropType::BatterStrikeouts)
                }
            } else if market.contains("hit") {
                Some(PropType::Hits)
            } else {
                None
            }
        }
        Sport::Nfl => {
            if market.contains("passing yard") {
                Some(PropType::PassingYards)
            } else if market.contains("rushing yard") {
                Some(PropType::RushingYards)
            } else if market.contains("receiving yard") {
                Some(PropType::ReceivingYards)
            } else if market.contains("passing touchdown") {
                Some(PropType::PassingTouchdowns)
            } else if market.contains("reception") {
                Some(PropType::Receptions)
            } else {
                None
            }
        }
        _ => None,
    }
}
