//! Odds provider clients
//!
//! Async HTTP clients for the third-party prop/odds providers. Each provider
//! degrades independently: a missing key, HTTP failure, or decode failure
//! yields an empty list (or the static mock dataset for SportsDataIO), never
//! a hard failure to the caller.

pub mod mock;
mod odds_api;
mod oddsjam;
mod sportsdata;

pub use odds_api::OddsApiClient;
pub use oddsjam::OddsJamClient;
pub use sportsdata::{InjuryReport, SportsDataClient};

use crate::props::{PlayerProp, Sport};
use async_trait::async_trait;
use chrono::NaiveDate;

/// A source of normalized player props
#[async_trait]
pub trait PropsProvider: Send + Sync {
    /// Short provider name for logs and the prop `source` field
    fn name(&self) -> &'static str;

    /// Player props for a sport and game date
    async fn fetch_player_props(
        &self,
        sport: Sport,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<PlayerProp>>;
}

/// Environment variable wins over the config file
pub(crate) fn resolve_api_key(config_key: &Option<String>, env_var: &str) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|k| !k.is_empty())
        .or_else(|| config_key.clone())
}

/// Three-letter uppercase team code from a full team name
pub(crate) fn team_code(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}
