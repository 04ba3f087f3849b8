//! Parlay orchestration
//!
//! Wires providers, scoring, the builder, and the cache together. Provider
//! failures degrade to whatever the other sources return; generation is
//! side-effect-free apart from the cache write, which is last-writer-wins.

use crate::builder::{BuilderConfig, ParlayBuilder};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::history::{CsvHistory, PropHistory};
use crate::odds::estimate_prop_odds;
use crate::props::{Parlay, PayoutTier, PlayerProp, Sport, Tier};
use crate::providers::{OddsApiClient, OddsJamClient, PropsProvider, SportsDataClient};
use crate::scoring::{ConfidenceScorer, ScoringConfig};
use crate::search::{plan_target_parlay, ScoredProp, TargetParlay};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key: sport plus optional tier (None caches the all-tiers list)
type CacheKey = (Sport, Option<Tier>);

/// Request/generation counters
#[derive(Debug, Default, Clone, Serialize)]
pub struct ServiceCounters {
    pub total_parlays_generated: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub cache_hits: u64,
}

/// Aggregates over currently cached parlays for one tier
#[derive(Debug, Clone, Serialize)]
pub struct TierStats {
    pub count: usize,
    pub avg_confidence: Decimal,
    pub avg_legs: Decimal,
}

/// Snapshot returned by the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SystemStats {
    pub counters: ServiceCounters,
    pub tiers: BTreeMap<String, TierStats>,
    pub last_refresh: BTreeMap<String, DateTime<Utc>>,
}

/// Main service for parlay generation and data access
pub struct ParlayService {
    providers: Vec<Arc<dyn PropsProvider>>,
    injury_source: Option<Arc<SportsDataClient>>,
    live_source: Option<Arc<OddsJamClient>>,
    scorer: ConfidenceScorer,
    builder: ParlayBuilder,
    cache: TtlCache<CacheKey, Vec<Parlay>>,
    counters: RwLock<ServiceCounters>,
    freshness: RwLock<BTreeMap<Sport, DateTime<Utc>>>,
    stake: Decimal,
}

impl ParlayService {
    /// Assemble the full provider stack from configuration
    pub fn from_config(config: &Config) -> Self {
        let sportsdata = Arc::new(SportsDataClient::from_settings(&config.providers.sportsdata));
        let oddsjam = Arc::new(OddsJamClient::from_settings(&config.providers.oddsjam));
        let providers: Vec<Arc<dyn PropsProvider>> = vec![
            sportsdata.clone(),
            Arc::new(OddsApiClient::from_settings(&config.providers.odds_api)),
            oddsjam.clone(),
        ];
        let history: Arc<dyn PropHistory> = Arc::new(CsvHistory::load(&config.history.csv_path));

        Self::new(providers, Some(sportsdata), Some(oddsjam), history, config)
    }

    /// Assemble from explicit parts (tests inject mock providers/history)
    pub fn new(
        providers: Vec<Arc<dyn PropsProvider>>,
        injury_source: Option<Arc<SportsDataClient>>,
        live_source: Option<Arc<OddsJamClient>>,
        history: Arc<dyn PropHistory>,
        config: &Config,
    ) -> Self {
        let scoring = ScoringConfig {
            hit_rate_window_days: config.scoring.hit_rate_window_days,
            prop_hit_rate_days: config.scoring.prop_hit_rate_days,
            recent_form_games: config.scoring.recent_form_games,
        };
        let builder = ParlayBuilder::new(BuilderConfig {
            max_attempts: config.builder.max_attempts,
            min_legs: config.builder.min_legs,
            ..BuilderConfig::default()
        });

        Self {
            providers,
            injury_source,
            live_source,
            scorer: ConfidenceScorer::with_config(history, scoring),
            builder,
            cache: TtlCache::new(Duration::from_secs(config.cache.ttl_secs)),
            counters: RwLock::new(ServiceCounters::default()),
            freshness: RwLock::new(BTreeMap::new()),
            stake: dec!(10),
        }
    }

    /// Parlays for a sport, optionally restricted to one tier
    ///
    /// Serves from cache when fresh, otherwise regenerates and caches under
    /// the requested key. Empty means no eligible parlay, not an error.
    pub async fn get_parlays(&self, sport: Sport, tier: Option<Tier>) -> Vec<Parlay> {
        let key = (sport, tier);
        if let Some(parlays) = self.cache.get(&key).await {
            metrics::counter!("statsync_cache_hits_total").increment(1);
            let mut counters = self.counters.write().await;
            counters.cache_hits += 1;
            counters.successful_requests += 1;
            return parlays;
        }
        metrics::counter!("statsync_cache_misses_total").increment(1);

        let parlays = self.generate(sport, tier).await;
        self.cache.insert(key, parlays.clone()).await;
        self.counters.write().await.successful_requests += 1;
        parlays
    }

    /// Regenerate parlays for one sport and repopulate its cache keys
    pub async fn refresh(&self, sport: Sport) {
        tracing::info!(%sport, "Refreshing parlays");
        self.cache.remove_matching(|(s, _)| *s == sport).await;

        let parlays = self.generate(sport, None).await;
        for tier in Tier::ALL {
            let tier_parlays: Vec<Parlay> = parlays
                .iter()
                .filter(|p| p.tier == tier)
                .cloned()
                .collect();
            self.cache.insert((sport, Some(tier)), tier_parlays).await;
        }
        let count = parlays.len();
        self.cache.insert((sport, None), parlays).await;

        self.freshness.write().await.insert(sport, Utc::now());
        metrics::counter!("statsync_refresh_runs_total").increment(1);
        tracing::info!(%sport, count, "Refreshed parlays");
    }

    /// Refresh every sport in turn
    pub async fn refresh_all(&self) {
        for sport in Sport::ALL {
            self.refresh(sport).await;
        }
    }

    /// Raw aggregated props from all providers, unscored
    pub async fn player_props(
        &self,
        sport: Sport,
        date: Option<chrono::NaiveDate>,
    ) -> Vec<PlayerProp> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        self.fetch_all(sport, date).await
    }

    /// Dollar-tier parlay via the combination search
    ///
    /// Pools props whose hit rate meets the floor, estimates each one's
    /// odds, and searches toward the tier's required odds. None when no
    /// combination of at least two legs exists.
    pub async fn target_parlay(
        &self,
        sport: Sport,
        tier: PayoutTier,
        max_legs: usize,
        min_hit_rate: Decimal,
    ) -> Option<TargetParlay> {
        let props = self.scored_props(sport).await;
        let pool: Vec<ScoredProp> = props
            .into_iter()
            .filter(|p| p.hit_rate >= min_hit_rate)
            .map(|p| ScoredProp {
                estimated_odds: estimate_prop_odds(p.prop_type, p.line, p.hit_rate),
                prop: p,
            })
            .collect();

        match plan_target_parlay(tier, &pool, max_legs, self.stake) {
            Ok(result) => {
                self.counters.write().await.successful_requests += 1;
                result
            }
            Err(e) => {
                tracing::error!(%tier, error = %e, "Target parlay planning failed");
                self.counters.write().await.failed_requests += 1;
                None
            }
        }
    }

    /// Live in-game props for halftime parlays; empty without an OddsJam key
    pub async fn live_props(&self, sport: Sport) -> Vec<PlayerProp> {
        let Some(source) = &self.live_source else {
            return Vec::new();
        };
        match source.fetch_live_props(sport).await {
            Ok(props) => props,
            Err(e) => {
                tracing::warn!(%sport, error = %e, "Live props fetch failed");
                Vec::new()
            }
        }
    }

    /// Current injury report; empty without an injury source
    pub async fn injury_report(&self, sport: Sport) -> Vec<crate::providers::InjuryReport> {
        match &self.injury_source {
            Some(source) => source.fetch_injury_report(sport).await,
            None => Vec::new(),
        }
    }

    /// Injury status for a player; "Healthy" when the report has no entry
    pub async fn injury_status(&self, player: &str, sport: Sport) -> Option<String> {
        self.injury_source.as_ref()?;
        let report = self.injury_report(sport).await;
        Some(
            report
                .into_iter()
                .find(|i| i.player_name == player)
                .map(|i| i.status)
                .unwrap_or_else(|| "Healthy".to_string()),
        )
    }

    /// Counters plus aggregates over the currently cached parlays
    pub async fn system_stats(&self) -> SystemStats {
        let counters = self.counters.read().await.clone();

        let mut tiers = BTreeMap::new();
        let snapshot = self.cache.snapshot().await;
        for tier in Tier::ALL {
            // Tier-specific keys only; the all-tiers key repeats them
            let parlays: Vec<&Parlay> = snapshot
                .iter()
                .filter(|((_, t), _)| *t == Some(tier))
                .flat_map(|(_, v)| v.iter())
                .collect();

            let count = parlays.len();
            let (avg_confidence, avg_legs) = if count > 0 {
                let n = Decimal::from(count as u64);
                (
                    parlays.iter().map(|p| p.overall_confidence).sum::<Decimal>() / n,
                    parlays
                        .iter()
                        .map(|p| Decimal::from(p.legs.len() as u64))
                        .sum::<Decimal>()
                        / n,
                )
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            };

            tiers.insert(
                tier.to_string(),
                TierStats {
                    count,
                    avg_confidence,
                    avg_legs,
                },
            );
        }

        let last_refresh = self
            .freshness
            .read()
            .await
            .iter()
            .map(|(sport, ts)| (sport.to_string(), *ts))
            .collect();

        SystemStats {
            counters,
            tiers,
            last_refresh,
        }
    }

    /// Fetch from every provider, degrading each independently
    async fn fetch_all(&self, sport: Sport, date: chrono::NaiveDate) -> Vec<PlayerProp> {
        let mut all = Vec::new();
        for provider in &self.providers {
            match provider.fetch_player_props(sport, date).await {
                Ok(props) => {
                    tracing::debug!(
                        provider = provider.name(),
                        %sport,
                        count = props.len(),
                        "Fetched props"
                    );
                    metrics::counter!(
                        "statsync_props_fetched_total",
                        "provider" => provider.name()
                    )
                    .increment(props.len() as u64);
                    all.extend(props);
                }
                Err(e) => {
                    // Degrade to whatever the other providers return
                    tracing::warn!(provider = provider.name(), %sport, error = %e, "Provider fetch failed");
                    metrics::counter!(
                        "statsync_provider_failures_total",
                        "provider" => provider.name()
                    )
                    .increment(1);
                }
            }
        }
        all
    }

    /// Fetch and rescore confidence, hit rate, and recent form from history
    async fn scored_props(&self, sport: Sport) -> Vec<PlayerProp> {
        let date = Utc::now().date_naive();
        let mut props = self.fetch_all(sport, date).await;
        for prop in &mut props {
            prop.confidence_score = self.scorer.score(&prop.player_name, prop.prop_type, date);
            prop.hit_rate = self.scorer.hit_rate(&prop.player_name, prop.prop_type, date);
            let form = self.scorer.recent_form(&prop.player_name, prop.prop_type);
            prop.recent_form = if form.is_empty() { None } else { Some(form) };
        }
        props
    }

    async fn generate(&self, sport: Sport, tier: Option<Tier>) -> Vec<Parlay> {
        let props = self.scored_props(sport).await;
        let parlays = self.builder.build_parlays(&props, sport, tier);

        metrics::counter!("statsync_parlays_generated_total").increment(parlays.len() as u64);
        self.counters.write().await.total_parlays_generated += parlays.len() as u64;
        parlays
    }
}
