//! End-to-end pipeline tests: mock providers + seeded history through the
//! parlay service.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stat_sync::config::Config;
use stat_sync::history::{CsvHistory, HistoricalProp, PropHistory};
use stat_sync::props::{PayoutTier, PlayerProp, PropType, Sport, Tier};
use stat_sync::providers::PropsProvider;
use stat_sync::service::ParlayService;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Provider serving a fixed prop list
struct StaticProvider {
    provider_name: &'static str,
    props: Vec<PlayerProp>,
}

#[async_trait]
impl PropsProvider for StaticProvider {
    fn name(&self) -> &'static str {
        self.provider_name
    }

    async fn fetch_player_props(
        &self,
        _sport: Sport,
        _date: NaiveDate,
    ) -> anyhow::Result<Vec<PlayerProp>> {
        Ok(self.props.clone())
    }
}

/// Provider that always fails, to exercise independent degradation
struct FailingProvider;

#[async_trait]
impl PropsProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch_player_props(
        &self,
        _sport: Sport,
        _date: NaiveDate,
    ) -> anyhow::Result<Vec<PlayerProp>> {
        anyhow::bail!("connection refused")
    }
}

fn prop(player: &str, team: &str, over_odds: i32) -> PlayerProp {
    PlayerProp {
        player_name: player.to_string(),
        team: team.to_string(),
        opponent: "OPP".to_string(),
        prop_type: PropType::Hits,
        line: dec!(1.5),
        over_odds,
        under_odds: -190,
        game_date: Utc::now().date_naive(),
        position: "OF".to_string(),
        source: "static".to_string(),
        // Placeholders; the service rescores from history
        confidence_score: dec!(0),
        hit_rate: dec!(0),
        recent_form: None,
    }
}

/// Sixteen props across eight teams, each player with a perfect recent
/// record so every tier's confidence threshold is met
fn pool() -> Vec<PlayerProp> {
    let teams = ["NYY", "BOS", "LAD", "SD", "ATL", "NYM", "HOU", "SEA"];
    (0..16)
        .map(|i| prop(&format!("Player {}", i), teams[i % teams.len()], 160))
        .collect()
}

/// Four recent hits per player, all inside every scoring window
fn seeded_history() -> CsvHistory {
    let today = Utc::now().date_naive();
    let mut records = Vec::new();
    for i in 0..16 {
        for day in 1..=4 {
            records.push(HistoricalProp {
                player_name: format!("Player {}", i),
                date: today - Duration::days(day),
                prop_type: PropType::Hits,
                line: dec!(1.5),
                actual_result: dec!(2),
                hit: true,
                odds: -110,
                sport: Sport::Mlb,
            });
        }
    }
    CsvHistory::from_records(records)
}

fn service_with(providers: Vec<Arc<dyn PropsProvider>>) -> ParlayService {
    let history: Arc<dyn PropHistory> = Arc::new(seeded_history());
    ParlayService::new(providers, None, None, history, &Config::default())
}

fn default_service() -> ParlayService {
    service_with(vec![Arc::new(StaticProvider {
        provider_name: "static",
        props: pool(),
    })])
}

#[tokio::test]
async fn generated_parlays_obey_invariants() {
    let service = default_service();
    let parlays = service.get_parlays(Sport::Mlb, None).await;
    assert!(!parlays.is_empty(), "seeded pool should produce parlays");

    for parlay in &parlays {
        // No duplicate players
        let players: Vec<&str> = parlay.players();
        let unique: HashSet<&str> = players.iter().copied().collect();
        assert_eq!(players.len(), unique.len());

        // At most two legs per team
        let mut teams: HashMap<&str, usize> = HashMap::new();
        for leg in &parlay.legs {
            *teams.entry(leg.prop.team.as_str()).or_insert(0) += 1;
        }
        assert!(teams.values().all(|&c| c <= 2));

        // Rescored confidence respects the parlay's tier threshold
        let requirements = parlay.tier.requirements();
        assert!(parlay.overall_confidence >= requirements.min_confidence);
        assert!(parlay.legs.len() <= requirements.max_legs);
    }
}

#[tokio::test]
async fn second_request_hits_cache() {
    let service = default_service();
    let first = service.get_parlays(Sport::Mlb, Some(Tier::Free)).await;
    let second = service.get_parlays(Sport::Mlb, Some(Tier::Free)).await;

    // Cached list is returned verbatim
    let first_ids: Vec<_> = first.iter().map(|p| p.id).collect();
    let second_ids: Vec<_> = second.iter().map(|p| p.id).collect();
    assert_eq!(first_ids, second_ids);

    let stats = service.system_stats().await;
    assert_eq!(stats.counters.cache_hits, 1);
    assert_eq!(stats.counters.successful_requests, 2);
}

#[tokio::test]
async fn refresh_populates_every_tier_key() {
    let service = default_service();
    service.refresh(Sport::Mlb).await;

    let stats = service.system_stats().await;
    assert!(stats.last_refresh.contains_key("mlb"));

    // Tier requests now come straight from cache
    service.get_parlays(Sport::Mlb, Some(Tier::Premium)).await;
    let stats = service.system_stats().await;
    assert_eq!(stats.counters.cache_hits, 1);
}

#[tokio::test]
async fn provider_failure_degrades_to_other_sources() {
    let service = service_with(vec![
        Arc::new(FailingProvider),
        Arc::new(StaticProvider {
            provider_name: "static",
            props: pool(),
        }),
    ]);

    let props = service.player_props(Sport::Mlb, None).await;
    assert_eq!(props.len(), 16, "failing provider must not poison the rest");
}

#[tokio::test]
async fn all_providers_failing_yields_empty_not_error() {
    let service = service_with(vec![Arc::new(FailingProvider)]);
    let props = service.player_props(Sport::Mlb, None).await;
    assert!(props.is_empty());

    let parlays = service.get_parlays(Sport::Mlb, None).await;
    assert!(parlays.is_empty());
}

#[tokio::test]
async fn scoring_rescores_from_history() {
    let service = default_service();
    // player_props is raw; target_parlay runs the scoring pass internally,
    // so probe scoring through a generated parlay instead
    let parlays = service.get_parlays(Sport::Mlb, Some(Tier::Goat)).await;
    for parlay in &parlays {
        for leg in &parlay.legs {
            // Perfect history: hit rate 1.0, confidence clamped at 100
            assert_eq!(leg.prop.hit_rate, dec!(1));
            assert_eq!(leg.prop.confidence_score, dec!(100));
            assert_eq!(leg.prop.recent_form.as_deref(), Some(&[true; 4][..]));
        }
    }
}

#[tokio::test]
async fn target_parlay_reaches_payout_band() {
    let service = default_service();
    let parlay = service
        .target_parlay(Sport::Mlb, PayoutTier::D100, 8, dec!(0.8))
        .await
        .expect("high-hit-rate pool should yield a combination");

    assert_eq!(parlay.tier, PayoutTier::D100);
    assert!(parlay.legs.len() >= 2);
    assert!(parlay.hit_probability > Decimal::ZERO);
    // Combined odds should land near the $100-from-$10 target
    let target_decimal = dec!(10);
    let combined = stat_sync::odds::american_to_decimal(parlay.total_odds).unwrap();
    assert!(
        (combined - target_decimal).abs() <= target_decimal,
        "combined decimal {} too far from target {}",
        combined,
        target_decimal
    );
}

#[tokio::test]
async fn target_parlay_empty_pool_is_none() {
    let service = service_with(vec![Arc::new(FailingProvider)]);
    let result = service
        .target_parlay(Sport::Mlb, PayoutTier::D500, 8, dec!(0.8))
        .await;
    assert!(result.is_none());
}
