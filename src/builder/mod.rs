//! Parlay construction policy
//!
//! Selects props per tier thresholds under bounded randomized retries.
//! Exhaustion is a silent failure path: callers get fewer (or zero) parlays,
//! never an error.

use crate::odds::{american_to_decimal, calculate_parlay_odds};
use crate::props::{Parlay, ParlayLeg, PlayerProp, Selection, Sport, Tier, TierRequirements};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use uuid::Uuid;

/// Builder limits
#[derive(Debug, Clone, Copy)]
pub struct BuilderConfig {
    /// Randomized attempts before giving up on a single parlay
    pub max_attempts: usize,
    /// Minimum legs per parlay (and minimum eligible pool size)
    pub min_legs: usize,
    /// Payout acceptance tolerance (fraction of the tier target)
    pub payout_tolerance: Decimal,
    /// Player-set overlap above which two parlays count as duplicates
    pub duplicate_overlap: Decimal,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            min_legs: 5,
            payout_tolerance: dec!(0.8),
            duplicate_overlap: dec!(0.6),
        }
    }
}

/// Builds tiered parlays from scored props
pub struct ParlayBuilder {
    config: BuilderConfig,
}

impl Default for ParlayBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl ParlayBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Build parlays for one tier, or all tiers when none is given
    pub fn build_parlays(
        &self,
        props: &[PlayerProp],
        sport: Sport,
        tier: Option<Tier>,
    ) -> Vec<Parlay> {
        let tiers: Vec<Tier> = match tier {
            Some(t) => vec![t],
            None => Tier::ALL.to_vec(),
        };

        let mut all = Vec::new();
        for tier in tiers {
            all.extend(self.build_tier_parlays(props, sport, tier));
        }
        all
    }

    fn build_tier_parlays(&self, props: &[PlayerProp], sport: Sport, tier: Tier) -> Vec<Parlay> {
        let requirements = tier.requirements();

        let eligible: Vec<&PlayerProp> = props
            .iter()
            .filter(|p| p.confidence_score >= requirements.min_confidence)
            .collect();

        if eligible.len() < self.config.min_legs {
            tracing::warn!(
                %tier,
                %sport,
                eligible = eligible.len(),
                "Not enough eligible props for tier"
            );
            return Vec::new();
        }

        let max_parlays = if tier == Tier::Goat { 3 } else { 5 };
        let mut parlays: Vec<Parlay> = Vec::new();

        for _ in 0..max_parlays {
            if let Some(parlay) = self.generate_single(&eligible, sport, tier, &requirements) {
                if !self.is_duplicate(&parlay, &parlays) {
                    parlays.push(parlay);
                }
            }
        }

        tracing::info!(%tier, %sport, count = parlays.len(), "Built tier parlays");
        parlays
    }

    /// One parlay under bounded randomized retries; None on exhaustion
    fn generate_single(
        &self,
        eligible: &[&PlayerProp],
        sport: Sport,
        tier: Tier,
        requirements: &TierRequirements,
    ) -> Option<Parlay> {
        let mut rng = rand::thread_rng();

        for _ in 0..self.config.max_attempts {
            let upper = requirements.max_legs.min(eligible.len());
            if upper < self.config.min_legs {
                return None;
            }
            let num_legs = rng.gen_range(self.config.min_legs..=upper);

            let selected = self.select_props(eligible, num_legs, requirements, &mut rng);
            if selected.len() < self.config.min_legs {
                continue;
            }

            let legs: Vec<ParlayLeg> = selected.iter().map(|p| make_leg(p, tier)).collect();

            let overall_confidence = legs.iter().map(|l| l.confidence).sum::<Decimal>()
                / Decimal::from(legs.len() as u64);

            let individual_odds: Vec<i32> = legs.iter().map(|l| l.odds).collect();
            let total_odds = match calculate_parlay_odds(&individual_odds) {
                Ok(odds) => odds,
                Err(e) => {
                    tracing::debug!(error = %e, "Discarding attempt with invalid leg odds");
                    continue;
                }
            };
            let expected_payout = match american_to_decimal(total_odds) {
                Ok(d) => d,
                Err(_) => continue,
            };

            if overall_confidence >= requirements.min_confidence
                && expected_payout >= requirements.target_payout * self.config.payout_tolerance
            {
                let game_date = legs
                    .first()
                    .map(|l| l.prop.game_date)
                    .unwrap_or_else(|| Utc::now().date_naive());

                return Some(Parlay {
                    id: Uuid::new_v4(),
                    tier,
                    sport,
                    description: describe(legs.len(), tier),
                    legs,
                    total_odds,
                    expected_payout,
                    overall_confidence,
                    created_at: Utc::now(),
                    game_date,
                });
            }
        }

        tracing::warn!(
            %tier,
            attempts = self.config.max_attempts,
            "Exhausted attempts without a valid parlay"
        );
        None
    }

    /// Walk props by confidence, skipping duplicate players and teams
    /// already used twice
    fn select_props<'a>(
        &self,
        eligible: &[&'a PlayerProp],
        num_legs: usize,
        requirements: &TierRequirements,
        rng: &mut impl Rng,
    ) -> Vec<&'a PlayerProp> {
        let mut sorted: Vec<&PlayerProp> = eligible.to_vec();
        sorted.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));

        // Shuffle the top half for variety on the aggressive tiers
        if !requirements.conservative_bias {
            let top_half = sorted.len() / 2;
            sorted[..top_half].shuffle(rng);
        }

        let mut selected: Vec<&PlayerProp> = Vec::with_capacity(num_legs);
        let mut used_players: HashSet<&str> = HashSet::new();
        let mut used_teams: Vec<&str> = Vec::new();

        for prop in sorted {
            if selected.len() >= num_legs {
                break;
            }
            if used_players.contains(prop.player_name.as_str()) {
                continue;
            }
            if used_teams.iter().filter(|t| **t == prop.team).count() >= 2 {
                continue;
            }
            used_players.insert(&prop.player_name);
            used_teams.push(&prop.team);
            selected.push(prop);
        }

        selected
    }

    /// Duplicate when the player overlap with any accepted parlay exceeds
    /// the configured fraction
    fn is_duplicate(&self, candidate: &Parlay, accepted: &[Parlay]) -> bool {
        let players: HashSet<&str> = candidate.players().into_iter().collect();
        if players.is_empty() {
            return false;
        }

        for parlay in accepted {
            let existing: HashSet<&str> = parlay.players().into_iter().collect();
            let overlap = players.intersection(&existing).count();
            let ratio = Decimal::from(overlap as u64) / Decimal::from(players.len() as u64);
            if ratio > self.config.duplicate_overlap {
                return true;
            }
        }
        false
    }
}

/// Pick the leg's side and odds
///
/// GOAT legs go over only on near-certain confidence; other tiers follow
/// the hit rate.
fn make_leg(prop: &PlayerProp, tier: Tier) -> ParlayLeg {
    let selection = if tier == Tier::Goat {
        if prop.confidence_score > dec!(97.5) {
            Selection::Over
        } else {
            Selection::Under
        }
    } else if prop.hit_rate > dec!(0.55) {
        Selection::Over
    } else {
        Selection::Under
    };

    let odds = match selection {
        Selection::Over => prop.over_odds,
        Selection::Under => prop.under_odds,
    };

    ParlayLeg {
        prop: prop.clone(),
        selection,
        odds,
        confidence: prop.confidence_score,
    }
}

fn describe(legs: usize, tier: Tier) -> String {
    match tier {
        Tier::Goat => format!("🐐 GOAT Tier: {}-Leg Lock Parlay", legs),
        Tier::Premium => format!("💎 Premium: High-Confidence {}-Legger", legs),
        Tier::Free => format!("🎯 Free Play: Solid {}-Leg Value Bet", legs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropType;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn prop(name: &str, team: &str, confidence: Decimal, hit_rate: Decimal) -> PlayerProp {
        PlayerProp {
            player_name: name.to_string(),
            team: team.to_string(),
            opponent: "OPP".to_string(),
            prop_type: PropType::Hits,
            line: dec!(1.5),
            over_odds: 160,
            under_odds: -190,
            game_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            position: "OF".to_string(),
            source: "test".to_string(),
            confidence_score: confidence,
            hit_rate,
            recent_form: None,
        }
    }

    /// Pool large enough that every tier can fill its leg range
    fn wide_pool() -> Vec<PlayerProp> {
        let teams = ["NYY", "BOS", "LAD", "SD", "ATL", "NYM", "HOU", "SEA"];
        (0..16)
            .map(|i| {
                prop(
                    &format!("Player {}", i),
                    teams[i % teams.len()],
                    dec!(70) + Decimal::from(i as u64),
                    dec!(0.7),
                )
            })
            .collect()
    }

    #[test]
    fn test_insufficient_eligible_props() {
        let builder = ParlayBuilder::default();
        let props: Vec<PlayerProp> = (0..4)
            .map(|i| prop(&format!("P{}", i), "NYY", dec!(90), dec!(0.8)))
            .collect();
        let parlays = builder.build_parlays(&props, Sport::Mlb, Some(Tier::Free));
        assert!(parlays.is_empty());
    }

    #[test]
    fn test_low_confidence_props_filtered() {
        let builder = ParlayBuilder::default();
        // Plenty of props, none meeting the GOAT threshold of 65
        let props: Vec<PlayerProp> = (0..10)
            .map(|i| prop(&format!("P{}", i), "NYY", dec!(50), dec!(0.7)))
            .collect();
        let parlays = builder.build_parlays(&props, Sport::Mlb, Some(Tier::Goat));
        assert!(parlays.is_empty());
    }

    #[test]
    fn test_no_duplicate_players_or_team_overload() {
        let builder = ParlayBuilder::default();
        let parlays = builder.build_parlays(&wide_pool(), Sport::Mlb, None);

        for parlay in &parlays {
            let players: Vec<&str> = parlay.players();
            let unique: HashSet<&str> = players.iter().copied().collect();
            assert_eq!(players.len(), unique.len(), "duplicate player in parlay");

            let mut team_counts: HashMap<&str, usize> = HashMap::new();
            for leg in &parlay.legs {
                *team_counts.entry(leg.prop.team.as_str()).or_insert(0) += 1;
            }
            assert!(
                team_counts.values().all(|&c| c <= 2),
                "more than two legs share a team"
            );
        }
    }

    #[test]
    fn test_accepted_parlays_meet_tier_thresholds() {
        let builder = ParlayBuilder::default();
        for tier in Tier::ALL {
            let requirements = tier.requirements();
            for parlay in builder.build_parlays(&wide_pool(), Sport::Mlb, Some(tier)) {
                assert!(parlay.overall_confidence >= requirements.min_confidence);
                assert!(parlay.expected_payout >= requirements.target_payout * dec!(0.8));
                assert!(parlay.legs.len() >= 5);
                assert!(parlay.legs.len() <= requirements.max_legs);
                assert_eq!(parlay.tier, tier);
            }
        }
    }

    #[test]
    fn test_leg_selection_follows_hit_rate() {
        let over = make_leg(&prop("A", "NYY", dec!(80), dec!(0.7)), Tier::Free);
        assert_eq!(over.selection, Selection::Over);
        assert_eq!(over.odds, 160);

        let under = make_leg(&prop("B", "NYY", dec!(80), dec!(0.4)), Tier::Premium);
        assert_eq!(under.selection, Selection::Under);
        assert_eq!(under.odds, -190);
    }

    #[test]
    fn test_goat_leg_selection_uses_confidence() {
        let over = make_leg(&prop("A", "NYY", dec!(98), dec!(0.4)), Tier::Goat);
        assert_eq!(over.selection, Selection::Over);

        let under = make_leg(&prop("B", "NYY", dec!(95), dec!(0.9)), Tier::Goat);
        assert_eq!(under.selection, Selection::Under);
    }

    #[test]
    fn test_duplicate_suppression() {
        let builder = ParlayBuilder::default();
        let parlays = builder.build_parlays(&wide_pool(), Sport::Mlb, Some(Tier::Free));

        for (i, a) in parlays.iter().enumerate() {
            for b in parlays.iter().skip(i + 1) {
                let pa: HashSet<&str> = a.players().into_iter().collect();
                let pb: HashSet<&str> = b.players().into_iter().collect();
                let overlap = pa.intersection(&pb).count();
                let ratio = overlap as f64 / pa.len() as f64;
                assert!(ratio <= 0.6, "near-duplicate parlays returned");
            }
        }
    }

    #[test]
    fn test_select_props_respects_constraints() {
        let builder = ParlayBuilder::default();
        let mut rng = rand::thread_rng();
        // Three props per team; selection may use at most two of each
        let props: Vec<PlayerProp> = (0..9)
            .map(|i| {
                prop(
                    &format!("P{}", i),
                    ["NYY", "BOS", "LAD"][i / 3],
                    dec!(80),
                    dec!(0.7),
                )
            })
            .collect();
        let refs: Vec<&PlayerProp> = props.iter().collect();
        let selected =
            builder.select_props(&refs, 6, &Tier::Free.requirements(), &mut rng);
        assert_eq!(selected.len(), 6);
    }
}
