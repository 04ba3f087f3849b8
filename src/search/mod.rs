//! Parlay combination search
//!
//! Brute-force enumeration of prop subsets seeking combined decimal odds
//! closest to a target. The pool is capped at 20 candidates and leg counts
//! are small, so exhaustive O(C(20, k)) enumeration is acceptable; there is
//! no pruning and no optimality claim beyond the searched space.

use crate::odds::{
    american_to_decimal, calculate_parlay_odds, calculate_parlay_probability, calculate_payout,
    calculate_required_odds, parlay_confidence, OddsError,
};
use crate::props::{ParlayLeg, PayoutTier, PlayerProp, RiskLevel, Selection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Candidate pool cap bounding the combinatorial blow-up
const MAX_POOL: usize = 20;

/// Accept a combination once it lands within this fraction of the target
const TARGET_TOLERANCE: Decimal = dec!(0.1);

/// A prop with its estimated odds, ready for combination search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProp {
    pub prop: PlayerProp,
    pub estimated_odds: i32,
}

/// A parlay assembled toward a dollar payout target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetParlay {
    pub tier: PayoutTier,
    pub target_payout: Decimal,
    pub legs: Vec<ParlayLeg>,
    pub total_odds: i32,
    pub estimated_payout: Decimal,
    pub confidence_score: Decimal,
    pub hit_probability: Decimal,
    pub risk_level: RiskLevel,
}

/// Find the subset of 2..=max_legs props whose combined decimal odds is
/// closest to the target
///
/// Sorts by confidence descending, restricts to the top 20 candidates, and
/// stops early once a subset lands within 10% of the target decimal. Returns
/// an empty vec when fewer than two candidates are available.
pub fn find_parlay_combination(
    target_odds: i32,
    pool: &[ScoredProp],
    max_legs: usize,
) -> Result<Vec<ScoredProp>, OddsError> {
    let target_decimal = american_to_decimal(target_odds)?;

    let mut sorted: Vec<&ScoredProp> = pool.iter().collect();
    sorted.sort_by(|a, b| b.prop.confidence_score.cmp(&a.prop.confidence_score));
    sorted.truncate(MAX_POOL);

    if sorted.len() < 2 {
        return Ok(Vec::new());
    }

    let decimals: Vec<Decimal> = sorted
        .iter()
        .map(|c| american_to_decimal(c.estimated_odds))
        .collect::<Result<_, _>>()?;

    let tolerance = target_decimal * TARGET_TOLERANCE;
    let mut best: Vec<usize> = Vec::new();
    let mut best_diff: Option<Decimal> = None;

    for num_legs in 2..=max_legs.min(sorted.len()) {
        let mut stop = false;
        for_each_combination(sorted.len(), num_legs, &mut |combo| {
            let combined: Decimal = combo.iter().map(|&i| decimals[i]).product();
            let diff = (combined - target_decimal).abs();
            if best_diff.map_or(true, |b| diff < b) {
                best_diff = Some(diff);
                best = combo.to_vec();
                if diff < tolerance {
                    stop = true;
                }
            }
            stop
        });
        if stop {
            break;
        }
    }

    Ok(best.into_iter().map(|i| sorted[i].clone()).collect())
}

/// Assemble a parlay toward a dollar payout tier at the given stake
///
/// Required odds are derived from the tier's target payout, the combination
/// search does the rest. All legs select the over at their estimated odds.
/// None when no combination of at least two legs exists.
pub fn plan_target_parlay(
    tier: PayoutTier,
    pool: &[ScoredProp],
    max_legs: usize,
    stake: Decimal,
) -> Result<Option<TargetParlay>, OddsError> {
    let target_payout = tier.target_payout();
    let required_odds = calculate_required_odds(target_payout, stake)?;

    tracing::debug!(
        %tier,
        %target_payout,
        required_odds,
        pool = pool.len(),
        "Planning target parlay"
    );

    let selected = find_parlay_combination(required_odds, pool, max_legs)?;
    if selected.len() < 2 {
        return Ok(None);
    }

    let legs: Vec<ParlayLeg> = selected
        .iter()
        .map(|c| ParlayLeg {
            prop: c.prop.clone(),
            selection: Selection::Over,
            odds: c.estimated_odds,
            confidence: c.prop.confidence_score,
        })
        .collect();

    let individual_odds: Vec<i32> = legs.iter().map(|l| l.odds).collect();
    let total_odds = calculate_parlay_odds(&individual_odds)?;
    let estimated_payout = calculate_payout(total_odds, stake)?;

    let hit_rates: Vec<Decimal> = selected.iter().map(|c| c.prop.hit_rate).collect();
    let confidence_score = parlay_confidence(&hit_rates, None);
    let hit_probability = calculate_parlay_probability(&hit_rates);

    Ok(Some(TargetParlay {
        tier,
        target_payout,
        legs,
        total_odds,
        estimated_payout,
        confidence_score,
        hit_probability,
        risk_level: RiskLevel::from_confidence(confidence_score),
    }))
}

/// Visit every k-combination of 0..n in lexicographic order
///
/// The visitor returns true to stop enumeration early.
fn for_each_combination(n: usize, k: usize, visit: &mut impl FnMut(&[usize]) -> bool) {
    if k == 0 || k > n {
        return;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        if visit(&indices) {
            return;
        }
        // Advance to the next combination
        let mut i = k;
        loop {
            if i == 0 {
                return;
            }
            i -= 1;
            if indices[i] != n - k + i {
                break;
            }
            if i == 0 {
                return;
            }
        }
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropType;
    use chrono::NaiveDate;

    fn prop(name: &str, confidence: Decimal, hit_rate: Decimal) -> PlayerProp {
        PlayerProp {
            player_name: name.to_string(),
            team: "NYY".to_string(),
            opponent: "BOS".to_string(),
            prop_type: PropType::Hits,
            line: dec!(0.5),
            over_odds: 180,
            under_odds: -220,
            game_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            position: "OF".to_string(),
            source: "test".to_string(),
            confidence_score: confidence,
            hit_rate,
            recent_form: None,
        }
    }

    fn candidate(name: &str, odds: i32, confidence: Decimal) -> ScoredProp {
        ScoredProp {
            prop: prop(name, confidence, dec!(0.8)),
            estimated_odds: odds,
        }
    }

    #[test]
    fn test_combination_enumeration_counts() {
        let mut count = 0;
        for_each_combination(5, 3, &mut |_| {
            count += 1;
            false
        });
        assert_eq!(count, 10); // C(5,3)
    }

    #[test]
    fn test_combination_enumeration_early_stop() {
        let mut count = 0;
        for_each_combination(6, 2, &mut |_| {
            count += 1;
            count == 3
        });
        assert_eq!(count, 3);
    }

    #[test]
    fn test_combination_degenerate_sizes() {
        let mut visited = false;
        for_each_combination(2, 3, &mut |_| {
            visited = true;
            false
        });
        assert!(!visited);
        for_each_combination(3, 0, &mut |_| {
            visited = true;
            false
        });
        assert!(!visited);
    }

    #[test]
    fn test_find_combination_within_tolerance_or_exhausted() {
        // Pool of 10, target +500 (6.0 decimal), max 4 legs
        let pool: Vec<ScoredProp> = (0..10)
            .map(|i| {
                candidate(
                    &format!("Player {}", i),
                    100 + i * 20,
                    Decimal::from(90 - i),
                )
            })
            .collect();

        let selected = find_parlay_combination(500, &pool, 4).unwrap();
        assert!(selected.len() >= 2);

        let odds: Vec<i32> = selected.iter().map(|c| c.estimated_odds).collect();
        let combined = calculate_parlay_odds(&odds).unwrap();
        let combined_decimal = american_to_decimal(combined).unwrap();
        let target_decimal = american_to_decimal(500).unwrap();

        // Documented property: within the 10% decimal tolerance, or the best
        // over the whole searched space
        let diff = (combined_decimal - target_decimal).abs();
        assert!(
            diff < target_decimal * dec!(0.1),
            "expected within tolerance, got {} vs {}",
            combined_decimal,
            target_decimal
        );
    }

    #[test]
    fn test_find_combination_small_pool() {
        let pool = vec![candidate("A", 150, dec!(80))];
        let selected = find_parlay_combination(500, &pool, 4).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_find_combination_respects_max_legs() {
        let pool: Vec<ScoredProp> = (0..8)
            .map(|i| candidate(&format!("P{}", i), 110, Decimal::from(80 - i)))
            .collect();
        // Huge target forces the largest allowed subset
        let selected = find_parlay_combination(2000, &pool, 3).unwrap();
        assert!(selected.len() <= 3);
    }

    #[test]
    fn test_find_combination_prefers_high_confidence_pool() {
        // 25 candidates; only the top 20 by confidence are searched
        let pool: Vec<ScoredProp> = (0..25)
            .map(|i| candidate(&format!("P{}", i), 150, Decimal::from(100 - i)))
            .collect();
        let selected = find_parlay_combination(300, &pool, 2).unwrap();
        for c in &selected {
            assert!(c.prop.confidence_score >= Decimal::from(100 - 19));
        }
    }

    #[test]
    fn test_plan_target_parlay() {
        let pool: Vec<ScoredProp> = (0..10)
            .map(|i| candidate(&format!("Player {}", i), 200 + i * 10, Decimal::from(85 - i)))
            .collect();

        let parlay = plan_target_parlay(PayoutTier::D100, &pool, 6, dec!(10))
            .unwrap()
            .expect("combination should exist");

        assert_eq!(parlay.tier, PayoutTier::D100);
        assert!(parlay.legs.len() >= 2);
        assert!(parlay.legs.iter().all(|l| l.selection == Selection::Over));
        assert!(parlay.hit_probability > Decimal::ZERO);
        assert!(parlay.estimated_payout > Decimal::ZERO);
    }

    #[test]
    fn test_plan_target_parlay_empty_pool() {
        let result = plan_target_parlay(PayoutTier::D500, &[], 6, dec!(10)).unwrap();
        assert!(result.is_none());
    }
}
