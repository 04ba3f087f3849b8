//! Prop odds estimation
//!
//! Table lookup plus linear adjustment mapping (prop type, line, hit rate)
//! to an estimated American odds value.

use crate::props::PropType;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Odds used when the prop type has no base table
const DEFAULT_ODDS: i32 = 200;

/// Floor and ceiling for estimated odds
const MIN_ODDS: i32 = -500;
const MAX_ODDS: i32 = 2000;

/// Base American odds keyed by tabulated line, per prop type
fn base_odds_table(prop_type: PropType) -> Option<&'static [(Decimal, i32)]> {
    const HITS: &[(Decimal, i32)] = &[(dec!(0.5), 180), (dec!(1.5), 240), (dec!(2.5), 400)];
    const HOME_RUNS: &[(Decimal, i32)] = &[(dec!(0.5), 240), (dec!(1.5), 800)];
    const RBIS: &[(Decimal, i32)] = &[(dec!(0.5), 160), (dec!(1.5), 300), (dec!(2.5), 500)];
    const STRIKEOUTS: &[(Decimal, i32)] = &[(dec!(0.5), 140), (dec!(5.5), 180), (dec!(7.5), 300)];
    const PASSING_YARDS: &[(Decimal, i32)] =
        &[(dec!(249.5), 110), (dec!(299.5), 160), (dec!(349.5), 250)];
    const RUSHING_YARDS: &[(Decimal, i32)] =
        &[(dec!(49.5), 120), (dec!(79.5), 200), (dec!(99.5), 300)];
    const RECEIVING_YARDS: &[(Decimal, i32)] =
        &[(dec!(49.5), 110), (dec!(69.5), 160), (dec!(89.5), 250)];
    const RECEPTIONS: &[(Decimal, i32)] = &[(dec!(3.5), 120), (dec!(5.5), 180), (dec!(7.5), 300)];
    match prop_type {
        PropType::Hits => Some(HITS),
        PropType::HomeRuns => Some(HOME_RUNS),
        PropType::Rbis => Some(RBIS),
        PropType::Strikeouts | PropType::BatterStrikeouts | PropType::PitcherStrikeouts => {
            // 0.5 is a batter line, 5.5/7.5 are pitcher lines
            Some(STRIKEOUTS)
        }
        PropType::PassingYards => Some(PASSING_YARDS),
        PropType::RushingYards => Some(RUSHING_YARDS),
        PropType::ReceivingYards => Some(RECEIVING_YARDS),
        PropType::Receptions => Some(RECEPTIONS),
        _ => None,
    }
}

/// Estimate American odds for a player prop
///
/// Snaps to the nearest tabulated line when the exact line is absent and
/// adjusts linearly: +50 per point above the snap point, -30 per point below.
/// Hit rates above 0.8 tighten the odds, below 0.6 loosen them. The result
/// is clamped to [-500, +2000].
pub fn estimate_prop_odds(prop_type: PropType, line: Decimal, hit_rate: Decimal) -> i32 {
    let mut odds = match base_odds_table(prop_type) {
        Some(table) => {
            if let Some(&(_, base)) = table.iter().find(|(l, _)| *l == line) {
                base
            } else {
                // Snap to the nearest tabulated line, first entry wins ties
                let &(closest, base) = table
                    .iter()
                    .min_by_key(|(l, _)| (line - l).abs())
                    .expect("base odds tables are non-empty");

                let diff = line - closest;
                if diff > Decimal::ZERO {
                    base + trunc_i32(diff * dec!(50))
                } else {
                    base - trunc_i32(diff.abs() * dec!(30))
                }
            }
        }
        None => DEFAULT_ODDS,
    };

    if hit_rate > dec!(0.8) {
        odds -= trunc_i32((hit_rate - dec!(0.8)) * dec!(500));
    } else if hit_rate < dec!(0.6) {
        odds += trunc_i32((dec!(0.6) - hit_rate) * dec!(800));
    }

    odds.clamp(MIN_ODDS, MAX_ODDS)
}

fn trunc_i32(value: Decimal) -> i32 {
    value.trunc().to_i32().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line_neutral_hit_rate() {
        // 0.7 hit rate triggers neither adjustment
        assert_eq!(
            estimate_prop_odds(PropType::Hits, dec!(0.5), dec!(0.7)),
            180
        );
        assert_eq!(
            estimate_prop_odds(PropType::HomeRuns, dec!(1.5), dec!(0.7)),
            800
        );
    }

    #[test]
    fn test_high_hit_rate_reduces_odds() {
        // Table base for home_runs 0.5 is +240; 0.95 hit rate subtracts
        // trunc(0.15 * 500) = 75
        let odds = estimate_prop_odds(PropType::HomeRuns, dec!(0.5), dec!(0.95));
        assert_eq!(odds, 165);
        assert!((MIN_ODDS..=MAX_ODDS).contains(&odds));
    }

    #[test]
    fn test_low_hit_rate_increases_odds() {
        // trunc((0.6 - 0.4) * 800) = 160 on top of +180
        let odds = estimate_prop_odds(PropType::Hits, dec!(0.5), dec!(0.4));
        assert_eq!(odds, 340);
    }

    #[test]
    fn test_line_snap_above() {
        // 3.5 hits snaps to 2.5 (+400), +trunc(1.0 * 50)
        let odds = estimate_prop_odds(PropType::Hits, dec!(3.5), dec!(0.7));
        assert_eq!(odds, 450);
    }

    #[test]
    fn test_line_snap_below() {
        // 229.5 passing yards snaps to 249.5 (+110), minus trunc(20 * 30)
        let odds = estimate_prop_odds(PropType::PassingYards, dec!(229.5), dec!(0.7));
        assert_eq!(odds, -490);
    }

    #[test]
    fn test_clamp_floor() {
        // 199.5 snaps to 249.5 (+110), minus trunc(50 * 30) = 1500, floored
        let odds = estimate_prop_odds(PropType::PassingYards, dec!(199.5), dec!(0.7));
        assert_eq!(odds, MIN_ODDS);
    }

    #[test]
    fn test_unknown_prop_type_default() {
        assert_eq!(
            estimate_prop_odds(PropType::Points, dec!(19.5), dec!(0.7)),
            DEFAULT_ODDS
        );
    }

    #[test]
    fn test_clamped_to_range() {
        for hr in [dec!(0.0), dec!(0.3), dec!(0.6), dec!(0.9), dec!(1.0)] {
            for line in [dec!(0.5), dec!(5.5), dec!(12.5), dec!(400.5)] {
                let odds = estimate_prop_odds(PropType::PitcherStrikeouts, line, hr);
                assert!((MIN_ODDS..=MAX_ODDS).contains(&odds));
            }
        }
    }

    #[test]
    fn test_strikeout_variants_share_table() {
        let a = estimate_prop_odds(PropType::Strikeouts, dec!(5.5), dec!(0.7));
        let b = estimate_prop_odds(PropType::PitcherStrikeouts, dec!(5.5), dec!(0.7));
        assert_eq!(a, b);
        assert_eq!(a, 180);
    }
}
