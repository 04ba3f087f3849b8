//! Confidence scoring
//!
//! Blends a historical hit rate with a recency-weighted recent-form signal
//! into a 0-100 confidence score. This is a heuristic, not a statistically
//! validated model: there is no confidence interval and no sample-size
//! discounting, so a 1-for-1 player scores like a 90-for-90 player.

use crate::history::PropHistory;
use crate::props::PropType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Scoring windows
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    /// Trailing window for the historical hit rate, in days
    pub hit_rate_window_days: i64,
    /// Shorter window used for the prop's own hit-rate field
    pub prop_hit_rate_days: i64,
    /// Number of recent games feeding the recent-form signal
    pub recent_form_games: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            hit_rate_window_days: 90,
            prop_hit_rate_days: 30,
            recent_form_games: 5,
        }
    }
}

/// Scores props against an injected historical repository
pub struct ConfidenceScorer {
    history: Arc<dyn PropHistory>,
    config: ScoringConfig,
}

impl ConfidenceScorer {
    pub fn new(history: Arc<dyn PropHistory>) -> Self {
        Self::with_config(history, ScoringConfig::default())
    }

    pub fn with_config(history: Arc<dyn PropHistory>, config: ScoringConfig) -> Self {
        Self { history, config }
    }

    /// Confidence score in [0, 100] for a player and prop type
    ///
    /// base = historical hit rate * 100, adjusted by
    /// (recent_form_weight - 0.5) * 40 and clamped.
    pub fn score(&self, player: &str, prop_type: PropType, as_of: NaiveDate) -> Decimal {
        let hit_rate = self.lookup_hit_rate(
            player,
            prop_type,
            as_of,
            self.config.hit_rate_window_days,
        );
        let base = hit_rate * dec!(100);

        let recent_adjustment = (self.recent_form_weight(player, prop_type) - dec!(0.5)) * dec!(40);

        (base + recent_adjustment).clamp(Decimal::ZERO, dec!(100))
    }

    /// Hit rate for the prop's own field, over the shorter window
    pub fn hit_rate(&self, player: &str, prop_type: PropType, as_of: NaiveDate) -> Decimal {
        self.lookup_hit_rate(player, prop_type, as_of, self.config.prop_hit_rate_days)
    }

    /// Raw recent outcome sequence, newest first
    pub fn recent_form(&self, player: &str, prop_type: PropType) -> Vec<bool> {
        self.history
            .recent_outcomes(player, prop_type, self.config.recent_form_games)
    }

    /// Linearly time-weighted average of the last N outcomes
    ///
    /// The most recent game gets weight N, the oldest weight 1. No outcomes
    /// yields a neutral 0.5.
    pub fn recent_form_weight(&self, player: &str, prop_type: PropType) -> Decimal {
        let outcomes = self.recent_form(player, prop_type);
        weighted_form(&outcomes, self.config.recent_form_games)
    }

    /// Player rate over the window, falling back to the prop type aggregate,
    /// then to a neutral 0.5
    fn lookup_hit_rate(
        &self,
        player: &str,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Decimal {
        self.history
            .player_hit_rate(player, prop_type, as_of, days_back)
            .or_else(|| self.history.prop_type_hit_rate(prop_type, as_of, days_back))
            .unwrap_or(dec!(0.5))
    }
}

/// Weighted average over outcomes (newest first) with weights N..1
fn weighted_form(outcomes: &[bool], games_back: usize) -> Decimal {
    if outcomes.is_empty() {
        return dec!(0.5);
    }

    let mut weighted_sum = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;
    for (i, &hit) in outcomes.iter().take(games_back).enumerate() {
        let weight = Decimal::from((games_back - i) as u64);
        if hit {
            weighted_sum += weight;
        }
        total_weight += weight;
    }

    if total_weight > Decimal::ZERO {
        weighted_sum / total_weight
    } else {
        dec!(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoricalProp;
    use std::collections::HashMap;

    /// In-memory test double keyed by (player, prop type)
    struct MemoryHistory {
        player_rates: HashMap<(String, PropType), Decimal>,
        prop_rates: HashMap<PropType, Decimal>,
        outcomes: HashMap<(String, PropType), Vec<bool>>,
    }

    impl MemoryHistory {
        fn new() -> Self {
            Self {
                player_rates: HashMap::new(),
                prop_rates: HashMap::new(),
                outcomes: HashMap::new(),
            }
        }

        fn with_player(mut self, player: &str, prop: PropType, rate: Decimal) -> Self {
            self.player_rates.insert((player.to_string(), prop), rate);
            self
        }

        fn with_prop_aggregate(mut self, prop: PropType, rate: Decimal) -> Self {
            self.prop_rates.insert(prop, rate);
            self
        }

        fn with_outcomes(mut self, player: &str, prop: PropType, outcomes: Vec<bool>) -> Self {
            self.outcomes.insert((player.to_string(), prop), outcomes);
            self
        }
    }

    impl PropHistory for MemoryHistory {
        fn player_hit_rate(
            &self,
            player: &str,
            prop_type: PropType,
            _as_of: NaiveDate,
            _days_back: i64,
        ) -> Option<Decimal> {
            self.player_rates
                .get(&(player.to_string(), prop_type))
                .copied()
        }

        fn prop_type_hit_rate(
            &self,
            prop_type: PropType,
            _as_of: NaiveDate,
            _days_back: i64,
        ) -> Option<Decimal> {
            self.prop_rates.get(&prop_type).copied()
        }

        fn recent_outcomes(&self, player: &str, prop_type: PropType, limit: usize) -> Vec<bool> {
            self.outcomes
                .get(&(player.to_string(), prop_type))
                .map(|o| o.iter().copied().take(limit).collect())
                .unwrap_or_default()
        }
    }

    fn as_of() -> NaiveDate {
        "2024-06-01".parse().unwrap()
    }

    fn scorer(history: MemoryHistory) -> ConfidenceScorer {
        ConfidenceScorer::new(Arc::new(history))
    }

    #[test]
    fn test_score_from_player_rate() {
        // 0.75 hit rate, neutral recent form: 75 + 0
        let s = scorer(
            MemoryHistory::new().with_player("Aaron Judge", PropType::HomeRuns, dec!(0.75)),
        );
        assert_eq!(s.score("Aaron Judge", PropType::HomeRuns, as_of()), dec!(75));
    }

    #[test]
    fn test_score_recent_form_boost() {
        // All five recent games hit: weight 1.0, adjustment +20
        let s = scorer(
            MemoryHistory::new()
                .with_player("Aaron Judge", PropType::HomeRuns, dec!(0.6))
                .with_outcomes("Aaron Judge", PropType::HomeRuns, vec![true; 5]),
        );
        assert_eq!(s.score("Aaron Judge", PropType::HomeRuns, as_of()), dec!(80));
    }

    #[test]
    fn test_score_recent_form_drag() {
        // All misses: weight 0.0, adjustment -20
        let s = scorer(
            MemoryHistory::new()
                .with_player("Aaron Judge", PropType::HomeRuns, dec!(0.6))
                .with_outcomes("Aaron Judge", PropType::HomeRuns, vec![false; 5]),
        );
        assert_eq!(s.score("Aaron Judge", PropType::HomeRuns, as_of()), dec!(40));
    }

    #[test]
    fn test_fallback_to_prop_aggregate() {
        let s = scorer(MemoryHistory::new().with_prop_aggregate(PropType::Hits, dec!(0.65)));
        assert_eq!(s.score("Unknown Player", PropType::Hits, as_of()), dec!(65));
    }

    #[test]
    fn test_fallback_to_neutral() {
        let s = scorer(MemoryHistory::new());
        // 0.5 * 100 with neutral form
        assert_eq!(s.score("Unknown Player", PropType::Hits, as_of()), dec!(50));
    }

    #[test]
    fn test_score_always_clamped() {
        for rate in [dec!(0), dec!(0.25), dec!(0.5), dec!(0.75), dec!(1)] {
            for outcomes in [vec![true; 5], vec![false; 5], vec![]] {
                let s = scorer(
                    MemoryHistory::new()
                        .with_player("P", PropType::Hits, rate)
                        .with_outcomes("P", PropType::Hits, outcomes),
                );
                let score = s.score("P", PropType::Hits, as_of());
                assert!(score >= Decimal::ZERO && score <= dec!(100));
            }
        }
    }

    #[test]
    fn test_recent_form_weighting_favors_newest() {
        // Newest-first [true, false, false, false, false] with weights 5..1:
        // 5/15 = 0.333..; a hot streak in old games weighs less
        let s = scorer(
            MemoryHistory::new().with_outcomes(
                "P",
                PropType::Hits,
                vec![true, false, false, false, false],
            ),
        );
        let w = s.recent_form_weight("P", PropType::Hits);
        assert!((w - dec!(0.3333)).abs() < dec!(0.001));

        let s = scorer(
            MemoryHistory::new().with_outcomes(
                "P",
                PropType::Hits,
                vec![false, false, false, false, true],
            ),
        );
        let w = s.recent_form_weight("P", PropType::Hits);
        assert!((w - dec!(0.0667)).abs() < dec!(0.001));
    }

    #[test]
    fn test_weighted_form_partial_history() {
        // Three outcomes with games_back 5: weights 5, 4, 3
        let w = weighted_form(&[true, true, false], 5);
        assert_eq!(w, dec!(9) / dec!(12));
    }

    #[test]
    fn test_scorer_works_with_csv_history() {
        // The trait seam accepts the real store too
        let history = crate::history::CsvHistory::from_records(vec![HistoricalProp {
            player_name: "Aaron Judge".to_string(),
            date: "2024-05-20".parse().unwrap(),
            prop_type: PropType::HomeRuns,
            line: dec!(0.5),
            actual_result: dec!(1),
            hit: true,
            odds: 150,
            sport: crate::props::Sport::Mlb,
        }]);
        let s = ConfidenceScorer::new(Arc::new(history));
        // 1.0 hit rate, one recent hit with weight 5/15
        let score = s.score("Aaron Judge", PropType::HomeRuns, as_of());
        assert_eq!(score, dec!(100));
    }
}
