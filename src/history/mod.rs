//! Historical prop data
//!
//! Read-only repository of past prop results used to compute hit rates and
//! recent form. The scoring logic depends only on the [`PropHistory`] trait
//! so it is testable without file I/O.

mod csv_store;

pub use csv_store::CsvHistory;

use crate::props::{PropType, Sport};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One historical prop result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalProp {
    pub player_name: String,
    pub date: NaiveDate,
    pub prop_type: PropType,
    pub line: Decimal,
    pub actual_result: Decimal,
    pub hit: bool,
    pub odds: i32,
    pub sport: Sport,
}

/// Read-only access to historical prop outcomes
pub trait PropHistory: Send + Sync {
    /// Hit rate for a player and prop type over the trailing window,
    /// or None when the player has no qualifying rows
    fn player_hit_rate(
        &self,
        player: &str,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Option<Decimal>;

    /// Aggregate hit rate across all players for a prop type,
    /// used as the fallback when a player has no history
    fn prop_type_hit_rate(
        &self,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Option<Decimal>;

    /// Most recent hit/miss outcomes for a player and prop type,
    /// newest first, at most `limit` entries
    fn recent_outcomes(&self, player: &str, prop_type: PropType, limit: usize) -> Vec<bool>;
}

fn hit_rate_of(hits: usize, total: usize) -> Option<Decimal> {
    if total == 0 {
        None
    } else {
        Some(Decimal::from(hits as u64) / Decimal::from(total as u64))
    }
}

/// Shared filtering logic over an in-memory record slice
pub(crate) struct RecordView<'a>(pub &'a [HistoricalProp]);

impl RecordView<'_> {
    pub fn player_hit_rate(
        &self,
        player: &str,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Option<Decimal> {
        let cutoff = as_of - chrono::Duration::days(days_back);
        let mut hits = 0;
        let mut total = 0;
        for record in self.0 {
            if record.player_name == player
                && record.prop_type == prop_type
                && record.date >= cutoff
            {
                total += 1;
                if record.hit {
                    hits += 1;
                }
            }
        }
        hit_rate_of(hits, total)
    }

    pub fn prop_type_hit_rate(
        &self,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Option<Decimal> {
        let cutoff = as_of - chrono::Duration::days(days_back);
        let mut hits = 0;
        let mut total = 0;
        for record in self.0 {
            if record.prop_type == prop_type && record.date >= cutoff {
                total += 1;
                if record.hit {
                    hits += 1;
                }
            }
        }
        hit_rate_of(hits, total)
    }

    pub fn recent_outcomes(&self, player: &str, prop_type: PropType, limit: usize) -> Vec<bool> {
        let mut rows: Vec<&HistoricalProp> = self
            .0
            .iter()
            .filter(|r| r.player_name == player && r.prop_type == prop_type)
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.into_iter().take(limit).map(|r| r.hit).collect()
    }
}

#[cfg(test)]
pub(crate) fn record(
    player: &str,
    date: &str,
    prop_type: PropType,
    hit: bool,
) -> HistoricalProp {
    HistoricalProp {
        player_name: player.to_string(),
        date: date.parse().unwrap(),
        prop_type,
        line: rust_decimal_macros::dec!(0.5),
        actual_result: if hit {
            rust_decimal_macros::dec!(1)
        } else {
            rust_decimal_macros::dec!(0)
        },
        hit,
        odds: -110,
        sport: Sport::Mlb,
    }
}
