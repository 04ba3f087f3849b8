//! CSV-backed historical prop store
//!
//! Loads the flat file once at startup. A missing or unreadable file falls
//! back to a small built-in sample set so development environments still
//! produce scores.

use super::{HistoricalProp, PropHistory, RecordView};
use crate::props::{PropType, Sport};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Raw CSV row; prop_type and sport are strings so unknown values can be
/// skipped instead of failing the whole load
#[derive(Debug, Deserialize)]
struct CsvRow {
    player_name: String,
    date: NaiveDate,
    prop_type: String,
    line: Decimal,
    actual_result: Decimal,
    hit: bool,
    odds: i32,
    sport: String,
}

/// In-memory historical dataset loaded from a CSV file
pub struct CsvHistory {
    records: Vec<HistoricalProp>,
}

impl CsvHistory {
    /// Load from `path`, falling back to sample data when the file is
    /// missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_file(path) {
            Ok(records) => {
                tracing::info!(
                    path = %path.display(),
                    count = records.len(),
                    "Loaded historical prop records"
                );
                Self { records }
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Historical data unavailable, using sample records"
                );
                Self {
                    records: sample_records(),
                }
            }
        }
    }

    /// Build directly from records (tests, fixtures)
    pub fn from_records(records: Vec<HistoricalProp>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn read_file(path: &Path) -> anyhow::Result<Vec<HistoricalProp>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed history row");
                    continue;
                }
            };
            let prop_type = match row.prop_type.parse::<PropType>() {
                Ok(p) => p,
                Err(_) => {
                    tracing::debug!(prop_type = %row.prop_type, "Skipping unknown prop type");
                    continue;
                }
            };
            let sport = match row.sport.parse::<Sport>() {
                Ok(s) => s,
                Err(_) => {
                    tracing::debug!(sport = %row.sport, "Skipping unknown sport");
                    continue;
                }
            };
            records.push(HistoricalProp {
                player_name: row.player_name,
                date: row.date,
                prop_type,
                line: row.line,
                actual_result: row.actual_result,
                hit: row.hit,
                odds: row.odds,
                sport,
            });
        }
        Ok(records)
    }
}

impl PropHistory for CsvHistory {
    fn player_hit_rate(
        &self,
        player: &str,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Option<Decimal> {
        RecordView(&self.records).player_hit_rate(player, prop_type, as_of, days_back)
    }

    fn prop_type_hit_rate(
        &self,
        prop_type: PropType,
        as_of: NaiveDate,
        days_back: i64,
    ) -> Option<Decimal> {
        RecordView(&self.records).prop_type_hit_rate(prop_type, as_of, days_back)
    }

    fn recent_outcomes(&self, player: &str, prop_type: PropType, limit: usize) -> Vec<bool> {
        RecordView(&self.records).recent_outcomes(player, prop_type, limit)
    }
}

/// Development fallback records
fn sample_records() -> Vec<HistoricalProp> {
    fn rec(
        player: &str,
        date: &str,
        prop_type: PropType,
        line: Decimal,
        actual: Decimal,
        hit: bool,
        odds: i32,
        sport: Sport,
    ) -> HistoricalProp {
        HistoricalProp {
            player_name: player.to_string(),
            date: date.parse().expect("sample dates are valid"),
            prop_type,
            line,
            actual_result: actual,
            hit,
            odds,
            sport,
        }
    }

    vec![
        rec(
            "Patrick Mahomes",
            "2023-12-01",
            PropType::PassingYards,
            dec!(275.5),
            dec!(320),
            true,
            -110,
            Sport::Nfl,
        ),
        rec(
            "Josh Allen",
            "2023-12-01",
            PropType::PassingYards,
            dec!(250.5),
            dec!(240),
            false,
            -110,
            Sport::Nfl,
        ),
        rec(
            "Tua Tagovailoa",
            "2023-12-01",
            PropType::PassingYards,
            dec!(225.5),
            dec!(280),
            true,
            -110,
            Sport::Nfl,
        ),
        rec(
            "Aaron Judge",
            "2023-09-15",
            PropType::HomeRuns,
            dec!(0.5),
            dec!(1),
            true,
            150,
            Sport::Mlb,
        ),
        rec(
            "Mookie Betts",
            "2023-09-15",
            PropType::Hits,
            dec!(1.5),
            dec!(2),
            true,
            -120,
            Sport::Mlb,
        ),
    ]
}
