//! Static mock datasets
//!
//! Development/demo stand-ins used when SportsDataIO is unreachable or no
//! API key is configured. Confidence and hit rate carry placeholder values;
//! the scoring pass recomputes both from history.

use super::sportsdata::InjuryReport;
use crate::props::{PlayerProp, PropType, Sport};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MOCK_SOURCE: &str = "sportsdata_io";

/// Placeholder values overwritten during scoring
const PLACEHOLDER_CONFIDENCE: Decimal = dec!(75);
const PLACEHOLDER_HIT_RATE: Decimal = dec!(0.55);

#[allow(clippy::too_many_arguments)]
fn prop(
    player: &str,
    team: &str,
    opponent: &str,
    prop_type: PropType,
    line: Decimal,
    over_odds: i32,
    under_odds: i32,
    position: &str,
    date: NaiveDate,
) -> PlayerProp {
    PlayerProp {
        player_name: player.to_string(),
        team: team.to_string(),
        opponent: opponent.to_string(),
        prop_type,
        line,
        over_odds,
        under_odds,
        game_date: date,
        position: position.to_string(),
        source: MOCK_SOURCE.to_string(),
        confidence_score: PLACEHOLDER_CONFIDENCE,
        hit_rate: PLACEHOLDER_HIT_RATE,
        recent_form: None,
    }
}

/// Mock props for a sport; empty for sports without a dataset
pub fn props_for(sport: Sport, date: NaiveDate) -> Vec<PlayerProp> {
    match sport {
        Sport::Nfl => nfl_props(date),
        Sport::Mlb => mlb_props(date),
        _ => Vec::new(),
    }
}

fn nfl_props(date: NaiveDate) -> Vec<PlayerProp> {
    use PropType::*;
    vec![
        prop("Josh Allen", "BUF", "MIA", PassingYards, dec!(275.5), -110, -110, "QB", date),
        prop("Stefon Diggs", "BUF", "MIA", ReceivingYards, dec!(85.5), -115, -105, "WR", date),
        prop("Derrick Henry", "BAL", "CIN", RushingYards, dec!(95.5), -120, 100, "RB", date),
        prop("Lamar Jackson", "BAL", "CIN", PassingYards, dec!(225.5), -105, -115, "QB", date),
        prop("Travis Kelce", "KC", "LV", ReceivingYards, dec!(65.5), -110, -110, "TE", date),
        prop("Patrick Mahomes", "KC", "LV", PassingYards, dec!(285.5), -108, -112, "QB", date),
        prop("Cooper Kupp", "LAR", "SF", Receptions, dec!(6.5), -105, -115, "WR", date),
        prop("Christian McCaffrey", "SF", "LAR", RushingYards, dec!(110.5), -110, -110, "RB", date),
        prop("Tyreek Hill", "MIA", "BUF", ReceivingYards, dec!(75.5), -105, -115, "WR", date),
        prop("Justin Jefferson", "MIN", "GB", Receptions, dec!(6.5), -108, -112, "WR", date),
        prop("Saquon Barkley", "NYG", "DAL", RushingYards, dec!(85.5), -110, -110, "RB", date),
        prop("Dak Prescott", "DAL", "NYG", PassingTouchdowns, dec!(1.5), -115, -105, "QB", date),
        prop("CeeDee Lamb", "DAL", "NYG", ReceivingYards, dec!(80.5), -108, -112, "WR", date),
        prop("Aaron Rodgers", "NYJ", "NE", PassingYards, dec!(245.5), -110, -110, "QB", date),
        prop("Davante Adams", "LV", "KC", Receptions, dec!(7.5), -120, 100, "WR", date),
    ]
}

fn mlb_props(date: NaiveDate) -> Vec<PlayerProp> {
    use PropType::*;
    vec![
        prop("Aaron Judge", "NYY", "BOS", HomeRuns, dec!(0.5), 180, -220, "OF", date),
        prop("Mookie Betts", "LAD", "SD", Hits, dec!(1.5), -115, -105, "OF", date),
        prop("Ronald Acuña Jr.", "ATL", "NYM", Hits, dec!(1.5), -120, 100, "OF", date),
        prop("Gerrit Cole", "NYY", "BOS", Strikeouts, dec!(7.5), -105, -115, "P", date),
        prop("Freddie Freeman", "LAD", "SD", Rbis, dec!(1.5), 140, -170, "1B", date),
        prop("Vladimir Guerrero Jr.", "TOR", "TB", TotalBases, dec!(2.5), -105, -115, "1B", date),
        prop("Juan Soto", "SD", "LAD", Hits, dec!(1.5), -108, -112, "OF", date),
        prop("Shane Bieber", "CLE", "DET", Strikeouts, dec!(8.5), -110, -110, "P", date),
        prop("Pete Alonso", "NYM", "ATL", HomeRuns, dec!(0.5), 150, -180, "1B", date),
        prop("Kyle Tucker", "HOU", "SEA", Hits, dec!(1.5), -115, -105, "OF", date),
        prop("Fernando Tatis Jr.", "SD", "LAD", TotalBases, dec!(2.5), 110, -130, "SS", date),
    ]
}

/// Mock injury reports
pub fn injuries_for(sport: Sport) -> Vec<InjuryReport> {
    match sport {
        Sport::Nfl => vec![
            InjuryReport {
                player_name: "Travis Kelce".to_string(),
                status: "Questionable".to_string(),
                injury: Some("Ankle".to_string()),
            },
            InjuryReport {
                player_name: "Cooper Kupp".to_string(),
                status: "Probable".to_string(),
                injury: Some("Knee".to_string()),
            },
        ],
        Sport::Mlb => vec![
            InjuryReport {
                player_name: "Aaron Judge".to_string(),
                status: "Day-to-Day".to_string(),
                injury: Some("Wrist".to_string()),
            },
            InjuryReport {
                player_name: "Mookie Betts".to_string(),
                status: "Healthy".to_string(),
                injury: None,
            },
        ],
        _ => Vec::new(),
    }
}
