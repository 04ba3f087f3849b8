//! Prop and parlay types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Supported sports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Mlb,
    Nfl,
    Nba,
    Nhl,
}

impl Sport {
    /// All supported sports, in refresh order
    pub const ALL: [Sport; 4] = [Sport::Mlb, Sport::Nfl, Sport::Nba, Sport::Nhl];

    /// Lowercase string form used in routes and cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Mlb => "mlb",
            Sport::Nfl => "nfl",
            Sport::Nba => "nba",
            Sport::Nhl => "nhl",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mlb" => Ok(Sport::Mlb),
            "nfl" => Ok(Sport::Nfl),
            "nba" => Ok(Sport::Nba),
            "nhl" => Ok(Sport::Nhl),
            other => Err(format!("unknown sport: {}", other)),
        }
    }
}

/// Player prop markets we understand
///
/// Provider strings outside this set are dropped at the normalization
/// boundary, not surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    Hits,
    HomeRuns,
    Rbis,
    Strikeouts,
    BatterStrikeouts,
    PitcherStrikeouts,
    TotalBases,
    PassingYards,
    PassingTouchdowns,
    RushingYards,
    ReceivingYards,
    Receptions,
    Points,
    Assists,
    Rebounds,
}

impl PropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropType::Hits => "hits",
            PropType::HomeRuns => "home_runs",
            PropType::Rbis => "rbis",
            PropType::Strikeouts => "strikeouts",
            PropType::BatterStrikeouts => "batter_strikeouts",
            PropType::PitcherStrikeouts => "pitcher_strikeouts",
            PropType::TotalBases => "total_bases",
            PropType::PassingYards => "passing_yards",
            PropType::PassingTouchdowns => "passing_touchdowns",
            PropType::RushingYards => "rushing_yards",
            PropType::ReceivingYards => "receiving_yards",
            PropType::Receptions => "receptions",
            PropType::Points => "points",
            PropType::Assists => "assists",
            PropType::Rebounds => "rebounds",
        }
    }

    /// Default line used when a provider omits the point value
    pub fn default_line(&self) -> Decimal {
        match self {
            PropType::Hits => dec!(0.5),
            PropType::HomeRuns => dec!(0.5),
            PropType::Rbis => dec!(0.5),
            PropType::Strikeouts | PropType::BatterStrikeouts | PropType::PitcherStrikeouts => {
                dec!(0.5)
            }
            PropType::TotalBases => dec!(1.5),
            PropType::PassingYards => dec!(249.5),
            PropType::PassingTouchdowns => dec!(1.5),
            PropType::RushingYards => dec!(49.5),
            PropType::ReceivingYards => dec!(49.5),
            PropType::Receptions => dec!(3.5),
            PropType::Points => dec!(19.5),
            PropType::Assists => dec!(4.5),
            PropType::Rebounds => dec!(7.5),
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hits" => Ok(PropType::Hits),
            "home_runs" => Ok(PropType::HomeRuns),
            "rbis" => Ok(PropType::Rbis),
            "strikeouts" => Ok(PropType::Strikeouts),
            "batter_strikeouts" => Ok(PropType::BatterStrikeouts),
            "pitcher_strikeouts" => Ok(PropType::PitcherStrikeouts),
            "total_bases" => Ok(PropType::TotalBases),
            "passing_yards" => Ok(PropType::PassingYards),
            "passing_touchdowns" => Ok(PropType::PassingTouchdowns),
            "rushing_yards" => Ok(PropType::RushingYards),
            "receiving_yards" => Ok(PropType::ReceivingYards),
            "receptions" => Ok(PropType::Receptions),
            "points" => Ok(PropType::Points),
            "assists" => Ok(PropType::Assists),
            "rebounds" => Ok(PropType::Rebounds),
            other => Err(format!("unknown prop type: {}", other)),
        }
    }
}

/// A wagered statistical threshold for a specific player
///
/// Immutable once scored for a given request; `confidence_score` and
/// `hit_rate` are recomputed from history during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProp {
    pub player_name: String,
    pub team: String,
    pub opponent: String,
    pub prop_type: PropType,
    pub line: Decimal,
    /// American odds for the over
    pub over_odds: i32,
    /// American odds for the under
    pub under_odds: i32,
    pub game_date: NaiveDate,
    pub position: String,
    /// Which provider produced this prop
    pub source: String,
    /// Confidence score in [0, 100]
    pub confidence_score: Decimal,
    /// Historical hit rate in [0, 1]
    pub hit_rate: Decimal,
    /// Recent hit/miss sequence, most recent first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_form: Option<Vec<bool>>,
}

/// Which side of the line a leg takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Over,
    Under,
}

/// One prop selection within a parlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayLeg {
    pub prop: PlayerProp,
    pub selection: Selection,
    /// American odds of the chosen side
    pub odds: i32,
    pub confidence: Decimal,
}

/// A bundle of parlay legs with aggregate odds and confidence
///
/// Invariants: no duplicate player across legs; at most two legs share a
/// team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parlay {
    pub id: Uuid,
    pub tier: Tier,
    pub sport: Sport,
    pub legs: Vec<ParlayLeg>,
    /// Combined American odds across all legs
    pub total_odds: i32,
    /// Decimal payout multiplier of `total_odds`
    pub expected_payout: Decimal,
    /// Mean of leg confidences
    pub overall_confidence: Decimal,
    pub created_at: DateTime<Utc>,
    pub game_date: NaiveDate,
    pub description: String,
}

impl Parlay {
    /// Player names across all legs
    pub fn players(&self) -> Vec<&str> {
        self.legs
            .iter()
            .map(|l| l.prop.player_name.as_str())
            .collect()
    }
}

/// Subscription tiers with static selection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
    Goat,
}

/// Per-tier selection thresholds
#[derive(Debug, Clone, Copy)]
pub struct TierRequirements {
    /// Minimum confidence for a prop to be eligible, and for the parlay mean
    pub min_confidence: Decimal,
    /// Target payout multiplier (accepted at 80% tolerance)
    pub target_payout: Decimal,
    pub max_legs: usize,
    /// Keep the confidence ordering intact instead of shuffling the top half
    pub conservative_bias: bool,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Premium, Tier::Goat];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
            Tier::Goat => "goat",
        }
    }

    /// Static tier configuration; tiers are not stateful entities
    pub fn requirements(&self) -> TierRequirements {
        match self {
            Tier::Free => TierRequirements {
                min_confidence: dec!(45),
                target_payout: dec!(10),
                max_legs: 6,
                conservative_bias: true,
            },
            Tier::Premium => TierRequirements {
                min_confidence: dec!(55),
                target_payout: dec!(25),
                max_legs: 7,
                conservative_bias: false,
            },
            Tier::Goat => TierRequirements {
                min_confidence: dec!(65),
                target_payout: dec!(50),
                max_legs: 8,
                conservative_bias: false,
            },
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "premium" => Ok(Tier::Premium),
            "goat" => Ok(Tier::Goat),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

/// Dollar payout tiers for target-odds parlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutTier {
    #[serde(rename = "$100")]
    D100,
    #[serde(rename = "$500")]
    D500,
    #[serde(rename = "$1000")]
    D1000,
    #[serde(rename = "$5000")]
    D5000,
    #[serde(rename = "$10000")]
    D10000,
}

impl PayoutTier {
    /// Target payout in dollars for a $10 stake
    pub fn target_payout(&self) -> Decimal {
        match self {
            PayoutTier::D100 => dec!(100),
            PayoutTier::D500 => dec!(500),
            PayoutTier::D1000 => dec!(1000),
            PayoutTier::D5000 => dec!(5000),
            PayoutTier::D10000 => dec!(10000),
        }
    }
}

impl fmt::Display for PayoutTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayoutTier::D100 => "$100",
            PayoutTier::D500 => "$500",
            PayoutTier::D1000 => "$1000",
            PayoutTier::D5000 => "$5000",
            PayoutTier::D10000 => "$10000",
        };
        f.write_str(s)
    }
}

impl FromStr for PayoutTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('$') {
            "100" => Ok(PayoutTier::D100),
            "500" => Ok(PayoutTier::D500),
            "1000" => Ok(PayoutTier::D1000),
            "5000" => Ok(PayoutTier::D5000),
            "10000" => Ok(PayoutTier::D10000),
            other => Err(format!("unknown payout tier: {}", other)),
        }
    }
}

/// Risk bucket derived from a parlay confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_confidence(confidence: Decimal) -> Self {
        if confidence >= dec!(80) {
            RiskLevel::Low
        } else if confidence >= dec!(60) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_round_trip() {
        for sport in Sport::ALL {
            assert_eq!(sport.as_str().parse::<Sport>().unwrap(), sport);
        }
    }

    #[test]
    fn test_sport_unknown() {
        assert!("cricket".parse::<Sport>().is_err());
    }

    #[test]
    fn test_prop_type_parse() {
        assert_eq!("home_runs".parse::<PropType>().unwrap(), PropType::HomeRuns);
        assert_eq!(
            "PASSING_YARDS".parse::<PropType>().unwrap(),
            PropType::PassingYards
        );
        assert!("triple_doubles".parse::<PropType>().is_err());
    }

    #[test]
    fn test_prop_type_serde_matches_from_str() {
        let json = serde_json::to_string(&PropType::PitcherStrikeouts).unwrap();
        assert_eq!(json, "\"pitcher_strikeouts\"");
        let parsed: PropType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PropType::PitcherStrikeouts);
    }

    #[test]
    fn test_tier_requirements() {
        assert_eq!(Tier::Free.requirements().max_legs, 6);
        assert_eq!(Tier::Premium.requirements().min_confidence, dec!(55));
        assert_eq!(Tier::Goat.requirements().target_payout, dec!(50));
        assert!(Tier::Free.requirements().conservative_bias);
        assert!(!Tier::Goat.requirements().conservative_bias);
    }

    #[test]
    fn test_payout_tier_parse() {
        assert_eq!("$500".parse::<PayoutTier>().unwrap(), PayoutTier::D500);
        assert_eq!("1000".parse::<PayoutTier>().unwrap(), PayoutTier::D1000);
        assert!("$250".parse::<PayoutTier>().is_err());
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_confidence(dec!(85)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(dec!(80)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(dec!(65)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(dec!(40)), RiskLevel::High);
    }

    #[test]
    fn test_default_lines() {
        assert_eq!(PropType::HomeRuns.default_line(), dec!(0.5));
        assert_eq!(PropType::PassingYards.default_line(), dec!(249.5));
        assert_eq!(PropType::Receptions.default_line(), dec!(3.5));
    }
}
