//! Core domain types
//!
//! Sports, prop types, player props, parlay legs, parlays, and tiers

mod types;

pub use types::{
    Parlay, ParlayLeg, PayoutTier, PlayerProp, PropType, RiskLevel, Selection, Sport, Tier,
    TierRequirements,
};
