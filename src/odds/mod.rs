//! Odds math
//!
//! Conversions between American and decimal odds, parlay-level odds and
//! probability aggregation, and the prop odds estimator.

mod estimator;

pub use estimator::estimate_prop_odds;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Odds math domain errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OddsError {
    /// American odds of exactly zero have no defined decimal equivalent
    #[error("American odds of zero are undefined")]
    ZeroAmerican,
    /// Decimal odds at or below 1.0 would divide by zero or flip sign
    #[error("Degenerate decimal odds: {0}")]
    DegenerateDecimal(Decimal),
    /// A parlay needs at least one leg
    #[error("Empty parlay has no odds")]
    EmptyParlay,
    /// Truncated odds fell outside the i32 range
    #[error("Odds out of range: {0}")]
    OutOfRange(Decimal),
}

/// Convert American odds to decimal odds
///
/// Positive odds: odds/100 + 1. Negative odds: 100/|odds| + 1.
pub fn american_to_decimal(odds: i32) -> Result<Decimal, OddsError> {
    if odds == 0 {
        return Err(OddsError::ZeroAmerican);
    }
    let odds = Decimal::from(odds);
    if odds > Decimal::ZERO {
        Ok(odds / dec!(100) + Decimal::ONE)
    } else {
        Ok(dec!(100) / odds.abs() + Decimal::ONE)
    }
}

/// Convert decimal odds back to American odds
///
/// Decimal odds at or below 1.0 are rejected: 1.0 exactly divides by zero,
/// and every odds value convertible from American form is strictly above 1.
/// Truncates toward zero to match integer American odds.
pub fn decimal_to_american(decimal: Decimal) -> Result<i32, OddsError> {
    if decimal <= Decimal::ONE {
        return Err(OddsError::DegenerateDecimal(decimal));
    }
    let american = if decimal >= dec!(2.0) {
        (decimal - Decimal::ONE) * dec!(100)
    } else {
        dec!(-100) / (decimal - Decimal::ONE)
    };
    american
        .trunc()
        .to_i32()
        .ok_or(OddsError::OutOfRange(american))
}

/// Combined American odds for a parlay of individual legs
pub fn calculate_parlay_odds(individual_odds: &[i32]) -> Result<i32, OddsError> {
    if individual_odds.is_empty() {
        return Err(OddsError::EmptyParlay);
    }
    let mut combined = Decimal::ONE;
    for &odds in individual_odds {
        combined *= american_to_decimal(odds)?;
    }
    decimal_to_american(combined)
}

/// Total payout (stake included) for a bet at the given odds
pub fn calculate_payout(odds: i32, stake: Decimal) -> Result<Decimal, OddsError> {
    Ok(stake * american_to_decimal(odds)?)
}

/// Implied probability from American odds (vig-inclusive)
pub fn calculate_hit_probability(odds: i32) -> Result<Decimal, OddsError> {
    if odds == 0 {
        return Err(OddsError::ZeroAmerican);
    }
    let abs = Decimal::from(odds.abs());
    if odds > 0 {
        Ok(dec!(100) / (abs + dec!(100)))
    } else {
        Ok(abs / (abs + dec!(100)))
    }
}

/// Combined probability of a parlay hitting
///
/// Multiplies per-leg probabilities, which assumes the legs are independent.
/// Same-game legs are correlated in reality, so this is a modeling gap, not a
/// guarantee.
pub fn calculate_parlay_probability(probabilities: &[Decimal]) -> Decimal {
    probabilities.iter().product()
}

/// American odds required to turn `stake` into `target_payout`
pub fn calculate_required_odds(target_payout: Decimal, stake: Decimal) -> Result<i32, OddsError> {
    if stake <= Decimal::ZERO {
        return Err(OddsError::DegenerateDecimal(stake));
    }
    decimal_to_american(target_payout / stake)
}

/// Parlay-level confidence from leg hit rates
///
/// Mean hit rate scaled to [0, 100], penalized 5 points per leg over two,
/// optionally averaged with a recent-form-weighted mean, clamped to [0, 100].
pub fn parlay_confidence(hit_rates: &[Decimal], recent_form_weights: Option<&[Decimal]>) -> Decimal {
    if hit_rates.is_empty() {
        return Decimal::ZERO;
    }

    let n = Decimal::from(hit_rates.len());
    let avg: Decimal = hit_rates.iter().sum::<Decimal>() / n;
    let base = avg * dec!(100);

    let leg_penalty = Decimal::from(hit_rates.len() as i64 - 2) * dec!(5);
    let mut adjusted = base - leg_penalty;

    if let Some(weights) = recent_form_weights {
        if weights.len() == hit_rates.len() {
            let total_weight: Decimal = weights.iter().sum();
            if total_weight > Decimal::ZERO {
                let weighted: Decimal = hit_rates
                    .iter()
                    .zip(weights)
                    .map(|(rate, weight)| rate * weight)
                    .sum::<Decimal>()
                    / total_weight;
                adjusted = (adjusted + weighted * dec!(100)) / dec!(2);
            }
        }
    }

    adjusted.clamp(Decimal::ZERO, dec!(100))
}
