//! Target command implementation

use crate::config::Config;
use crate::props::{PayoutTier, Sport};
use crate::service::ParlayService;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Sport to build from (mlb, nfl, nba, nhl)
    pub sport: Sport,

    /// Dollar payout tier (100, 500, 1000, 5000, 10000)
    pub payout: PayoutTier,

    /// Maximum legs in the parlay
    #[arg(long, default_value_t = 8)]
    pub max_legs: usize,

    /// Minimum historical hit rate for pool entry
    #[arg(long, default_value_t = dec!(0.55))]
    pub min_hit_rate: Decimal,
}

impl TargetArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = ParlayService::from_config(config);
        let result = service
            .target_parlay(self.sport, self.payout, self.max_legs, self.min_hit_rate)
            .await;

        match result {
            Some(parlay) => println!("{}", serde_json::to_string_pretty(&parlay)?),
            None => println!(
                "No suitable combination toward {} for {}",
                self.payout, self.sport
            ),
        }
        Ok(())
    }
}
