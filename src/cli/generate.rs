//! Generate command implementation

use crate::config::Config;
use crate::props::{Sport, Tier};
use crate::service::ParlayService;
use clap::Args;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Sport to generate for (mlb, nfl, nba, nhl)
    pub sport: Sport,

    /// Restrict to one tier (free, premium, goat)
    #[arg(short, long)]
    pub tier: Option<Tier>,

    /// Print full parlay JSON instead of the summary
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = ParlayService::from_config(config);
        let parlays = service.get_parlays(self.sport, self.tier).await;

        if parlays.is_empty() {
            println!("No eligible parlays for {}", self.sport);
            return Ok(());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&parlays)?);
            return Ok(());
        }

        for parlay in &parlays {
            println!(
                "{} | {} legs | {:+} | {:.2}x payout | {:.1}% confidence",
                parlay.description,
                parlay.legs.len(),
                parlay.total_odds,
                parlay.expected_payout,
                parlay.overall_confidence
            );
            for leg in &parlay.legs {
                println!(
                    "    {} ({}) {:?} {} {} at {:+}",
                    leg.prop.player_name,
                    leg.prop.team,
                    leg.selection,
                    leg.prop.line,
                    leg.prop.prop_type,
                    leg.odds
                );
            }
        }

        Ok(())
    }
}
