//! Props command implementation

use crate::config::Config;
use crate::props::Sport;
use crate::service::ParlayService;
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct PropsArgs {
    /// Sport to fetch (mlb, nfl, nba, nhl)
    pub sport: Sport,

    /// Game date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

impl PropsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = ParlayService::from_config(config);
        let props = service.player_props(self.sport, self.date).await;

        println!("{}", serde_json::to_string_pretty(&props)?);
        eprintln!("{} props from all sources", props.len());
        Ok(())
    }
}
