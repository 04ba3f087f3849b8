//! Serve command implementation

use crate::api;
use crate::config::Config;
use crate::scheduler::RefreshScheduler;
use crate::service::ParlayService;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Disable the background refresh scheduler
    #[arg(long)]
    pub no_scheduler: bool,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        crate::telemetry::install_metrics(config.telemetry.metrics_port)?;

        let service = Arc::new(ParlayService::from_config(config));

        if self.no_scheduler {
            tracing::info!("Refresh scheduler disabled");
        } else {
            let scheduler = RefreshScheduler::new(service.clone(), &config.scheduler);
            tokio::spawn(scheduler.run());
        }

        api::serve(service, &config.api.bind).await
    }
}
