//! Periodic refresh scheduler
//!
//! Interval loop that regenerates parlays for every sport and notifies the
//! configured webhook about fresh high-confidence parlays. Runs until the
//! process exits; a slow refresh simply delays the next tick.

use crate::config::SchedulerConfig;
use crate::notify::DiscordNotifier;
use crate::props::Sport;
use crate::service::ParlayService;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Drives periodic parlay refreshes
pub struct RefreshScheduler {
    service: Arc<ParlayService>,
    notifier: DiscordNotifier,
    interval: Duration,
    notify_min_confidence: Decimal,
}

impl RefreshScheduler {
    pub fn new(service: Arc<ParlayService>, config: &SchedulerConfig) -> Self {
        Self {
            service,
            notifier: DiscordNotifier::new(config.discord_webhook_url.clone()),
            interval: Duration::from_secs(config.refresh_interval_minutes * 60),
            notify_min_confidence: config.notify_min_confidence,
        }
    }

    /// Run the refresh loop forever
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Scheduler started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; refresh once at startup
        loop {
            ticker.tick().await;
            self.refresh_and_notify().await;
        }
    }

    async fn refresh_and_notify(&self) {
        self.service.refresh_all().await;

        if !self.notifier.is_configured() {
            return;
        }

        for sport in Sport::ALL {
            for parlay in self.service.get_parlays(sport, None).await {
                if parlay.overall_confidence >= self.notify_min_confidence {
                    self.notifier.send_parlay(&parlay).await;
                }
            }
        }
    }
}
