//! Discord webhook notifications
//!
//! Posts parlay embeds to a configured webhook. Unconfigured or failing
//! webhooks are logged and skipped, never propagated.

use crate::props::{Parlay, Tier};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const GOAT_COLOR: u32 = 0xFFD700;
const PREMIUM_COLOR: u32 = 0x9B59B6;
const FREE_COLOR: u32 = 0x3498DB;

/// Sends parlay notifications to a Discord webhook
pub struct DiscordNotifier {
    webhook_url: Option<String>,
    client: Client,
}

impl DiscordNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            tracing::warn!("Discord webhook not configured, notifications disabled");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            webhook_url,
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Post one parlay; failures are logged and swallowed
    pub async fn send_parlay(&self, parlay: &Parlay) {
        let Some(url) = &self.webhook_url else {
            tracing::debug!("Discord webhook not configured, skipping notification");
            return;
        };

        let payload = json!({
            "content": notification_content(parlay),
            "embeds": [parlay_embed(parlay)],
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(tier = %parlay.tier, "Discord notification sent");
                metrics::counter!("statsync_notifications_sent_total").increment(1);
            }
            Ok(response) => {
                tracing::error!(status = %response.status(), "Discord webhook rejected payload");
            }
            Err(e) => {
                tracing::error!(error = %e, "Discord notification failed");
            }
        }
    }
}

fn notification_content(parlay: &Parlay) -> String {
    match parlay.tier {
        Tier::Goat => format!(
            "🐐 **GOAT TIER ALERT** 🐐\n**{:.1}% Confidence** - This is the play!",
            parlay.overall_confidence
        ),
        Tier::Premium => format!(
            "💎 **Premium Play Available** 💎\n**{:.1}% Confidence** - High value detected!",
            parlay.overall_confidence
        ),
        Tier::Free => format!(
            "⚡ **New Free Play** ⚡\n**{:.1}% Confidence** - Solid value bet!",
            parlay.overall_confidence
        ),
    }
}

fn parlay_embed(parlay: &Parlay) -> Value {
    let color = match parlay.tier {
        Tier::Goat => GOAT_COLOR,
        Tier::Premium => PREMIUM_COLOR,
        Tier::Free => FREE_COLOR,
    };

    let mut fields: Vec<Value> = parlay
        .legs
        .iter()
        .map(|leg| {
            json!({
                "name": format!("{} ({})", leg.prop.player_name, leg.prop.team),
                "value": format!(
                    "{:?} {} {} ({:+})",
                    leg.selection, leg.prop.line, leg.prop.prop_type, leg.odds
                ),
                "inline": true,
            })
        })
        .collect();

    fields.push(json!({
        "name": "Total Odds",
        "value": format!("{:+}", parlay.total_odds),
        "inline": true,
    }));
    fields.push(json!({
        "name": "Payout",
        "value": format!("{:.2}x", parlay.expected_payout),
        "inline": true,
    }));

    json!({
        "title": parlay.description,
        "description": format!(
            "{} | {} legs | {:.1}% confidence",
            parlay.sport.as_str().to_uppercase(),
            parlay.legs.len(),
            parlay.overall_confidence
        ),
        "color": color,
        "fields": fields,
        "footer": { "text": format!("Game date {}", parlay.game_date) },
    })
}
