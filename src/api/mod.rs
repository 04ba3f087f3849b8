//! HTTP API surface
//!
//! REST endpoints over the parlay service. Pure request/response wrappers:
//! empty results are 200 with empty lists (insufficient props is not an
//! error), bad path/query strings are 400.

use crate::props::{PayoutTier, Sport, Tier};
use crate::service::ParlayService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Create the API router with all endpoints
pub fn create_router(service: Arc<ParlayService>) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/parlays/:sport", get(get_parlays))
        .route("/parlays/:sport/refresh", post(refresh_parlays))
        .route("/parlays/:sport/target/:payout", get(get_target_parlay))
        .route("/props/:sport", get(get_props))
        .route("/props/:sport/live", get(get_live_props))
        .route("/injuries/:sport", get(get_injuries))
        .route("/stats", get(get_stats))
        .with_state(service)
}

/// Serve the API on the given bind address
pub async fn serve(service: Arc<ParlayService>, bind: &str) -> anyhow::Result<()> {
    let app = create_router(service);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

#[derive(Debug, Deserialize)]
struct ParlayQuery {
    tier: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PropsQuery {
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct TargetQuery {
    max_legs: Option<usize>,
    min_hit_rate: Option<Decimal>,
}

/// GET /health
async fn get_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /parlays/:sport?tier=
async fn get_parlays(
    State(service): State<Arc<ParlayService>>,
    Path(sport): Path<String>,
    Query(query): Query<ParlayQuery>,
) -> Response {
    let sport: Sport = match sport.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };
    let tier: Option<Tier> = match query.tier.as_deref().map(str::parse).transpose() {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };

    let parlays = service.get_parlays(sport, tier).await;
    Json(parlays).into_response()
}

/// POST /parlays/:sport/refresh
async fn refresh_parlays(
    State(service): State<Arc<ParlayService>>,
    Path(sport): Path<String>,
) -> Response {
    let sport: Sport = match sport.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };

    service.refresh(sport).await;
    Json(json!({ "refreshed": sport.as_str() })).into_response()
}

/// GET /parlays/:sport/target/:payout?max_legs=&min_hit_rate=
async fn get_target_parlay(
    State(service): State<Arc<ParlayService>>,
    Path((sport, payout)): Path<(String, String)>,
    Query(query): Query<TargetQuery>,
) -> Response {
    let sport: Sport = match sport.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };
    let tier: PayoutTier = match payout.parse() {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };

    let max_legs = query.max_legs.unwrap_or(8);
    let min_hit_rate = query.min_hit_rate.unwrap_or(dec!(0.55));

    match service
        .target_parlay(sport, tier, max_legs, min_hit_rate)
        .await
    {
        Some(parlay) => Json(parlay).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no suitable parlay combination" })),
        )
            .into_response(),
    }
}

/// GET /props/:sport?date=
async fn get_props(
    State(service): State<Arc<ParlayService>>,
    Path(sport): Path<String>,
    Query(query): Query<PropsQuery>,
) -> Response {
    let sport: Sport = match sport.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };

    let props = service.player_props(sport, query.date).await;
    Json(props).into_response()
}

/// GET /props/:sport/live
async fn get_live_props(
    State(service): State<Arc<ParlayService>>,
    Path(sport): Path<String>,
) -> Response {
    let sport: Sport = match sport.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };

    let props = service.live_props(sport).await;
    Json(props).into_response()
}

#[derive(Debug, Deserialize)]
struct InjuryQuery {
    player: Option<String>,
}

/// GET /injuries/:sport?player=
async fn get_injuries(
    State(service): State<Arc<ParlayService>>,
    Path(sport): Path<String>,
    Query(query): Query<InjuryQuery>,
) -> Response {
    let sport: Sport = match sport.parse() {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };

    match query.player {
        Some(player) => {
            let status = service.injury_status(&player, sport).await;
            Json(json!({ "player": player, "status": status })).into_response()
        }
        None => Json(service.injury_report(sport).await).into_response(),
    }
}

/// GET /stats
async fn get_stats(State(service): State<Arc<ParlayService>>) -> impl IntoResponse {
    Json(service.system_stats().await)
}
