//! stat-sync: Sports betting parlay engine
//!
//! This library provides the core components for:
//! - Player prop aggregation from SportsDataIO, OddsJam, and The Odds API
//! - Odds math between American and decimal representations
//! - Confidence scoring from historical prop results
//! - Brute-force combination search toward target odds
//! - Tier-driven parlay construction
//! - TTL-cached generation with periodic refresh
//! - Discord notifications and an HTTP API surface
//! - Full observability stack

pub mod api;
pub mod builder;
pub mod cache;
pub mod cli;
pub mod config;
pub mod history;
pub mod notify;
pub mod odds;
pub mod props;
pub mod providers;
pub mod scheduler;
pub mod scoring;
pub mod search;
pub mod service;
pub mod telemetry;
