//! CLI interface for stat-sync
//!
//! Provides subcommands for:
//! - `serve`: Run the API server and refresh scheduler
//! - `generate`: Build parlays for a sport once and print them
//! - `props`: Fetch raw aggregated props
//! - `target`: Build a dollar-tier parlay via combination search
//! - `config`: Show the resolved configuration

mod generate;
mod props;
mod serve;
mod target;

pub use generate::GenerateArgs;
pub use props::PropsArgs;
pub use serve::ServeArgs;
pub use target::TargetArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stat-sync")]
#[command(about = "Sports betting parlay engine aggregating props from multiple odds providers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the API server and refresh scheduler
    Serve(ServeArgs),
    /// Build parlays for a sport once and print them
    Generate(GenerateArgs),
    /// Fetch raw aggregated props
    Props(PropsArgs),
    /// Build a dollar-tier parlay via combination search
    Target(TargetArgs),
    /// Show the resolved configuration
    Config,
}
