use clap::Parser;
use stat_sync::cli::{Cli, Commands};
use stat_sync::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize logging
    stat_sync::telemetry::init_logging(&config.telemetry.log_level)?;

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting API server");
            args.execute(&config).await?;
        }
        Commands::Generate(args) => {
            tracing::info!("Generating parlays");
            args.execute(&config).await?;
        }
        Commands::Props(args) => {
            tracing::info!("Fetching raw props");
            args.execute(&config).await?;
        }
        Commands::Target(args) => {
            tracing::info!("Building target parlay");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  History CSV: {}", config.history.csv_path.display());
            println!(
                "  Scoring: {}d hit-rate window, {} recent games",
                config.scoring.hit_rate_window_days, config.scoring.recent_form_games
            );
            println!(
                "  Builder: {} attempts, {} min legs",
                config.builder.max_attempts, config.builder.min_legs
            );
            println!("  Cache TTL: {}s", config.cache.ttl_secs);
            println!(
                "  Scheduler: every {}m, notify at {}%",
                config.scheduler.refresh_interval_minutes, config.scheduler.notify_min_confidence
            );
            println!("  API bind: {}", config.api.bind);
            println!("  Metrics port: {}", config.telemetry.metrics_port);
        }
    }

    Ok(())
}
