use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitch_metrics::api::cache::ResponseCache;
use pitch_metrics::api::state::AppState;
use pitch_metrics::config::AppConfig;
use pitch_metrics::provider::{FootballDataClient, JsonlPlayerStatsProvider, JsonlSquadProvider};
use pitch_metrics::storage::StorageConfig;
use pitch_metrics::AnalyticsEngine;

#[derive(Parser)]
#[command(name = "pitch-metrics")]
#[command(about = "Football team and player analytics with match predictions")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Compute the season as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Advanced season metrics for a team
    Team {
        /// Team id
        id: u32,
    },

    /// Advanced season metrics for a player
    Player {
        /// Player id
        id: String,

        /// Player display name
        name: String,
    },

    /// Compare two teams side by side
    Compare {
        /// First team id
        team1: u32,

        /// Second team id
        team2: u32,
    },

    /// Predict the outcome of a fixture
    Predict {
        /// Home team name
        home_team: String,

        /// Away team name
        away_team: String,

        /// Home team id
        home_team_id: u32,

        /// Away team id
        away_team_id: u32,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_engine(config: &AppConfig, as_of: Option<NaiveDate>) -> Result<AnalyticsEngine> {
    let storage = StorageConfig::new(config.data_dir.clone());
    let matches = FootballDataClient::from_config(&config.provider)
        .context("Failed to create football data client")?;

    let engine = AnalyticsEngine::new(
        Arc::new(matches),
        Arc::new(JsonlSquadProvider::new(storage.clone())),
        Arc::new(JsonlPlayerStatsProvider::new(storage)),
    );
    Ok(match as_of {
        Some(date) => engine.with_reference_date(date),
        None => engine,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = PathBuf::from(&cli.config);
    let mut config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&log_level, cli.json_logs);

    tracing::info!("Starting pitch-metrics v{}", env!("CARGO_PKG_VERSION"));
    if !config_path.exists() {
        tracing::warn!("Config file {:?} not found, using defaults", config_path);
    }

    let engine = build_engine(&config, cli.as_of)?;
    tracing::info!("Reporting on season {}", engine.season());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let cache = Arc::new(ResponseCache::new(Duration::from_secs(
                config.cache.ttl_seconds,
            )));
            if cache.is_enabled() {
                let purge = cache.clone();
                let every = Duration::from_secs(config.cache.ttl_seconds);
                tokio::spawn(async move {
                    let mut interval = tokio::time::interval(every);
                    loop {
                        interval.tick().await;
                        let removed = purge.purge_expired().await;
                        if removed > 0 {
                            tracing::debug!("Purged {} expired cache entries", removed);
                        }
                    }
                });
            }

            let state = AppState {
                engine: Arc::new(engine),
                cache,
                cors_origin: config.server.cors_origin.clone(),
            };
            let app = pitch_metrics::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Team { id } => {
            let metrics = engine.compute_team_advanced_metrics(id).await?;
            print_json(&metrics)?;
        }
        Commands::Player { id, name } => {
            let metrics = engine.compute_player_advanced_metrics(&id, &name).await?;
            print_json(&metrics)?;
        }
        Commands::Compare { team1, team2 } => {
            let comparison = engine.compare_teams(team1, team2).await?;
            print_json(&comparison)?;
        }
        Commands::Predict {
            home_team,
            away_team,
            home_team_id,
            away_team_id,
        } => {
            let prediction = engine
                .predict_match(&home_team, &away_team, home_team_id, away_team_id)
                .await?;
            print_json(&prediction)?;
        }
    }

    Ok(())
}
