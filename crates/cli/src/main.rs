mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nhlscrape_core::{
    create_sink, current_season_window, fetch_standings_types, fetch_stat_types,
    load_config_or_default, metrics, validate_config, BatchReport, Config, ListReport,
    ObjectStoreConfig, SanitizedConfig, Scraper, Sink, StatsApi, StatsApiClient,
};

use cli::{Cli, Command};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let print_metrics = cli.metrics;
    let result = run(cli).await;

    if print_metrics {
        print!("{}", metrics::encode_metrics());
    }

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("nhlscrape v{}", VERSION);

    // Load configuration
    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to load config".to_string(),
    })?;
    // Standard AWS variables fill in object store keys the config leaves out.
    config.sink.object_store = config
        .sink
        .object_store
        .map(ObjectStoreConfig::with_env_credentials);
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&sanitized).unwrap_or_default()
    );

    let api: Arc<dyn StatsApi> = Arc::new(
        StatsApiClient::new(config.api.clone()).context("Failed to create stats API client")?,
    );
    info!("Using stats API at {}", config.api.base_url);

    match cli.command {
        Command::Types => print_types(api.as_ref()).await,
        Command::Awards => {
            let scraper = scraper(&config, api)?;
            scraper.fetch_awards().await.context("Failed to fetch awards")
        }
        Command::Draft { year } => {
            let scraper = scraper(&config, api)?;
            let report = scraper
                .fetch_draft_data(year.as_deref())
                .await
                .context("Failed to fetch draft data")?;
            summarize("draft", &report);
            Ok(())
        }
        Command::Players { players, stat_type } => {
            let mut scraper = scraper(&config, api)?;
            prepare(&mut scraper).await?;
            let selection = (!players.is_empty()).then_some(players.as_slice());
            let report = scraper
                .fetch_player_data(selection, stat_type.as_deref())
                .await
                .context("Failed to fetch player data")?;
            summarize("players", &report);
            Ok(())
        }
        Command::Games {
            start_date,
            end_date,
            team,
        } => {
            let (default_start, default_end) = current_season_window(Local::now().date_naive());
            let start = start_date.unwrap_or(default_start);
            let end = end_date.unwrap_or(default_end);

            let mut scraper = scraper(&config, api)?;
            prepare(&mut scraper).await?;
            let report = scraper
                .fetch_game_data(start, end, team.as_deref())
                .await
                .context("Failed to fetch game data")?;
            summarize("games", &report);
            Ok(())
        }
    }
}

fn scraper(config: &Config, api: Arc<dyn StatsApi>) -> Result<Scraper> {
    let sink: Arc<dyn Sink> =
        Arc::from(create_sink(&config.sink).context("Failed to create sink")?);
    info!("Using sink: {}", sink.name());

    Ok(Scraper::new(
        api,
        sink,
        config.scraper.clone(),
        config.seasons.availability_policy,
    ))
}

async fn prepare(scraper: &mut Scraper) -> Result<()> {
    let report = scraper
        .prepare()
        .await
        .context("Failed to load stat enumerations")?;
    summarize_index(&report);
    Ok(())
}

async fn print_types(api: &dyn StatsApi) -> Result<()> {
    let stat_types = fetch_stat_types(api)
        .await
        .context("Failed to fetch stat types")?;
    let standings_types = fetch_standings_types(api)
        .await
        .context("Failed to fetch standings types")?;

    let output = serde_json::json!({
        "stat_types": stat_types,
        "standings_types": standings_types,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn summarize_index(report: &ListReport) {
    info!(
        "Indexed {} seasons: {} players, {} game dates",
        report.seasons, report.players, report.dates
    );
    if !report.is_complete() {
        warn!("{} index units failed", report.failures.len());
        for failure in &report.failures {
            warn!("  {}", failure);
        }
    }
}

fn summarize(operation: &str, report: &BatchReport) {
    info!(
        "{}: {} attempted, {} written, {} skipped",
        operation, report.attempted, report.written, report.skipped
    );
    if !report.is_complete() {
        warn!(
            "{}: {} units failed, output is partial",
            operation,
            report.failures.len()
        );
        for failure in &report.failures {
            warn!("  {}", failure);
        }
    }
}
