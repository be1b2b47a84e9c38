//! Newswatch CLI
//!
//! Command-line interface for the web page change monitor.

use std::path::PathBuf;

use clap::Parser;
use newswatch::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "newswatch")]
#[command(about = "Watch a web page section and report changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between checks (overrides config file)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, interval={:?}, log_level={:?}",
        args.config,
        args.interval,
        args.log_level
    );

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => return Err(e.into()),
    }

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(interval) = args.interval {
        config.target.polling_interval_seconds = interval;
    }

    config.resolve_secrets()?;

    tracing::info!("Starting newswatch service");
    tracing::debug!(
        "Target: {}, chats: {}",
        config.target.url,
        config.telegram.chat_ids.len()
    );

    newswatch::run(config).await?;

    Ok(())
}
