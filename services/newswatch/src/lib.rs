//! Newswatch - web page change monitor
//!
//! Polls a page, fingerprints the text of one section, and tells a list of
//! Telegram chats when it first loads and whenever it changes.

pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod io;
pub mod notifier;
pub mod state;
pub mod telegram;

pub use config::{load_config, Config};
pub use engine::{MonitorEvent, MonitorLoop};
pub use error::{NewswatchError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::extractor::ContentExtractor;
use crate::fetcher::PageFetcher;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;

/// Wire a monitor loop from configuration over the given HTTP client.
///
/// The configuration is validated first, so a missing token or chat list
/// fails here without any request going out.
pub fn build_monitor(config: &Config, http: Arc<dyn HttpClient>) -> Result<MonitorLoop> {
    config.validate()?;

    let extractor = ContentExtractor::new(&config.target.selector)?;
    let fetcher = PageFetcher::new(&config.target, Arc::clone(&http));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config.telegram, http));

    Ok(MonitorLoop::new(
        fetcher,
        extractor,
        notifier,
        config.target.polling_interval(),
    ))
}

/// Run the newswatch service with the given configuration
pub async fn run(config: Config) -> Result<()> {
    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::new(config.target.request_timeout())?);
    let mut monitor = build_monitor(&config, http)?;
    let cancel = CancellationToken::new();

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                return;
            }
        }
        cancel_for_signal.cancel();
    });

    tracing::info!(
        "Newswatch started: '{}' on {}",
        config.target.selector,
        config.target.url
    );

    // Blocks until cancelled
    monitor.run(cancel).await;

    tracing::info!("Newswatch stopped");
    Ok(())
}
