//! Engine: the fetch, extract, detect and notify loop

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::detector::{fingerprint, has_changed, ChangeOutcome};
use crate::extractor::ContentExtractor;
use crate::fetcher::PageFetcher;
use crate::notifier::{DeliveryReport, Notification, Notifier};
use crate::state::MonitorState;

/// Something worth telling the subscribers about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    Started { url: String, interval: Duration },
    InitialContentLoaded,
    NewContent { text: String },
    FetchOrParseFailure,
}

impl MonitorEvent {
    /// Message body as printed and logged
    pub fn message(&self) -> String {
        self.render(|s| s.to_string())
    }

    /// Message body with dynamic parts escaped for HTML mode
    pub fn html_message(&self) -> String {
        self.render(escape_html)
    }

    fn render(&self, text: impl Fn(&str) -> String) -> String {
        match self {
            MonitorEvent::Started { url, interval } => format!(
                "Starting monitoring of {}\nChecking every {} seconds",
                text(url),
                interval.as_secs()
            ),
            MonitorEvent::InitialContentLoaded => "Initial content loaded".to_string(),
            MonitorEvent::NewContent { text: content } => {
                format!("New content detected!\n\nContent:\n{}", text(content))
            }
            MonitorEvent::FetchOrParseFailure => "Failed to fetch or parse content".to_string(),
        }
    }
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Polls one page on a fixed interval and reports changes to its section
pub struct MonitorLoop {
    fetcher: PageFetcher,
    extractor: ContentExtractor,
    notifier: Arc<dyn Notifier>,
    state: MonitorState,
    interval: Duration,
}

impl fmt::Debug for MonitorLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorLoop")
            .field("fetcher", &self.fetcher)
            .field("extractor", &self.extractor)
            .field("notifier", &self.notifier)
            .field("state", &self.state)
            .field("interval", &self.interval)
            .finish()
    }
}

impl MonitorLoop {
    pub fn new(
        fetcher: PageFetcher,
        extractor: ContentExtractor,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            notifier,
            state: MonitorState::new(),
            interval,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Announce the target and interval once, before the first cycle
    pub async fn announce_start(&self) -> MonitorEvent {
        let event = MonitorEvent::Started {
            url: self.fetcher.url().to_string(),
            interval: self.interval,
        };
        self.emit(&event).await;
        event
    }

    /// Run one cycle. Returns the event emitted, if any.
    pub async fn check_for_updates(&mut self) -> Option<MonitorEvent> {
        let markup = match self.fetcher.fetch().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Error fetching the page: {}", e);
                self.notifier
                    .notify(&Notification::plain(format!("Error fetching the page: {}", e)))
                    .await;
                None
            }
        };

        let text = match self.extractor.try_extract(markup.as_deref()) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Nothing extracted: {}", e);
                let event = MonitorEvent::FetchOrParseFailure;
                self.emit(&event).await;
                return Some(event);
            }
        };

        let current = fingerprint(&text);
        let outcome = has_changed(self.state.last_fingerprint(), &current);
        tracing::debug!("Fingerprint {} -> {:?}", current, outcome);

        let event = match outcome {
            ChangeOutcome::Unchanged => return None,
            ChangeOutcome::Initial => MonitorEvent::InitialContentLoaded,
            ChangeOutcome::Changed => MonitorEvent::NewContent { text },
        };

        self.emit(&event).await;
        self.state.record(current);
        Some(event)
    }

    /// Announce, then cycle until `cancel` fires
    pub async fn run(&mut self, cancel: CancellationToken) {
        self.announce_start().await;

        loop {
            self.check_for_updates().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Monitor loop cancelled");
                    break;
                }
            }
        }
    }

    /// Print with a timestamp, log, and notify
    async fn emit(&self, event: &MonitorEvent) -> DeliveryReport {
        let (line, notification) = render_event(event, &timestamp());
        println!("{}", line);
        tracing::info!("{}", event);

        let report = self.notifier.notify(&notification).await;
        if report.failed_count() > 0 {
            tracing::warn!(
                "Event delivered to {} of {} chat(s)",
                report.delivered_count(),
                report.len()
            );
        }
        report
    }
}

/// Local time as `YYYY-MM-DD HH:MM:SS`
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// The console line and the HTML notification for one event, sharing one timestamp
pub fn render_event(event: &MonitorEvent, timestamp: &str) -> (String, Notification) {
    let line = format!("[{}] {}", timestamp, event.message());
    let notification = Notification::html(format!("[{}] {}", timestamp, event.html_message()));
    (line, notification)
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
