//! Notifier trait and delivery bookkeeping

use async_trait::async_trait;

/// How the message text should be rendered by the receiving client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Plain,
    Html,
}

/// A notification to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub format: MessageFormat,
}

impl Notification {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: MessageFormat::Plain,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: MessageFormat::Html,
        }
    }
}

/// Outcome of delivering to a single recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed(String),
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

/// Per-recipient outcomes of one notification, in recipient order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    entries: Vec<(String, DeliveryStatus)>,
}

impl DeliveryReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, recipient: impl Into<String>, status: DeliveryStatus) {
        self.entries.push((recipient.into(), status));
    }

    pub fn status(&self, recipient: &str) -> Option<&DeliveryStatus> {
        self.entries
            .iter()
            .find(|(id, _)| id == recipient)
            .map(|(_, status)| status)
    }

    pub fn delivered_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| s.is_delivered()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.delivered_count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeliveryStatus)> {
        self.entries.iter().map(|(id, s)| (id.as_str(), s))
    }
}

/// Trait for sending notifications
///
/// Delivery failures never escape as errors; they are recorded in the report.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a notification to every configured recipient
    async fn notify(&self, notification: &Notification) -> DeliveryReport;
}
