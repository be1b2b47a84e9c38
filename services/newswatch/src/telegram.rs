//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::{DeliveryReport, DeliveryStatus, MessageFormat, Notification, Notifier};

/// Sends each notification to every configured chat, one `sendMessage` call per chat
pub struct TelegramNotifier {
    send_url: String,
    chat_ids: Vec<String>,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_ids", &self.chat_ids)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_base_url.trim_end_matches('/'),
            config.bot_token
        );

        tracing::debug!(
            "Created TelegramNotifier for {} chat(s)",
            config.chat_ids.len()
        );

        Self {
            send_url,
            chat_ids: config.chat_ids.clone(),
            http,
        }
    }

    pub fn chat_ids(&self) -> &[String] {
        &self.chat_ids
    }

    async fn send_to(&self, chat_id: &str, notification: &Notification) -> crate::Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": notification.text,
        });
        if notification.format == MessageFormat::Html {
            payload["parse_mode"] = json!("HTML");
        }

        let response = self.http.post_json(&self.send_url, &payload).await?;

        if !response.is_success() {
            return Err(crate::NewswatchError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, notification: &Notification) -> DeliveryReport {
        let mut report = DeliveryReport::new();

        for chat_id in &self.chat_ids {
            match self.send_to(chat_id, notification).await {
                Ok(()) => {
                    tracing::info!("Message sent successfully to chat ID: {}", chat_id);
                    report.record(chat_id.as_str(), DeliveryStatus::Delivered);
                }
                Err(e) => {
                    tracing::warn!("Failed to send Telegram message to chat ID {}: {}", chat_id, e);
                    report.record(chat_id.as_str(), DeliveryStatus::Failed(e.to_string()));
                }
            }
        }

        report
    }
}
