//! Configuration types for the newswatch service

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable holding the comma-separated chat ids
pub const CHAT_IDS_ENV: &str = "TELEGRAM_CHAT_IDS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// The page being watched and how it is fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// CSS selector of the section whose text is fingerprinted
    #[serde(default = "default_selector")]
    pub selector: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_polling_interval")]
    pub polling_interval_seconds: u64,
    /// `None` leaves the HTTP client's own default in place
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: Option<u64>,
}

impl TargetConfig {
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_seconds)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            selector: default_selector(),
            user_agent: default_user_agent(),
            polling_interval_seconds: default_polling_interval(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_ids: Vec<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_ids", &self.chat_ids)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_ids: Vec::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_url() -> String {
    "https://it.tlscontact.com/by/msq/page.php?pid=news".to_string()
}

fn default_selector() -> String {
    "div.news-content".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_polling_interval() -> u64 {
    300
}

fn default_request_timeout() -> Option<u64> {
    Some(30)
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

impl Config {
    /// Pull the Telegram secrets from the process environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_with(|key| std::env::var(key).ok())
    }

    /// Pull the Telegram secrets through `lookup`, then validate.
    ///
    /// Values found through `lookup` override whatever the config file held.
    pub fn resolve_secrets_with<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(BOT_TOKEN_ENV) {
            let token = token.trim();
            if !token.is_empty() {
                self.telegram.bot_token = token.to_string();
            }
        }
        if let Some(raw) = lookup(CHAT_IDS_ENV) {
            let chat_ids = parse_chat_ids(&raw);
            if !chat_ids.is_empty() {
                self.telegram.chat_ids = chat_ids;
            }
        }
        self.validate()
    }

    /// Reject configurations the monitor cannot start with
    pub fn validate(&self) -> crate::Result<()> {
        if self.telegram.bot_token.is_empty() {
            return Err(crate::NewswatchError::Config(
                "Telegram bot token not found in environment variables".to_string(),
            ));
        }
        if self.telegram.chat_ids.is_empty() {
            return Err(crate::NewswatchError::Config(
                "No Telegram chat IDs found in environment variables".to_string(),
            ));
        }
        if self.target.polling_interval_seconds == 0 {
            return Err(crate::NewswatchError::Config(
                "polling_interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a comma-separated chat id list, trimming and dropping empty entries
pub fn parse_chat_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::NewswatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
