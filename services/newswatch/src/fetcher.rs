//! Page fetcher for the watched URL

use std::sync::Arc;

use crate::config::TargetConfig;
use crate::io::HttpClient;

/// Retrieves the raw markup of the watched page
pub struct PageFetcher {
    url: String,
    user_agent: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("url", &self.url)
            .finish()
    }
}

impl PageFetcher {
    pub fn new(config: &TargetConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PageFetcher for {}", config.url);

        Self {
            url: config.url.clone(),
            user_agent: config.user_agent.clone(),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the page body. One attempt, no retry.
    pub async fn fetch(&self) -> crate::Result<String> {
        let headers = [("User-Agent", self.user_agent.as_str())];
        let response = self.http.get(&self.url, &headers).await?;

        if !response.is_success() {
            return Err(crate::NewswatchError::Fetch(format!(
                "GET {} returned status {}",
                self.url, response.status
            )));
        }

        Ok(response.body)
    }
}
