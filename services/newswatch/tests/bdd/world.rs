//! BDD test world for newswatch service

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use cucumber::World;
use tokio::sync::RwLock;

use newswatch::io::{HttpClient, HttpResponse};
use newswatch::notifier::DeliveryReport;
use newswatch::{MonitorEvent, MonitorLoop, NewswatchError};

pub const TEST_PAGE_URL: &str = "https://news.example/page";
pub const TEST_API_BASE: &str = "https://api.telegram.test";
pub const TEST_TOKEN: &str = "test-token";

/// What the scripted server answers to the next page GET
#[derive(Debug, Clone)]
pub enum PageReply {
    Html(String),
    Status(u16),
    Unreachable,
}

/// A recorded HTTP request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// HTTP client that serves scripted page replies and accepts sendMessage calls
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    pub replies: RwLock<VecDeque<PageReply>>,
    pub unreachable_chats: RwLock<Vec<String>>,
    pub requests: RwLock<Vec<RecordedRequest>>,
}

impl ScriptedHttpClient {
    pub async fn push_reply(&self, reply: PageReply) {
        self.replies.write().await.push_back(reply);
    }

    /// Texts of every sendMessage call, in order
    pub async fn sent_texts(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == "POST")
            .filter_map(|r| r.body.as_ref())
            .filter_map(|b| b["text"].as_str().map(str::to_string))
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> newswatch::Result<HttpResponse> {
        self.requests.write().await.push(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            body: None,
        });

        let reply = self
            .replies
            .write()
            .await
            .pop_front()
            .unwrap_or(PageReply::Unreachable);
        match reply {
            PageReply::Html(body) => Ok(HttpResponse { status: 200, body }),
            PageReply::Status(status) => Ok(HttpResponse {
                status,
                body: String::new(),
            }),
            PageReply::Unreachable => Err(NewswatchError::Http(format!(
                "GET {} failed: connection refused",
                url
            ))),
        }
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> newswatch::Result<HttpResponse> {
        self.requests.write().await.push(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            body: Some(body.clone()),
        });

        let chat_id = body["chat_id"].as_str().unwrap_or_default().to_string();
        if self.unreachable_chats.read().await.contains(&chat_id) {
            return Err(NewswatchError::Http("connection refused".to_string()));
        }
        Ok(HttpResponse {
            status: 200,
            body: r#"{"ok":true}"#.to_string(),
        })
    }
}

#[derive(Debug, Default, World)]
pub struct NewswatchWorld {
    pub http: Arc<ScriptedHttpClient>,

    // Monitor loop testing
    pub chat_ids: Vec<String>,
    pub monitor: Option<MonitorLoop>,
    pub last_event: Option<MonitorEvent>,

    // Delivery testing
    pub delivery_report: Option<DeliveryReport>,

    // Startup testing
    pub env: HashMap<String, String>,
    pub startup_error: Option<NewswatchError>,
}
