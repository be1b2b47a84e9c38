//! Error types for the newswatch service

/// Errors that can occur in the newswatch service
#[derive(Debug, thiserror::Error)]
pub enum NewswatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for newswatch operations
pub type Result<T> = std::result::Result<T, NewswatchError>;
