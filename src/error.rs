//! Error types for the showcase application.

use thiserror::Error;

/// Application-level errors returned by library functions.
///
/// Fetch failures are logged and downgraded to empty results by the
/// consumers in `sources`; these variants mostly exist so the cause can be
/// reported before it is swallowed.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}
