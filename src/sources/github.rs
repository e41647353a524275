//! GitHub contents API client.
//!
//! Wraps `GET /repos/{owner}/{repo}/contents/{path}` for listings and plain
//! `GET` on download URLs for raw text. Successful responses are held in a
//! [`FreshnessCache`] for the configured revalidation window.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::config::AppConfig;
use crate::error::ShowcaseError;
use crate::sources::cache::FreshnessCache;
use crate::sources::{ContentEntry, ContentSource};

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("showcase/", env!("CARGO_PKG_VERSION"));

/// Content source backed by one GitHub repository.
pub struct GitHubSource {
    client: reqwest::Client,
    contents_url: String,
    display_name: String,
    cache: FreshnessCache,
}

impl GitHubSource {
    pub fn new(config: &AppConfig) -> Result<Self, ShowcaseError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ShowcaseError::Source(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            contents_url: config.contents_url(),
            display_name: format!("{}/{}", config.owner, config.repo),
            cache: FreshnessCache::new(config.revalidate),
        })
    }

    /// Contents URL for `path`, with each segment percent-encoded.
    fn listing_url(&self, path: &str) -> Result<Url, ShowcaseError> {
        let mut url = Url::parse(&self.contents_url)?;
        url.path_segments_mut()
            .map_err(|_| ShowcaseError::Source(format!("Not a base URL: {}", self.contents_url)))?
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    async fn get_text(&self, url: &str, accept: Option<&str>) -> Result<String, ShowcaseError> {
        if let Some(body) = self.cache.get(url).await {
            debug!("cache hit: {url}");
            return Ok(body);
        }

        debug!("GET {url}");
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ShowcaseError::Source(format!(
                "{url} returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        self.cache.insert(url.to_string(), body.clone()).await;
        Ok(body)
    }
}

#[async_trait]
impl ContentSource for GitHubSource {
    fn name(&self) -> &str {
        &self.display_name
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>, ShowcaseError> {
        let url = self.listing_url(path)?;
        let body = self.get_text(url.as_str(), Some(GITHUB_JSON)).await?;
        // A file path answers with a single object, which is not a listing.
        let entries: Vec<ContentEntry> = serde_json::from_str(&body)?;
        Ok(entries)
    }

    async fn fetch_text(&self, locator: &str) -> Result<String, ShowcaseError> {
        self.get_text(locator, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn config_for(server: &Server, revalidate: Duration) -> AppConfig {
        AppConfig {
            owner: "octo".into(),
            repo: "things".into(),
            api_base_url: server.url(),
            revalidate,
            ..AppConfig::default()
        }
    }

    const LISTING: &str = r#"[
        {"name": "Lamp", "path": "Completed/Lamp", "type": "dir", "download_url": null},
        {"name": "notes.md", "path": "Completed/notes.md", "type": "file",
         "download_url": "https://raw.example/notes.md"}
    ]"#;

    #[tokio::test]
    async fn test_list_directory_sends_github_accept_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/things/contents/Completed")
            .match_header("accept", GITHUB_JSON)
            .match_header("user-agent", Matcher::Regex("^showcase/".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LISTING)
            .create_async()
            .await;

        let source = GitHubSource::new(&config_for(&server, Duration::ZERO)).unwrap();
        let entries = source.list_directory("Completed").await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "Completed/Lamp");
        assert!(entries[0].is_dir());
        assert!(entries[1].is_markdown());
    }

    #[tokio::test]
    async fn test_root_listing_and_encoded_segments() {
        let mut server = Server::new_async().await;
        let root = server
            .mock("GET", "/repos/octo/things/contents")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let spaced = server
            .mock("GET", "/repos/octo/things/contents/In%20Progress/My%20Thing")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let source = GitHubSource::new(&config_for(&server, Duration::ZERO)).unwrap();
        assert!(source.list_directory("").await.unwrap().is_empty());
        assert!(source
            .list_directory("In Progress/My Thing")
            .await
            .unwrap()
            .is_empty());

        root.assert_async().await;
        spaced.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octo/things/contents/Nope")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let source = GitHubSource::new(&config_for(&server, Duration::ZERO)).unwrap();
        let err = source.list_directory("Nope").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_file_path_is_not_a_listing() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octo/things/contents/README.md")
            .with_status(200)
            .with_body(r#"{"name": "README.md", "path": "README.md", "type": "file"}"#)
            .create_async()
            .await;

        let source = GitHubSource::new(&config_for(&server, Duration::ZERO)).unwrap();
        assert!(matches!(
            source.list_directory("README.md").await,
            Err(ShowcaseError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_responses_served_from_freshness_window() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/raw/README.md")
            .with_status(200)
            .with_body("# Title\n")
            .expect(1)
            .create_async()
            .await;

        let source = GitHubSource::new(&config_for(&server, Duration::from_secs(60))).unwrap();
        let url = format!("{}/raw/README.md", server.url());
        assert_eq!(source.fetch_text(&url).await.unwrap(), "# Title\n");
        assert_eq!(source.fetch_text(&url).await.unwrap(), "# Title\n");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/raw/flaky.md")
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let source = GitHubSource::new(&config_for(&server, Duration::from_secs(60))).unwrap();
        let url = format!("{}/raw/flaky.md", server.url());
        assert!(source.fetch_text(&url).await.is_err());
        assert!(source.fetch_text(&url).await.is_err());

        mock.assert_async().await;
    }
}
