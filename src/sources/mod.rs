//! Content source abstraction.
//!
//! Defines the `ContentSource` trait and the `ContentEntry` struct that
//! every listing backend produces, plus the swallowing helpers the rest of
//! the crate consumes: a failed listing is an empty listing, a failed
//! download is an empty string.

pub mod cache;
pub mod github;
pub mod markdown;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ShowcaseError;

/// Kind of a listed entry, as reported by the contents API `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum EntryKind {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir")]
    Directory,
    /// Symlinks, submodules and anything else we never descend into.
    #[serde(other)]
    Other,
}

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentEntry {
    pub name: String,
    /// Path relative to the repository root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Direct download locator; absent for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// `true` for entries named `*.md` (any case) that can be downloaded.
    pub fn is_markdown(&self) -> bool {
        self.name.to_lowercase().ends_with(".md") && self.download_url.is_some()
    }
}

/// Read-only access to a repository of project folders.
///
/// `path` is relative to the repository root; the empty string is the root.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable name for this source.
    fn name(&self) -> &str;

    /// List the entries of a directory, in listing order.
    async fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>, ShowcaseError>;

    /// Fetch raw text from a download locator.
    async fn fetch_text(&self, locator: &str) -> Result<String, ShowcaseError>;
}

/// List `path`, logging and downgrading any failure to an empty listing.
pub async fn list_or_empty(source: &dyn ContentSource, path: &str) -> Vec<ContentEntry> {
    match source.list_directory(path).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Error listing '{path}' from {}: {e}", source.name());
            Vec::new()
        }
    }
}

/// Fetch `locator`, logging and downgrading any failure to an empty string.
pub async fn text_or_empty(source: &dyn ContentSource, locator: &str) -> String {
    match source.fetch_text(locator).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Error fetching file content {locator}: {e}");
            String::new()
        }
    }
}
