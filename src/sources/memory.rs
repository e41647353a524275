//! In-memory content source for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ShowcaseError;
use crate::sources::{ContentEntry, ContentSource, EntryKind};

/// Serves canned listings and file bodies, and records every path listed.
#[derive(Default)]
pub struct MemorySource {
    listings: HashMap<String, Vec<ContentEntry>>,
    texts: HashMap<String, String>,
    unlistable: HashSet<String>,
    listed: Mutex<Vec<String>>,
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add directory `path`, registering it in its parent's listing.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.ensure_dir(path);
        self
    }

    /// Add directory `path` to its parent's listing, but fail every listing of it.
    pub fn with_unlistable_dir(mut self, path: &str) -> Self {
        self.ensure_dir(path);
        self.unlistable.insert(path.to_string());
        self
    }

    /// Add a file entry to directory `dir` (created if needed). A `Some`
    /// body makes the file downloadable at `mem://<path>`.
    pub fn with_file(mut self, dir: &str, name: &str, body: Option<&str>) -> Self {
        self.ensure_dir(dir);
        let path = join(dir, name);
        let download_url = body.map(|text| {
            let locator = format!("mem://{path}");
            self.texts.insert(locator.clone(), text.to_string());
            locator
        });
        self.push_entry(
            dir,
            ContentEntry {
                name: name.to_string(),
                path,
                kind: EntryKind::File,
                download_url,
            },
        );
        self
    }

    /// Every path passed to `list_directory`, in call order.
    pub fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }

    fn ensure_dir(&mut self, path: &str) {
        if self.listings.contains_key(path) {
            return;
        }
        self.listings.insert(path.to_string(), Vec::new());
        if path.is_empty() {
            return;
        }
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent.to_string(), name.to_string()),
            None => (String::new(), path.to_string()),
        };
        self.ensure_dir(&parent);
        self.push_entry(
            &parent,
            ContentEntry {
                name,
                path: path.to_string(),
                kind: EntryKind::Directory,
                download_url: None,
            },
        );
    }

    fn push_entry(&mut self, dir: &str, entry: ContentEntry) {
        self.listings.entry(dir.to_string()).or_default().push(entry);
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>, ShowcaseError> {
        self.listed.lock().unwrap().push(path.to_string());
        if self.unlistable.contains(path) {
            return Err(ShowcaseError::Source(format!("{path} returned 500 Internal Server Error")));
        }
        self.listings
            .get(path)
            .cloned()
            .ok_or_else(|| ShowcaseError::NotFound(path.to_string()))
    }

    async fn fetch_text(&self, locator: &str) -> Result<String, ShowcaseError> {
        self.texts
            .get(locator)
            .cloned()
            .ok_or_else(|| ShowcaseError::NotFound(locator.to_string()))
    }
}
