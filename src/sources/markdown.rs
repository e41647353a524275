//! Project markdown convention parsing.
//!
//! Every project folder carries a markdown file laid out as a fixed template:
//!
//! ```text
//! # [Title](https://optional.redirect)
//!
//! **Project Description:** One line of text
//!
//! **Languages & Technologies:** Rust, Docker
//! ```
//!
//! Only those exact positions are read. Anything off-template yields empty
//! fields rather than an error.

use regex::Regex;
use serde::Serialize;

use crate::sources::{list_or_empty, text_or_empty, ContentEntry, ContentSource};

/// Zero-based line holding the description.
const DESCRIPTION_LINE: usize = 2;

/// Zero-based line holding the tag list.
const TAGS_LINE: usize = 4;

/// Metadata pulled out of a project's markdown file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectMetadata {
    pub description: String,
    #[serde(rename = "redirectUrl")]
    pub redirect_url: Option<String>,
    pub tags: Vec<String>,
}

/// First downloadable `.md` entry in listing order.
pub fn find_markdown_file(entries: &[ContentEntry]) -> Option<&ContentEntry> {
    entries.iter().find(|entry| entry.is_markdown())
}

/// Fetch and parse the markdown file of the project at `resolved_path`.
pub async fn extract_metadata(source: &dyn ContentSource, resolved_path: &str) -> ProjectMetadata {
    let entries = list_or_empty(source, resolved_path).await;

    let locator = match find_markdown_file(&entries).and_then(|f| f.download_url.as_deref()) {
        Some(locator) => locator,
        None => return ProjectMetadata::default(),
    };

    let content = text_or_empty(source, locator).await;
    parse_metadata(&content)
}

/// Parse the redirect, description and tags out of markdown text.
pub fn parse_metadata(content: &str) -> ProjectMetadata {
    let lines: Vec<&str> = content.split('\n').collect();

    ProjectMetadata {
        description: lines
            .get(DESCRIPTION_LINE)
            .and_then(|line| extract_description(line))
            .unwrap_or_default(),
        redirect_url: extract_redirect(&lines),
        tags: lines
            .get(TAGS_LINE)
            .and_then(|line| extract_tags(line))
            .unwrap_or_default(),
    }
}

/// Link target of a `# [Label](https://...)` heading on the first non-blank line.
fn extract_redirect(lines: &[&str]) -> Option<String> {
    let first = lines.iter().find(|line| !line.trim().is_empty())?;
    let re = Regex::new(r"^\s*#\s*\[[^\]]+\]\((https?://[^\s)]+)\)").ok()?;
    re.captures(first).map(|cap| cap[1].to_string())
}

/// `**Project Description:** text`.
///
/// The `?` after "Project" and "Description" makes only their last letter
/// optional. Existing project files depend on this exact pattern.
fn extract_description(line: &str) -> Option<String> {
    let re = Regex::new(r"(?i)\*\*Project?\s*Description?:\*\*\s*(.+)").ok()?;
    re.captures(line).map(|cap| cap[1].trim().to_string())
}

/// `**Languages & Technologies:** a, b, c`, trailing `s` on either word optional.
fn extract_tags(line: &str) -> Option<Vec<String>> {
    let re = Regex::new(r"(?i)\*\*Languages?\s*&\s*Technologies?:\*\*\s*(.+)").ok()?;
    let cap = re.captures(line)?;
    Some(
        cap[1]
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    )
}
