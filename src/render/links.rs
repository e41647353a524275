//! Relative URL rewriting for project documents.
//!
//! Images resolve against the raw file host so they load directly; links
//! resolve against the repository's blob view so they open on GitHub.

use url::Url;

use crate::config::AppConfig;
use crate::error::ShowcaseError;

/// Base URLs for one project folder, both ending in `/`.
#[derive(Debug, Clone)]
pub struct LinkBase {
    raw: Url,
    blob: Url,
}

impl LinkBase {
    pub fn for_project(config: &AppConfig, project_path: &str) -> Result<Self, ShowcaseError> {
        Ok(Self {
            raw: folder_url(&config.raw_root(), project_path)?,
            blob: folder_url(&config.blob_root(), project_path)?,
        })
    }

    /// Absolute URL for an image source. Unresolvable sources become `""`.
    pub fn asset_url(&self, src: &str) -> String {
        if src.is_empty() {
            return String::new();
        }
        if has_scheme(src, &["http:", "https:", "data:"]) {
            return src.to_string();
        }
        self.raw
            .join(src)
            .map(|u| u.to_string())
            .unwrap_or_default()
    }

    /// Absolute URL for a link. Unresolvable links are kept as written.
    pub fn page_url(&self, href: &str) -> String {
        if href.is_empty() {
            return "#".into();
        }
        if href.starts_with('#') || has_scheme(href, &["http:", "https:", "mailto:", "tel:"]) {
            return href.to_string();
        }
        self.blob
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string())
    }
}

fn has_scheme(url: &str, schemes: &[&str]) -> bool {
    let lower = url.to_ascii_lowercase();
    schemes.iter().any(|s| lower.starts_with(s))
}

/// `root` extended with each segment of `path`, percent-encoded, plus a trailing `/`.
fn folder_url(root: &str, path: &str) -> Result<Url, ShowcaseError> {
    let mut url = Url::parse(root)?;
    url.path_segments_mut()
        .map_err(|_| ShowcaseError::Render(format!("Not a base URL: {root}")))?
        .pop_if_empty()
        .extend(path.split('/').filter(|s| !s.is_empty()))
        .push("");
    Ok(url)
}
