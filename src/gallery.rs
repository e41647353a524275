//! Gallery filtering.
//!
//! A filter is a name search, a status choice and a set of required tags,
//! all compared case-insensitively. It round-trips through the gallery's
//! query string so filtered views are linkable.

use std::collections::HashMap;

use url::form_urlencoded;

use crate::catalog::ProjectRecord;
use crate::config::TagCategory;

/// Status select value meaning "no status filter".
pub const ALL_STATUSES: &str = "all";

/// Active gallery filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    /// Substring of the project name.
    pub search: String,
    /// Lower-cased status label, or `None` for all.
    pub status: Option<String>,
    /// Lower-cased tags a project must all carry.
    pub tags: Vec<String>,
}

/// A deduplicated choice offered by the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Lower-cased comparison value.
    pub value: String,
    /// Spelling shown to the user (first one seen).
    pub label: String,
}

impl GalleryFilter {
    /// Parse `q`, `status` and repeated `tag` parameters.
    pub fn from_query(query: &str) -> Self {
        let mut filter = GalleryFilter::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => filter.search = value.into_owned(),
                "status" => {
                    let status = value.trim().to_lowercase();
                    filter.status = if status.is_empty() || status == ALL_STATUSES {
                        None
                    } else {
                        Some(status)
                    };
                }
                "tag" => {
                    let tag = value.trim().to_lowercase();
                    if !tag.is_empty() && !filter.tags.contains(&tag) {
                        filter.tags.push(tag);
                    }
                }
                _ => {}
            }
        }
        filter
    }

    /// Encode back into a query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if !self.search.trim().is_empty() {
            out.append_pair("q", &self.search);
        }
        if let Some(status) = &self.status {
            out.append_pair("status", status);
        }
        for tag in &self.tags {
            out.append_pair("tag", tag);
        }
        out.finish()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some() || !self.tags.is_empty()
    }

    /// Copy of this filter with `tag` toggled on or off.
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let tag = tag.to_lowercase();
        let mut next = self.clone();
        if let Some(pos) = next.tags.iter().position(|t| *t == tag) {
            next.tags.remove(pos);
        } else {
            next.tags.push(tag);
        }
        next
    }

    pub fn matches(&self, project: &ProjectRecord) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_name = project.name.to_lowercase().contains(&term);

        let matches_status = self
            .status
            .as_deref()
            .map_or(true, |s| project.status.label().to_lowercase() == s);

        let project_tags: Vec<String> = project.tags.iter().map(|t| t.to_lowercase()).collect();
        let matches_tags = self.tags.iter().all(|t| project_tags.contains(t));

        matches_name && matches_status && matches_tags
    }

    /// Projects passing the filter, in catalog order.
    pub fn apply<'a>(&self, projects: &'a [ProjectRecord]) -> Vec<&'a ProjectRecord> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Statuses present in the catalog, sorted by label.
pub fn status_options(projects: &[ProjectRecord]) -> Vec<FilterOption> {
    dedup_sorted(projects.iter().map(|p| p.status.label()))
}

/// Every tag in the catalog, first spelling kept, sorted by label.
pub fn tag_options(projects: &[ProjectRecord]) -> Vec<FilterOption> {
    dedup_sorted(projects.iter().flat_map(|p| p.tags.iter().map(String::as_str)))
}

fn dedup_sorted<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<FilterOption> {
    let mut options: Vec<FilterOption> = Vec::new();
    for label in labels {
        let value = label.to_lowercase();
        if !options.iter().any(|o| o.value == value) {
            options.push(FilterOption {
                value,
                label: label.to_string(),
            });
        }
    }
    options.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.label.cmp(&b.label))
    });
    options
}

/// Badge colors per lower-cased tag.
#[derive(Debug, Clone, Default)]
pub struct TagPalette {
    classes: HashMap<String, String>,
}

impl TagPalette {
    /// The first category listing a tag wins.
    pub fn new(categories: &[TagCategory]) -> Self {
        let mut classes = HashMap::new();
        for category in categories {
            for tag in &category.tags {
                classes
                    .entry(tag.to_lowercase())
                    .or_insert_with(|| category.classes.clone());
            }
        }
        Self { classes }
    }

    /// Classes for `tag`, or `""` when it belongs to no category.
    pub fn classes_for(&self, tag: &str) -> &str {
        self.classes
            .get(&tag.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}
