//! Project catalog assembly.
//!
//! Walks the repository root, groups project folders by status, and pulls
//! each project's metadata. The result is a pure projection of the remote
//! repository and is rebuilt on every request.

use futures::future::join_all;
use serde::Serialize;
use tracing::info;

use crate::sources::markdown::extract_metadata;
use crate::sources::{list_or_empty, ContentEntry, ContentSource};
use crate::status::Status;

/// One project in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub name: String,
    /// Resolved path, e.g. `Completed/Lamp`.
    pub path: String,
    pub status: Status,
    pub tags: Vec<String>,
    pub description: String,
    #[serde(rename = "redirectUrl")]
    pub redirect_url: Option<String>,
}

/// A project folder found during the walk, before metadata is fetched.
struct Candidate {
    name: String,
    path: String,
    status: Status,
}

/// Build the full catalog from `source`.
///
/// With status folders present, records are emitted per status in
/// [`Status::GROUPS`] order and in listing order within a status. Without
/// any, every top-level directory is an `Uncategorized` project.
pub async fn build_catalog(source: &dyn ContentSource) -> Vec<ProjectRecord> {
    let root = list_or_empty(source, "").await;
    let directories: Vec<&ContentEntry> = root.iter().filter(|e| e.is_dir()).collect();

    let (grouped, flat): (Vec<&ContentEntry>, Vec<&ContentEntry>) = directories
        .into_iter()
        .partition(|e| Status::from_folder(&e.name).is_some());

    let candidates: Vec<Candidate> = if grouped.is_empty() {
        flat.iter()
            .map(|dir| Candidate {
                name: dir.name.clone(),
                path: dir.name.clone(),
                status: Status::Uncategorized,
            })
            .collect()
    } else {
        grouped_candidates(source, &grouped).await
    };

    let records: Vec<ProjectRecord> = join_all(candidates.into_iter().map(|c| async move {
        let meta = extract_metadata(source, &c.path).await;
        ProjectRecord {
            name: c.name,
            path: c.path,
            status: c.status,
            tags: meta.tags,
            description: meta.description,
            redirect_url: meta.redirect_url,
        }
    }))
    .await;

    info!("Catalog built from {}: {} project(s)", source.name(), records.len());
    records
}

async fn grouped_candidates(source: &dyn ContentSource, folders: &[&ContentEntry]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for status in Status::GROUPS {
        for folder in folders
            .iter()
            .filter(|f| Status::from_folder(&f.name) == Some(status))
        {
            // A failed listing only costs this folder its projects.
            let entries = list_or_empty(source, &folder.name).await;
            candidates.extend(entries.into_iter().filter(|e| e.is_dir()).map(|sub| Candidate {
                path: format!("{}/{}", folder.name, sub.name),
                name: sub.name,
                status,
            }));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::memory::MemorySource;

    fn summary(records: &[ProjectRecord]) -> Vec<(&str, &str, Status)> {
        records
            .iter()
            .map(|r| (r.name.as_str(), r.path.as_str(), r.status))
            .collect()
    }

    #[tokio::test]
    async fn test_status_folders_emit_in_status_order() {
        // Listed out of order on purpose.
        let source = MemorySource::new()
            .with_dir("Incomplete/B")
            .with_dir("Completed/A")
            .with_file("", "README.md", Some("# Projects"));

        let records = build_catalog(&source).await;

        assert_eq!(
            summary(&records),
            vec![
                ("A", "Completed/A", Status::Completed),
                ("B", "Incomplete/B", Status::Incomplete),
            ]
        );
    }

    #[tokio::test]
    async fn test_flat_layout_is_uncategorized() {
        let source = MemorySource::new().with_dir("X").with_dir("Y");

        let records = build_catalog(&source).await;

        assert_eq!(
            summary(&records),
            vec![
                ("X", "X", Status::Uncategorized),
                ("Y", "Y", Status::Uncategorized),
            ]
        );
    }

    #[tokio::test]
    async fn test_other_dirs_ignored_when_status_folders_exist() {
        let source = MemorySource::new()
            .with_dir("Archive/Old")
            .with_dir("InProgress/New")
            .with_file("InProgress", "index.md", Some("not a project"));

        let records = build_catalog(&source).await;

        assert_eq!(
            summary(&records),
            vec![("New", "InProgress/New", Status::InProgress)]
        );
    }

    #[tokio::test]
    async fn test_folder_match_ignores_case_and_keeps_listed_name() {
        let source = MemorySource::new().with_dir("completed/Lamp");

        let records = build_catalog(&source).await;

        assert_eq!(
            summary(&records),
            vec![("Lamp", "completed/Lamp", Status::Completed)]
        );
    }

    #[tokio::test]
    async fn test_records_carry_metadata() {
        let text = "# [Lamp](https://lamp.example)\n\n\
            **Project Description:** Bright.\n\n\
            **Languages & Technologies:** C, KiCad";
        let source = MemorySource::new()
            .with_file("Completed/Lamp", "README.md", Some(text))
            .with_dir("Completed/Bare");

        let records = build_catalog(&source).await;

        assert_eq!(records[0].description, "Bright.");
        assert_eq!(records[0].tags, vec!["C", "KiCad"]);
        assert_eq!(
            records[0].redirect_url.as_deref(),
            Some("https://lamp.example")
        );
        assert_eq!(records[1].description, "");
        assert!(records[1].tags.is_empty());
        assert_eq!(records[1].redirect_url, None);
    }

    #[tokio::test]
    async fn test_failed_status_listing_skips_only_that_status() {
        let source = MemorySource::new()
            .with_unlistable_dir("Completed")
            .with_dir("Incomplete/B");

        let records = build_catalog(&source).await;

        assert_eq!(
            summary(&records),
            vec![("B", "Incomplete/B", Status::Incomplete)]
        );
        assert!(source.listed().contains(&"Completed".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_root_is_empty() {
        assert!(build_catalog(&MemorySource::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_is_identical() {
        let source = MemorySource::new()
            .with_file(
                "Completed/A",
                "a.md",
                Some("#\n\n**Project Description:** a\n\n**Languages & Technologies:** x, y"),
            )
            .with_dir("Incomplete/B");

        let first = serde_json::to_string(&build_catalog(&source).await).unwrap();
        let second = serde_json::to_string(&build_catalog(&source).await).unwrap();

        assert_eq!(first, second);
    }
}
