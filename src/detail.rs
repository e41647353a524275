//! Project detail assembly.
//!
//! Resolves a project by name, fetches every markdown file in its folder and
//! renders them with destinations rewritten against the project's folder.

use futures::future::join_all;

use crate::config::AppConfig;
use crate::error::ShowcaseError;
use crate::render::links::LinkBase;
use crate::render::markdown::render_markdown;
use crate::resolver::resolve_project_path;
use crate::sources::markdown::parse_metadata;
use crate::sources::{list_or_empty, text_or_empty, ContentEntry, ContentSource};
use crate::status::Status;

/// One rendered markdown file.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub name: String,
    pub html: String,
}

/// Everything the detail page shows.
#[derive(Debug, Clone)]
pub struct ProjectPage {
    pub display_name: String,
    pub path: String,
    pub status: Status,
    pub tags: Vec<String>,
    pub file_count: usize,
    pub documents: Vec<RenderedDocument>,
}

/// Load the detail page for `name`.
///
/// An unresolvable name is still tried as a literal path; an empty listing
/// either way is [`ShowcaseError::NotFound`].
pub async fn load_project_page(
    source: &dyn ContentSource,
    config: &AppConfig,
    name: &str,
) -> Result<ProjectPage, ShowcaseError> {
    let path = resolve_project_path(source, name)
        .await
        .unwrap_or_else(|| name.to_string());

    let files = list_or_empty(source, &path).await;
    if files.is_empty() {
        return Err(ShowcaseError::NotFound(format!("project '{name}'")));
    }

    let display_name = path.rsplit('/').next().unwrap_or(&path).to_string();
    let base = LinkBase::for_project(config, &path)?;

    let markdown_files: Vec<&ContentEntry> = files.iter().filter(|f| f.is_markdown()).collect();
    let contents = join_all(markdown_files.iter().map(|file| async move {
        let text = match file.download_url.as_deref() {
            Some(locator) => text_or_empty(source, locator).await,
            None => String::new(),
        };
        (file.name.clone(), text)
    }))
    .await;

    // Tags come from the first markdown file, as in the catalog.
    let tags = contents
        .first()
        .map(|(_, text)| parse_metadata(text).tags)
        .unwrap_or_default();

    let documents = contents
        .into_iter()
        .map(|(name, text)| {
            Ok(RenderedDocument {
                name,
                html: render_markdown(&text, &base)?,
            })
        })
        .collect::<Result<Vec<_>, ShowcaseError>>()?;

    Ok(ProjectPage {
        status: Status::from_path(&path),
        display_name,
        path,
        tags,
        file_count: files.len(),
        documents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::memory::MemorySource;

    fn config() -> AppConfig {
        AppConfig {
            owner: "octo".into(),
            repo: "things".into(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_loads_resolved_project() {
        let readme = "# Lamp\n\n**Project Description:** Light.\n\n\
            **Languages & Technologies:** C, CAD\n\n![pcb](pcb.png)";
        let source = MemorySource::new()
            .with_file("Completed/Lamp", "README.md", Some(readme))
            .with_file("Completed/Lamp", "BUILD.md", Some("Build [notes](notes.txt)"))
            .with_file("Completed/Lamp", "pcb.png", Some("png"));

        let page = load_project_page(&source, &config(), "Lamp").await.unwrap();

        assert_eq!(page.display_name, "Lamp");
        assert_eq!(page.path, "Completed/Lamp");
        assert_eq!(page.status, Status::Completed);
        assert_eq!(page.tags, vec!["C", "CAD"]);
        assert_eq!(page.file_count, 3);
        assert_eq!(page.documents.len(), 2);
        assert_eq!(page.documents[0].name, "README.md");
        assert!(page.documents[0]
            .html
            .contains("https://raw.githubusercontent.com/octo/things/HEAD/Completed/Lamp/pcb.png"));
        assert!(page.documents[1]
            .html
            .contains("https://github.com/octo/things/blob/HEAD/Completed/Lamp/notes.txt"));
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let source = MemorySource::new().with_dir("Completed/Lamp");

        let err = load_project_page(&source, &config(), "Ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, ShowcaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_project_without_markdown() {
        let source = MemorySource::new().with_file("Tools", "main.py", Some("print()"));

        let page = load_project_page(&source, &config(), "Tools").await.unwrap();

        assert_eq!(page.status, Status::Uncategorized);
        assert!(page.documents.is_empty());
        assert!(page.tags.is_empty());
        assert_eq!(page.file_count, 1);
    }
}
